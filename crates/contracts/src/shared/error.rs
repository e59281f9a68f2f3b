use thiserror::Error;

/// Generic message shown when the server did not supply one.
pub const GENERIC_ERROR_MESSAGE: &str = "Ocurrió un error al procesar la solicitud";

/// Failure of a single request against the ERP backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (offline, CORS, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status without a decodable envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("resource not found")]
    NotFound,

    /// The envelope came back with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// `success: true` but `data` was missing where a payload is required.
    #[error("response carried no data")]
    EmptyPayload,

    /// Client-side validation blocked the request.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound | ApiError::Http { status: 404, .. })
    }

    /// Text suitable for a toast: the server message when there is one,
    /// a generic one otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) | ApiError::Validation(message) => {
                if message.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            ApiError::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::NotFound => "El registro solicitado no existe".to_string(),
            ApiError::Network(_) => "No fue posible conectar con el servidor".to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_generic() {
        let err = ApiError::Rejected("El RFC ya existe".into());
        assert_eq!(err.user_message(), "El RFC ya existe");

        let err = ApiError::Rejected("   ".into());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);

        let err = ApiError::Http {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn not_found_detection() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(ApiError::Http {
            status: 404,
            message: "Not Found".into()
        }
        .is_not_found());
        assert!(!ApiError::EmptyPayload.is_not_found());
    }
}
