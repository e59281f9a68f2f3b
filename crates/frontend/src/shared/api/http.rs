//! Thin layer over `gloo_net` that speaks the backend envelope
//! `{ statusCode, message, success, data }`.

use contracts::shared::api_response::ApiResponse;
use contracts::shared::error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decodes a response body into the envelope.
///
/// Non-2xx bodies are decoded as envelope too, so the server message reaches
/// the user; a bare 404 becomes `NotFound`.
pub fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    ok: bool,
    body: &str,
) -> Result<ApiResponse<T>, ApiError> {
    if ok {
        if body.trim().is_empty() {
            // 204 No Content and friends
            return Ok(ApiResponse {
                status_code: status,
                message: None,
                success: true,
                data: None,
            });
        }
        return serde_json::from_str::<ApiResponse<T>>(body)
            .map_err(|e| ApiError::Decode(e.to_string()));
    }

    match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
        Ok(envelope) => {
            let status_code = if envelope.status_code == 0 {
                status
            } else {
                envelope.status_code
            };
            Ok(ApiResponse {
                status_code,
                message: envelope.message,
                success: false,
                data: None,
            })
        }
        Err(_) if status == 404 => Err(ApiError::NotFound),
        Err(_) => Err(ApiError::Http {
            status,
            message: String::new(),
        }),
    }
}

async fn send(
    method: &str,
    url: &str,
    request: Result<Request, gloo_net::Error>,
) -> Result<Response, ApiError> {
    let request = request.map_err(|e| {
        log::error!("{} {}: failed to build request: {}", method, url, e);
        ApiError::Decode(e.to_string())
    })?;
    request.send().await.map_err(|e| {
        log::error!("{} {}: {}", method, url, e);
        ApiError::Network(e.to_string())
    })
}

async fn read_envelope<T: DeserializeOwned>(
    method: &str,
    url: &str,
    response: Response,
) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let body = response.text().await.map_err(|e| {
        log::error!("{} {}: failed to read body: {}", method, url, e);
        ApiError::Decode(e.to_string())
    })?;
    decode_envelope(status, ok, &body).map_err(|e| {
        if !e.is_not_found() {
            log::error!("{} {} -> {}: {}", method, url, status, e);
        }
        e
    })
}

fn logged<T>(method: &str, url: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        log::error!("{} {}: {}", method, url, e);
    }
    result
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, gloo_net::Error> {
    builder.header("Accept", "application/json").json(body)
}

fn without_body(builder: RequestBuilder) -> Result<Request, gloo_net::Error> {
    builder.header("Accept", "application/json").build()
}

/// `GET url`, payload required.
pub async fn get<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = send("GET", url, without_body(Request::get(url))).await?;
    let envelope = read_envelope::<T>("GET", url, response).await?;
    logged("GET", url, envelope.into_result())
}

/// `GET url` where "not found" means no data.
pub async fn get_optional<T: DeserializeOwned>(url: &str) -> Result<Option<T>, ApiError> {
    let response = send("GET", url, without_body(Request::get(url))).await?;
    match read_envelope::<T>("GET", url, response).await {
        Ok(envelope) => logged("GET", url, envelope.into_optional()),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// `POST url` with a JSON body. `Ok(None)` when the server answers without data.
pub async fn post<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<Option<T>, ApiError> {
    let response = send("POST", url, with_json(Request::post(url), body)).await?;
    let envelope = read_envelope::<T>("POST", url, response).await?;
    logged("POST", url, envelope.into_optional_payload())
}

/// `PUT url` with a JSON body. `Ok(None)` when the server answers without data.
pub async fn put<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<Option<T>, ApiError> {
    let response = send("PUT", url, with_json(Request::put(url), body)).await?;
    let envelope = read_envelope::<T>("PUT", url, response).await?;
    logged("PUT", url, envelope.into_optional_payload())
}

pub async fn delete(url: &str) -> Result<(), ApiError> {
    let response = send("DELETE", url, without_body(Request::delete(url))).await?;
    let envelope = read_envelope::<serde_json::Value>("DELETE", url, response).await?;
    logged("DELETE", url, envelope.into_unit())
}

/// Success with or without payload; used by writes.
trait OptionalPayload<T> {
    fn into_optional_payload(self) -> Result<Option<T>, ApiError>;
}

impl<T> OptionalPayload<T> for ApiResponse<T> {
    fn into_optional_payload(self) -> Result<Option<T>, ApiError> {
        match self.into_result() {
            Ok(data) => Ok(Some(data)),
            Err(ApiError::EmptyPayload) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Area {
        id: i64,
        name: String,
    }

    #[test]
    fn success_envelope() {
        let body = r#"{"statusCode":200,"message":"OK","success":true,"data":{"id":1,"name":"Ventas"}}"#;
        let area = decode_envelope::<Area>(200, true, body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(area, Area { id: 1, name: "Ventas".into() });
    }

    #[test]
    fn empty_body_is_success_without_data() {
        let envelope = decode_envelope::<Area>(204, true, "").unwrap();
        assert!(envelope.into_unit().is_ok());
        let envelope = decode_envelope::<Area>(204, true, "  ").unwrap();
        assert_eq!(envelope.into_optional_payload(), Ok(None));
    }

    #[test]
    fn error_body_keeps_server_message() {
        let body = r#"{"statusCode":400,"message":"El nombre ya existe","success":false,"data":null}"#;
        let err = decode_envelope::<Area>(400, false, body)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("El nombre ya existe".into()));
    }

    #[test]
    fn not_found_variants() {
        let err = decode_envelope::<Area>(404, false, "Not Found").unwrap_err();
        assert!(err.is_not_found());

        let body = r#"{"message":"Sin direcciones","success":false}"#;
        let envelope = decode_envelope::<Vec<Area>>(404, false, body).unwrap();
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.into_optional(), Ok(None));
    }

    #[test]
    fn undecodable_error_body() {
        let err = decode_envelope::<Area>(502, false, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                message: String::new()
            }
        );
    }

    #[test]
    fn malformed_success_body() {
        let err = decode_envelope::<Area>(200, true, "{not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
