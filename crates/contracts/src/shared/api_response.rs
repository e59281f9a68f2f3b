//! Uniform response envelope of the ERP backend:
//! `{ "statusCode": 200, "message": "...", "success": true, "data": ... }`

use serde::{Deserialize, Serialize};

use super::error::{ApiError, GENERIC_ERROR_MESSAGE};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status_code: u16,
    pub message: Option<String>,
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status_code: 200,
            message: None,
            success: true,
            data: Some(data),
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: Some(message.into()),
            success: false,
            data: None,
        }
    }

    fn rejection(self) -> ApiError {
        if self.status_code == 404 {
            return ApiError::NotFound;
        }
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        ApiError::Rejected(message)
    }

    /// Payload of a successful response.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data.ok_or(ApiError::EmptyPayload)
    }

    /// Like [`into_result`](Self::into_result), but "not found" means no data.
    pub fn into_optional(self) -> Result<Option<T>, ApiError> {
        if !self.success {
            return match self.rejection() {
                ApiError::NotFound => Ok(None),
                other => Err(other),
            };
        }
        Ok(self.data)
    }

    /// Success flag only; the payload (if any) is discarded.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(self.rejection())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn decodes_success_envelope() {
        let json = r#"{"statusCode":200,"message":"OK","success":true,"data":{"id":7}}"#;
        let resp: ApiResponse<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result().unwrap(), Item { id: 7 });
    }

    #[test]
    fn missing_data_on_success() {
        let json = r#"{"statusCode":200,"success":true,"data":null}"#;
        let resp: ApiResponse<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.clone().into_result(), Err(ApiError::EmptyPayload));
        assert_eq!(resp.into_unit(), Ok(()));
    }

    #[test]
    fn failure_carries_server_message() {
        let json = r#"{"statusCode":400,"message":"Nombre duplicado","success":false}"#;
        let resp: ApiResponse<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_result(),
            Err(ApiError::Rejected("Nombre duplicado".into()))
        );

        let resp: ApiResponse<Item> = ApiResponse::failure(500, "");
        assert_eq!(
            resp.into_unit(),
            Err(ApiError::Rejected(GENERIC_ERROR_MESSAGE.into()))
        );
    }

    #[test]
    fn not_found_is_no_data_for_optional_resources() {
        let resp: ApiResponse<Item> = ApiResponse::failure(404, "No existe");
        assert_eq!(resp.clone().into_optional(), Ok(None));
        assert_eq!(resp.into_result(), Err(ApiError::NotFound));

        let resp: ApiResponse<Item> = ApiResponse::failure(500, "boom");
        assert!(resp.into_optional().is_err());
    }

    #[test]
    fn ok_envelope_round_trips_through_json() {
        let json = serde_json::to_string(&ApiResponse::ok(vec![3_i64, 4])).unwrap();
        assert!(json.contains("\"statusCode\":200"));
        let resp: ApiResponse<Vec<i64>> = serde_json::from_str(&json).unwrap();
        assert_eq!(resp.into_optional(), Ok(Some(vec![3, 4])));
    }

    #[test]
    fn list_payloads() {
        let json = r#"{"statusCode":200,"success":true,"data":[{"id":1},{"id":2}]}"#;
        let resp: ApiResponse<Vec<Item>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result().unwrap().len(), 2);
    }
}
