use serde::{Deserialize, Serialize};

/// Envelope wrapping every HTTP response body.
#[derive(Serialize, Deserialize, Debug)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, message: &str, field: Option<String>, error_code: &str) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, message, None, "BAD_REQUEST")
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, message, None, "UNAUTHORIZED")
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, message, None, "FORBIDDEN")
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, message, None, "NOT_FOUND")
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, message, field, error_code)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, message, None, "INTERNAL_ERROR")
    }

    /// First error detail message, falling back to the top-level message.
    pub fn error_message(&self) -> &str {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|detail| detail.message.as_str())
            .unwrap_or(&self.message)
    }
}

/// One page of a list query together with the unpaged row count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn new(total_count: i64, items: Vec<T>) -> Self {
        Self { total_count, items }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct IdQuery {
    pub id: uuid::Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_omits_data() {
        let response = ApiResponse::<()>::not_found("Team not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 404);
        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0]["code"], "NOT_FOUND");
        assert_eq!(response.error_message(), "Team not found");
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResponse<T> {
        serde_json::from_str(body).unwrap()
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn envelope_decodes_payload_without_default() {
        let ok: ApiResponse<Named> = decode(
            r#"{"success":true,"code":200,"message":"ok","data":{"name":"Alpha"},"timestamp":"t"}"#,
        );
        assert_eq!(
            ok.data,
            Some(Named {
                name: "Alpha".to_string()
            })
        );

        let empty: ApiResponse<Named> =
            decode(r#"{"success":true,"code":200,"message":"ok","timestamp":"t"}"#);
        assert!(empty.data.is_none());
    }

    #[test]
    fn paged_result_uses_camel_case() {
        let page = PagedResult::new(3, vec![1, 2]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(page.map(|n| n * 10).items, vec![10, 20]);
    }
}
