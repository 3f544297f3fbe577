//! HTTP client for the application services plus the state containers the
//! admin tool renders from.

pub mod provider;
pub mod state;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::api::{ApiResponse, PagedResult};
use crate::db::models::auth::{AuthenticateRequest, AuthenticateResult, RegisterRequest};
use crate::routes::APP_SERVICES_PREFIX;

pub use provider::ResourceProvider;
pub use state::{ResourceAction, ResourceState, reduce};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authenticated")]
    Unauthenticated,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Paging and filter parameters for a `GetList` call.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
    /// Aggregate-specific filters, already in camelCase.
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword".to_string(), keyword.clone()));
        }
        if let Some(skip) = self.skip_count {
            pairs.push(("skipCount".to_string(), skip.to_string()));
        }
        if let Some(take) = self.max_result_count {
            pairs.push(("maxResultCount".to_string(), take.to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

/// The five operations every aggregate answers, addressed by route name.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn create(&self, aggregate: &str, body: Value) -> ClientResult<Value>;
    async fn update(&self, aggregate: &str, id: Uuid, body: Value) -> ClientResult<Value>;
    async fn delete(&self, aggregate: &str, id: Uuid) -> ClientResult<()>;
    async fn get(&self, aggregate: &str, id: Uuid) -> ClientResult<Value>;
    async fn get_list(
        &self,
        aggregate: &str,
        query: &ListQuery,
    ) -> ClientResult<PagedResult<Value>>;
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchanges credentials for an access token and keeps it for later calls.
    pub async fn authenticate(
        &mut self,
        user_name_or_email: &str,
        password: &str,
    ) -> ClientResult<AuthenticateResult> {
        let body = AuthenticateRequest {
            user_name_or_email_address: user_name_or_email.to_string(),
            password: password.to_string(),
        };
        self.issue_token("Authenticate", &body).await
    }

    /// Creates an account and keeps the token issued for it.
    pub async fn register(
        &mut self,
        request: &RegisterRequest,
    ) -> ClientResult<AuthenticateResult> {
        self.issue_token("Register", request).await
    }

    async fn issue_token<B: serde::Serialize>(
        &mut self,
        action: &str,
        body: &B,
    ) -> ClientResult<AuthenticateResult> {
        let response = self
            .http
            .post(format!("{}/api/TokenAuth/{}", self.base_url, action))
            .json(body)
            .send()
            .await?;

        let result: AuthenticateResult = required(unwrap_envelope(response).await?)?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    fn request(
        &self,
        method: Method,
        aggregate: &str,
        action: &str,
    ) -> ClientResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::Unauthenticated)?;
        let url = format!("{}{}/{}/{}", self.base_url, APP_SERVICES_PREFIX, aggregate, action);
        Ok(self.http.request(method, url).bearer_auth(token))
    }
}

#[async_trait]
impl ResourceApi for ApiClient {
    async fn create(&self, aggregate: &str, body: Value) -> ClientResult<Value> {
        let response = self
            .request(Method::POST, aggregate, "Create")?
            .json(&body)
            .send()
            .await?;
        required(unwrap_envelope(response).await?)
    }

    async fn update(&self, aggregate: &str, id: Uuid, body: Value) -> ClientResult<Value> {
        let body = with_id(body, id)?;
        let response = self
            .request(Method::PUT, aggregate, "Update")?
            .json(&body)
            .send()
            .await?;
        required(unwrap_envelope(response).await?)
    }

    async fn delete(&self, aggregate: &str, id: Uuid) -> ClientResult<()> {
        let response = self
            .request(Method::DELETE, aggregate, "Delete")?
            .query(&[("id", id.to_string())])
            .send()
            .await?;
        unwrap_envelope::<Value>(response).await?;
        Ok(())
    }

    async fn get(&self, aggregate: &str, id: Uuid) -> ClientResult<Value> {
        let response = self
            .request(Method::GET, aggregate, "Get")?
            .query(&[("id", id.to_string())])
            .send()
            .await?;
        required(unwrap_envelope(response).await?)
    }

    async fn get_list(
        &self,
        aggregate: &str,
        query: &ListQuery,
    ) -> ClientResult<PagedResult<Value>> {
        let response = self
            .request(Method::GET, aggregate, "GetList")?
            .query(&query.to_pairs())
            .send()
            .await?;
        required(unwrap_envelope(response).await?)
    }
}

/// Reads the response envelope, turning a failure envelope or a non-JSON
/// error body into [`ClientError::Api`].
async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> ClientResult<Option<T>> {
    let status = response.status();
    let body = response.text().await?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => return Err(ClientError::InvalidResponse(e.to_string())),
        Err(_) => {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
    };

    if !status.is_success() || !envelope.success {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope.error_message().to_string(),
        });
    }
    Ok(envelope.data)
}

fn required<T>(data: Option<T>) -> ClientResult<T> {
    data.ok_or_else(|| ClientError::InvalidResponse("Response has no data".to_string()))
}

/// Update bodies carry the target id next to the fields.
fn with_id(body: Value, id: Uuid) -> ClientResult<Value> {
    match body {
        Value::Object(mut fields) => {
            fields.insert("id".to_string(), Value::String(id.to_string()));
            Ok(Value::Object(fields))
        }
        _ => Err(ClientError::InvalidInput("Update body must be a JSON object".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_uses_wire_names() {
        let query = ListQuery {
            keyword: Some("alpha".to_string()),
            skip_count: Some(20),
            max_result_count: Some(10),
            filters: vec![("teamId".to_string(), "x".to_string())],
        };
        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("keyword".to_string(), "alpha".to_string()));
        assert_eq!(pairs[1], ("skipCount".to_string(), "20".to_string()));
        assert_eq!(pairs[2], ("maxResultCount".to_string(), "10".to_string()));
        assert_eq!(pairs[3].0, "teamId");
    }

    #[test]
    fn update_body_gets_id() {
        let id = Uuid::new_v4();
        let body = with_id(serde_json::json!({ "name": "Alpha" }), id).unwrap();
        assert_eq!(body["id"], id.to_string());
        assert_eq!(body["name"], "Alpha");
        assert!(with_id(serde_json::json!([1, 2]), id).is_err());
    }

    #[tokio::test]
    async fn calls_without_token_fail_fast() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.get("Team", Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthenticated));
    }
}
