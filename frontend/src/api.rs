//! HTTP client for the finance API.
//!
//! One method per endpoint, one request per call. Response bodies are read as
//! JSON whatever the status code: a body with an `error` field becomes
//! [ApiError::Rejected], anything else is decoded into the expected type.

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config,
    error::{ApiError, ApiResult},
    models::{AuthResponse, Credentials, NewTransaction, Transaction, TransactionList},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(config::api_base_url())
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn signup(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let request = Request::post(&self.url("/api/auth/signup"))
            .header("Content-Type", "application/json")
            .json(&Credentials { email, password })?;
        let text = request.send().await?.text().await?;
        decode_body(&text)
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let request = Request::post(&self.url("/api/auth/login"))
            .header("Content-Type", "application/json")
            .json(&Credentials { email, password })?;
        let text = request.send().await?.text().await?;
        decode_body(&text)
    }

    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        let builder = with_bearer(Request::post(&self.url("/api/auth/logout")), token);
        let text = builder.send().await?.text().await?;
        decode_ack(&text)
    }

    pub async fn list_transactions(&self, token: &str) -> ApiResult<Vec<Transaction>> {
        let builder = with_bearer(Request::get(&self.url("/api/transactions")), token);
        let text = builder.send().await?.text().await?;
        let list: TransactionList = decode_body(&text)?;
        log::debug!("Fetched {} transactions", list.transactions.len());
        Ok(list.transactions)
    }

    pub async fn create_transaction(
        &self,
        token: &str,
        transaction: &NewTransaction,
    ) -> ApiResult<Transaction> {
        let request = with_bearer(Request::post(&self.url("/api/transactions")), token)
            .header("Content-Type", "application/json")
            .json(transaction)?;
        let text = request.send().await?.text().await?;
        decode_body(&text)
    }

    pub async fn delete_transaction(&self, token: &str, id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/api/transactions/{id}"));
        let builder = with_bearer(Request::delete(&url), token);
        let text = builder.send().await?.text().await?;
        decode_ack(&text)
    }
}

fn with_bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

/// Returns the server's error message if `body` reports one.
fn rejection(body: &Value) -> Option<String> {
    let error = body.as_object()?.get("error")?;
    match error {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(fields) => Some(
            fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
        ),
        other => Some(other.to_string()),
    }
}

/// Turns a parsed response body into the expected type or an error.
pub fn interpret<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    if let Some(message) = rejection(&body) {
        return Err(ApiError::Rejected(message));
    }
    Ok(serde_json::from_value(body)?)
}

fn decode_body<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let body: Value = serde_json::from_str(text)?;
    interpret(body)
}

/// For endpoints whose success body is `{}`: an empty or non-JSON body is
/// still a success, only an explicit `error` field is a failure.
fn decode_ack(text: &str) -> ApiResult<()> {
    match serde_json::from_str::<Value>(text) {
        Ok(body) => match rejection(&body) {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Ok(()),
        },
        Err(_) => Ok(()),
    }
}
