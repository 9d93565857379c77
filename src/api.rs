// HTTP client for the banking backend
//
// One request per call; no retry or caching. Non-2xx answers become
// `ApiError::Rejected` carrying the backend's `detail` field when readable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    Account, Customer, NewAccount, NewCustomer, Receipt, TransactionKind, TransactionRequest,
    TransferRequest,
};

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend rejected request with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    /// 2xx answer whose body is not what the endpoint promises.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message from the backend, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Backend operations used by the dashboard.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait BankApi: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;

    /// `customer_id = None` lists every account.
    async fn list_accounts(&self, customer_id: Option<&str>) -> Result<Vec<Account>, ApiError>;

    /// Any 2xx counts as created, whatever the body looks like.
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Receipt, ApiError>;

    async fn create_account(&self, account: &NewAccount) -> Result<Receipt, ApiError>;

    /// Deposit or withdraw against a single account.
    async fn transact(
        &self,
        kind: TransactionKind,
        account_id: &str,
        request: &TransactionRequest,
    ) -> Result<Receipt, ApiError>;

    async fn transfer(&self, request: &TransferRequest) -> Result<Receipt, ApiError>;
}

/// reqwest-backed [`BankApi`] rooted at a base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    /// Build a client for `base_url`. `timeout = None` leaves requests unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "GET");
        let response = self.client.get(&url).query(query).send().await?;
        read_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Receipt, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "POST");
        let response = self.client.post(&url).query(query).json(body).send().await?;
        read_receipt(response).await
    }
}

#[async_trait]
impl BankApi for ApiClient {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_json("/api/customers", &[]).await
    }

    async fn list_accounts(&self, customer_id: Option<&str>) -> Result<Vec<Account>, ApiError> {
        match customer_id {
            Some(id) if !id.is_empty() => {
                self.get_json("/api/accounts", &[("customer_id", id)]).await
            }
            _ => self.get_json("/api/accounts", &[]).await,
        }
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Receipt, ApiError> {
        self.post_json("/api/customers", &[], customer).await
    }

    async fn create_account(&self, account: &NewAccount) -> Result<Receipt, ApiError> {
        self.post_json("/api/accounts", &[], account).await
    }

    async fn transact(
        &self,
        kind: TransactionKind,
        account_id: &str,
        request: &TransactionRequest,
    ) -> Result<Receipt, ApiError> {
        let path = format!("/api/transactions/{}", kind.as_str());
        self.post_json(&path, &[("account_id", account_id)], request)
            .await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<Receipt, ApiError> {
        self.post_json("/api/transactions/transfer", &[], request)
            .await
    }
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let detail = extract_detail(&body);
        warn!(status = status.as_u16(), ?detail, "backend rejected request");
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(body.to_vec())
}

/// List endpoints: the body must decode into `T`.
async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = read_body(response).await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Mutations: the status decides. The body is kept as-is for logging.
async fn read_receipt(response: reqwest::Response) -> Result<Receipt, ApiError> {
    let body = read_body(response).await?;
    Ok(receipt_from_body(&body))
}

fn receipt_from_body(body: &[u8]) -> Receipt {
    if body.is_empty() {
        return Receipt::default();
    }
    match serde_json::from_slice(body) {
        Ok(value) => Receipt(value),
        Err(_) => Receipt(Value::String(String::from_utf8_lossy(body).into_owned())),
    }
}

/// Read the `detail` field from an error body.
///
/// Strings are taken verbatim. FastAPI validation lists become their `msg`
/// entries joined by `"; "`. Other JSON values are rendered as JSON text.
/// Falsy values (`""`, `0`, `false`, `null`) count as absent.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(Value::Array(items.clone()).to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}
