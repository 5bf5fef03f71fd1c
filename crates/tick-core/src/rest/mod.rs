//! Supabase PostgREST client for row-level table access.
//!
//! Thin typed wrapper over the hosted `/rest/v1` endpoints: filtered
//! selects, inserts, updates, and deletes. Row visibility is enforced
//! server-side by the backend's row policies; this client only forwards
//! the caller's bearer token.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{compact_text, is_http_url};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Invalid data API configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Api(String),
}

pub type DataResult<T> = Result<T, DataError>;

/// Comparison operators supported by row filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

impl FilterOp {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gte => "gte",
            Self::Lte => "lte",
        }
    }
}

/// A single `column=op.value` criterion applied server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

impl TableFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn to_query_pair(&self) -> (String, String) {
        (
            self.column.clone(),
            format!("{}.{}", self.op.as_str(), self.value),
        )
    }
}

/// Server-side ordering for select queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOrder {
    pub column: String,
    pub descending: bool,
}

impl TableOrder {
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    #[must_use]
    pub fn to_query_value(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}.{direction}", self.column)
    }
}

#[derive(Debug, Clone)]
pub struct TableClient {
    rest_url: String,
    anon_key: String,
    client: Client,
}

impl TableClient {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>) -> DataResult<Self> {
        let rest_url = normalize_rest_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(DataError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            rest_url,
            anon_key,
            client: Client::builder().build()?,
        })
    }

    /// Fetch rows matching `filters`, optionally ordered server-side.
    pub async fn select<T: DeserializeOwned>(
        &self,
        access_token: Option<&str>,
        table: &str,
        filters: &[TableFilter],
        order: Option<&TableOrder>,
    ) -> DataResult<Vec<T>> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(filters.iter().map(TableFilter::to_query_pair));
        if let Some(order) = order {
            query.push(("order".to_string(), order.to_query_value()));
        }

        let request = self.authorized(
            self.client
                .get(self.table_url(table))
                .query(&query)
                .header("Accept", "application/json"),
            access_token,
        );

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<Vec<T>>().await?)
    }

    /// Insert a single row.
    pub async fn insert<T: Serialize>(
        &self,
        access_token: Option<&str>,
        table: &str,
        row: &T,
    ) -> DataResult<()> {
        let request = self.authorized(
            self.client
                .post(self.table_url(table))
                .header("Prefer", "return=minimal")
                .json(row),
            access_token,
        );
        expect_success(request).await
    }

    /// Patch the rows matching `filters` with the serialized fields.
    pub async fn update<T: Serialize>(
        &self,
        access_token: Option<&str>,
        table: &str,
        filters: &[TableFilter],
        patch: &T,
    ) -> DataResult<()> {
        let query = filters
            .iter()
            .map(TableFilter::to_query_pair)
            .collect::<Vec<_>>();
        let request = self.authorized(
            self.client
                .patch(self.table_url(table))
                .query(&query)
                .header("Prefer", "return=minimal")
                .json(patch),
            access_token,
        );
        expect_success(request).await
    }

    /// Delete the rows matching `filters`.
    pub async fn delete(
        &self,
        access_token: Option<&str>,
        table: &str,
        filters: &[TableFilter],
    ) -> DataResult<()> {
        let query = filters
            .iter()
            .map(TableFilter::to_query_pair)
            .collect::<Vec<_>>();
        let request = self.authorized(
            self.client
                .delete(self.table_url(table))
                .query(&query)
                .header("Prefer", "return=minimal"),
            access_token,
        );
        expect_success(request).await
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    /// Attach the anon key plus the caller's bearer token.
    ///
    /// Falls back to the anon key as bearer when no session token exists,
    /// which the backend treats as an anonymous request.
    fn authorized(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        request.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

}

async fn expect_success(request: RequestBuilder) -> DataResult<()> {
    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(DataError::Api(parse_api_error(status, &body)));
    }
    Ok(())
}

pub fn normalize_rest_url(url: &str) -> DataResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(DataError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(DataError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/rest/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/rest/v1"))
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorResponse {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<PostgrestErrorResponse>(body) {
        if let Some(message) = payload.message {
            let detail = payload.details.or(payload.hint);
            return match detail {
                Some(detail) => {
                    format!("{} ({}): {}", message.trim(), status.as_u16(), detail.trim())
                }
                None => format!("{} ({})", message.trim(), status.as_u16()),
            };
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}
