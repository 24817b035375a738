//! HTTP implementation of the mess adapter.

use crate::api::http::HttpTransport;
use crate::api::mess::{MessApi, UpdateRequest};
use crate::error::{AdminError, Result};
use crate::model::{MessBatch, decode_mess_list};
use async_trait::async_trait;
use serde_json::Value;

/// Mess adapter backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpMessApi {
    http: HttpTransport,
}

impl HttpMessApi {
    /// Creates the adapter on top of a shared transport.
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessApi for HttpMessApi {
    async fn fetch_all(&self) -> Result<MessBatch> {
        let body = self.http.get(&["mess", "all"]).await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AdminError::Protocol(format!("mess list is not valid json: {e}")))?;
        decode_mess_list(value)
    }

    async fn update_status(&self, id: &str, request: &UpdateRequest) -> Result<()> {
        self.http
            .patch_json(&["mess", "update", id], request)
            .await
            .map(|_| ())
    }
}
