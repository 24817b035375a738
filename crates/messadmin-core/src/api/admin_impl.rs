//! HTTP implementation of the admin adapter.

use crate::api::admin::{
    AdminApi, ChangePasswordRequest, LoginRequest, PlatformConfig, RegisterRequest,
};
use crate::api::http::HttpTransport;
use crate::error::Result;
use async_trait::async_trait;

/// Admin adapter backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    http: HttpTransport,
}

impl HttpAdminApi {
    /// Creates the adapter on top of a shared transport.
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn login(&self, request: &LoginRequest) -> Result<()> {
        self.http
            .post_json(&["admin", "login"], request)
            .await
            .map(|_| ())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.http
            .post_json(&["admin", "register"], request)
            .await
            .map(|_| ())
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.http
            .patch_json(&["admin", "password"], request)
            .await
            .map(|_| ())
    }

    async fn update_platform_config(&self, config: &PlatformConfig) -> Result<()> {
        self.http
            .patch_json(&["admin", "config"], config)
            .await
            .map(|_| ())
    }
}
