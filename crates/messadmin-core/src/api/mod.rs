//! REST API adapters and registry.
//!
//! The backend is an external collaborator reached only through the
//! [`mess::MessApi`] and [`admin::AdminApi`] traits. Real implementations
//! speak HTTP through a shared [`http::HttpTransport`]; the mock
//! implementations record calls and return programmed outcomes for tests.

pub mod admin;
pub mod admin_impl;
pub mod admin_mock;
pub mod http;
pub mod mess;
pub mod mess_impl;
pub mod mess_mock;

use crate::config::AdminConfig;
use crate::error::Result;
use std::sync::Arc;

/// Registry holding the adapters a runtime talks to.
///
/// Adapters are shared trait objects so that a front end can move clones
/// into spawned request tasks.
#[derive(Clone)]
pub struct ApiRegistry {
    /// Mess listing and verification endpoints.
    pub mess: Arc<dyn mess::MessApi>,

    /// Admin account and platform configuration endpoints.
    pub admin: Arc<dyn admin::AdminApi>,
}

impl ApiRegistry {
    /// Creates a registry from the provided adapters.
    pub fn new(mess: Arc<dyn mess::MessApi>, admin: Arc<dyn admin::AdminApi>) -> Self {
        Self { mess, admin }
    }

    /// Creates HTTP adapters for `config.api_base_url`, sharing one client.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transport` if the HTTP client cannot be built.
    pub fn http(config: &AdminConfig) -> Result<Self> {
        let transport = http::HttpTransport::new(config)?;
        Ok(Self::new(
            Arc::new(mess_impl::HttpMessApi::new(transport.clone())),
            Arc::new(admin_impl::HttpAdminApi::new(transport)),
        ))
    }
}

impl std::fmt::Debug for ApiRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRegistry")
            .field("mess", &"Arc<dyn MessApi>")
            .field("admin", &"Arc<dyn AdminApi>")
            .finish()
    }
}
