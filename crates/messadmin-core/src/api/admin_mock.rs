//! Mock admin adapter for testing.

use crate::api::admin::{
    AdminApi, ChangePasswordRequest, LoginRequest, PlatformConfig, RegisterRequest,
};
use crate::api::mess_mock::MockFailure;
use crate::error::{AdminError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A call received by [`MockAdminApi`]. Passwords are not retained.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCall {
    /// `POST /admin/login`
    Login {
        /// Submitted email.
        email: String,
    },

    /// `POST /admin/register`
    Register {
        /// Submitted name.
        name: String,
        /// Submitted contact number.
        contact: String,
        /// Submitted email.
        email: String,
    },

    /// `PATCH /admin/password`
    ChangePassword,

    /// `PATCH /admin/config`
    UpdateConfig(PlatformConfig),
}

/// Mock admin adapter that records calls and fails on demand.
#[derive(Debug, Clone, Default)]
pub struct MockAdminApi {
    /// Failure returned by every call while set.
    failure: Arc<Mutex<Option<(MockFailure, Option<String>)>>>,
    /// History of received calls.
    history: Arc<Mutex<Vec<AdminCall>>>,
}

impl MockAdminApi {
    /// Creates a mock where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail, optionally with a server message.
    pub fn fail_with(&self, failure: MockFailure, message: Option<&str>) {
        *self.failure.lock().unwrap() = Some((failure, message.map(str::to_string)));
    }

    /// Returns the history of received calls.
    pub fn history(&self) -> Vec<AdminCall> {
        self.history.lock().unwrap().clone()
    }

    fn record(&self, call: AdminCall) -> Result<()> {
        self.history.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some((MockFailure::Status(status), message)) => {
                Err(AdminError::HttpStatus { status, message })
            }
            Some((MockFailure::Transport, _)) => {
                Err(AdminError::Transport("mock transport failure".to_string()))
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn login(&self, request: &LoginRequest) -> Result<()> {
        self.record(AdminCall::Login {
            email: request.email.clone(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.record(AdminCall::Register {
            name: request.name.clone(),
            contact: request.contact.clone(),
            email: request.email.clone(),
        })
    }

    async fn change_password(&self, _request: &ChangePasswordRequest) -> Result<()> {
        self.record(AdminCall::ChangePassword)
    }

    async fn update_platform_config(&self, config: &PlatformConfig) -> Result<()> {
        self.record(AdminCall::UpdateConfig(*config))
    }
}
