//! Runtime for the mess admin console.
//!
//! `AdminRuntime` ties configuration, the API adapters and the notification
//! templates together. Workflows stay free of presentation concerns: the
//! runtime runs them and, separately, turns their results into
//! [`Notification`]s for whichever front end is driving it.

use crate::api::ApiRegistry;
use crate::api::admin::PlatformConfig;
use crate::config::AdminConfig;
use crate::error::{AdminError, Result};
use crate::model::{MessRecord, VerificationStatus};
use crate::state::MessViewState;
use crate::view::MessDetailView;
use crate::workflows::{
    self, ChangePasswordForm, Decision, FetchReport, FetchTrigger, LoginForm,
    PlatformConfigForm, RegisterForm, VerificationOutcome,
};
use messadmin_notify::{NoticeContext, NoticeEngine, NoticeLevel, NoticeManager, Notification};
use serde::Serialize;

/// Operation an error came from, used to pick the failure notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    Fetch,
    Verify {
        /// Mess identifier.
        id: &'a str,
        /// Mess name, falling back to the id when unknown.
        name: &'a str,
    },
    Login,
    Register,
    ChangePassword,
    PlatformConfig,
}

/// Mess admin runtime.
///
/// # Examples
///
/// ```no_run
/// use messadmin_core::{AdminConfig, AdminRuntime, FetchTrigger, MessViewState};
///
/// # async fn demo() -> messadmin_core::Result<()> {
/// let config = AdminConfig::from_base_url("http://localhost:3500/api/v1")?;
/// let runtime = AdminRuntime::new(config)?;
///
/// let mut state = MessViewState::new();
/// if let Some(report) = runtime.fetch(&mut state, FetchTrigger::Mount).await? {
///     println!("{}", runtime.notice_for_fetch(&report));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AdminRuntime {
    /// Console configuration.
    pub config: AdminConfig,

    /// Backend adapters.
    pub apis: ApiRegistry,

    /// Notification templates.
    pub notices: NoticeManager,
}

impl AdminRuntime {
    /// Creates a runtime talking HTTP to `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the template
    /// override directory is missing or holds a broken template.
    pub fn new(config: AdminConfig) -> Result<Self> {
        let apis = ApiRegistry::http(&config)?;
        Self::with_apis(config, apis)
    }

    /// Creates a runtime using the given adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification templates cannot be loaded.
    pub fn with_apis(config: AdminConfig, apis: ApiRegistry) -> Result<Self> {
        let notices = match &config.template_dir {
            Some(dir) => NoticeManager::new(dir.clone())?,
            None => NoticeManager::builtin()?,
        };
        tracing::debug!(
            api_base_url = %config.api_base_url,
            template_dir = ?config.template_dir,
            "admin runtime ready"
        );
        Ok(Self {
            config,
            apis,
            notices,
        })
    }

    /// Loads the mess list into `state`; see [`workflows::fetch_messes`].
    ///
    /// # Errors
    ///
    /// Returns the adapter's error.
    pub async fn fetch(
        &self,
        state: &mut MessViewState,
        trigger: FetchTrigger,
    ) -> Result<Option<FetchReport>> {
        workflows::fetch_messes(state, self.apis.mess.as_ref(), trigger).await
    }

    /// Applies a decision; see [`workflows::apply_decision`].
    ///
    /// Rejections without an explicit reason carry the configured default.
    ///
    /// # Errors
    ///
    /// Returns the workflow's or the adapter's error.
    pub async fn apply(
        &self,
        state: &mut MessViewState,
        id: &str,
        decision: Decision,
        reason: Option<&str>,
    ) -> Result<VerificationOutcome> {
        let reason = self.rejection_reason(reason);
        workflows::apply_decision(state, self.apis.mess.as_ref(), id, decision, reason).await
    }

    /// Returns `reason` when it is non-blank, else the configured default.
    pub fn rejection_reason<'a>(&'a self, reason: Option<&'a str>) -> &'a str {
        reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(self.config.default_rejection_reason.as_str())
    }

    /// # Errors
    ///
    /// Returns a validation error or the adapter's error.
    pub async fn login(&self, form: &LoginForm) -> Result<()> {
        workflows::login(self.apis.admin.as_ref(), form).await
    }

    /// # Errors
    ///
    /// Returns a validation error or the adapter's error.
    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        workflows::register(self.apis.admin.as_ref(), form).await
    }

    /// # Errors
    ///
    /// Returns a validation error or the adapter's error.
    pub async fn change_password(&self, form: &ChangePasswordForm) -> Result<()> {
        workflows::change_password(self.apis.admin.as_ref(), form).await
    }

    /// # Errors
    ///
    /// Returns a validation error or the adapter's error.
    pub async fn update_platform_config(&self, form: &PlatformConfigForm) -> Result<PlatformConfig> {
        workflows::update_platform_config(self.apis.admin.as_ref(), form).await
    }

    /// Renders `template` into a notification.
    ///
    /// A template that fails to render degrades to a plain message naming
    /// the failure; notifications never abort the caller.
    pub fn notice<T: Serialize>(&self, level: NoticeLevel, template: &str, ctx: &T) -> Notification {
        match self.notices.notify(level, template, ctx) {
            Ok(notice) => notice,
            Err(e) => {
                tracing::warn!(template, error = %e, "notification template failed");
                Notification::new(level, format!("{template}: {e}"))
            }
        }
    }

    /// Success notification for a confirmed decision.
    pub fn notice_for_outcome(&self, outcome: &VerificationOutcome) -> Notification {
        let ctx = NoticeContext::for_mess(&outcome.id, &outcome.mess_name)
            .with_status(outcome.status.as_str());
        match (outcome.status, &outcome.rejection_reason) {
            (VerificationStatus::Rejected, Some(reason)) => {
                self.notice(NoticeLevel::Success, "rejected", &ctx.with_reason(reason))
            }
            (VerificationStatus::Rejected, None) => {
                self.notice(NoticeLevel::Success, "rejected", &ctx)
            }
            _ => self.notice(NoticeLevel::Success, "verified", &ctx),
        }
    }

    /// Info notification summarising a completed fetch.
    pub fn notice_for_fetch(&self, report: &FetchReport) -> Notification {
        let ctx = NoticeContext::new().with_counts(report.loaded, report.skipped);
        self.notice(NoticeLevel::Info, "fetch_ok", &ctx)
    }

    /// Error notification for a failed operation.
    pub fn notice_for_error(&self, operation: Operation<'_>, error: &AdminError) -> Notification {
        let level = NoticeLevel::Error;
        match error {
            AdminError::Validation(errors) => self.notice(
                level,
                "validation_failed",
                &NoticeContext::new().with_detail(errors.to_string()),
            ),
            AdminError::MessNotFound(id) => {
                self.notice(level, "mess_not_found", &NoticeContext::for_mess(id, id))
            }
            AdminError::ActionInFlight(id) => self.notice(
                level,
                "action_in_flight",
                &NoticeContext::for_mess(id, operation_name(operation, id)),
            ),
            AdminError::InvalidTransition { id, from, .. } => self.notice(
                level,
                "invalid_transition",
                &NoticeContext::for_mess(id, operation_name(operation, id)).with_status(from),
            ),
            other => {
                let detail = error_detail(other);
                match operation {
                    Operation::Fetch => self.notice(
                        level,
                        "fetch_failed",
                        &NoticeContext::new().with_detail(detail),
                    ),
                    Operation::Verify { id, name } => self.notice(
                        level,
                        "verify_failed",
                        &NoticeContext::for_mess(id, name).with_detail(detail),
                    ),
                    Operation::PlatformConfig => self.notice(
                        level,
                        "config_failed",
                        &NoticeContext::new().with_detail(detail),
                    ),
                    Operation::Login | Operation::Register | Operation::ChangePassword => {
                        self.notice(
                            level,
                            "request_failed",
                            &NoticeContext::new().with_detail(detail),
                        )
                    }
                }
            }
        }
    }

    /// Renders the full detail view of `record`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Notice` if the detail template fails.
    pub fn render_detail(&self, record: &MessRecord) -> Result<String> {
        let view = MessDetailView::from_record(record);
        Ok(self.notices.render("mess_detail", &view)?.trim_end().to_string())
    }
}

fn operation_name<'a>(operation: Operation<'a>, fallback: &'a str) -> &'a str {
    match operation {
        Operation::Verify { name, .. } => name,
        _ => fallback,
    }
}

/// Short user-facing detail for a failure, preferring the server's message.
fn error_detail(error: &AdminError) -> String {
    match error {
        AdminError::HttpStatus {
            message: Some(message),
            ..
        } => message.clone(),
        AdminError::HttpStatus { status, .. } => format!("server responded with status {status}"),
        AdminError::Transport(_) => "could not reach the server".to_string(),
        other => other.to_string(),
    }
}
