//! Context structures for notification templates.

use serde::Serialize;

/// Context data provided to notification templates.
///
/// Every field is optional; templates only reference what their message
/// needs. Unset fields are omitted from the template context entirely, so
/// `{% if field %}` checks behave as expected.
///
/// # Examples
///
/// ```
/// use messadmin_notify::NoticeContext;
///
/// let context = NoticeContext::for_mess("65f1c0", "Quick Bites")
///     .with_reason("Incomplete documents");
/// assert_eq!(context.mess_name.as_deref(), Some("Quick Bites"));
/// assert_eq!(context.reason.as_deref(), Some("Incomplete documents"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoticeContext {
    /// Identifier of the mess the message is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mess_id: Option<String>,

    /// Display name of the mess the message is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mess_name: Option<String>,

    /// Verification status label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Rejection reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Free-form detail, usually an error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Account email for authentication messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Number of items affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Number of items skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
}

impl NoticeContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context naming a specific mess.
    #[must_use]
    pub fn for_mess(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mess_id: Some(id.into()),
            mess_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Sets the status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the rejection reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the free-form detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the account email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the loaded and skipped counts.
    #[must_use]
    pub fn with_counts(mut self, count: usize, skipped: usize) -> Self {
        self.count = Some(count);
        self.skipped = Some(skipped);
        self
    }
}
