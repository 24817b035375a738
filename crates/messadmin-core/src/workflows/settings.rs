//! Admin settings: platform charges and password changes.

use crate::api::admin::{AdminApi, ChangePasswordRequest, PlatformConfig};
use crate::error::{AdminError, Result, ValidationErrors};

/// Returns `true` for `digits[.digits]` input, including a partial entry
/// such as `"12."`.
pub fn is_numeric_input(value: &str) -> bool {
    let mut parts = value.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    whole.chars().all(|c| c.is_ascii_digit()) && fraction.chars().all(|c| c.is_ascii_digit())
}

/// GST and platform fee as typed by the admin, in percent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConfigForm {
    pub gst: String,
    pub platform_fee: String,
}

impl PlatformConfigForm {
    pub fn new(gst: impl Into<String>, platform_fee: impl Into<String>) -> Self {
        Self {
            gst: gst.into(),
            platform_fee: platform_fee.into(),
        }
    }

    /// Validates both fields and parses them into a [`PlatformConfig`].
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<PlatformConfig> {
        let mut errors = ValidationErrors::new();
        let gst = parse_percent(&mut errors, "gst", "GST", &self.gst);
        let platform_fee =
            parse_percent(&mut errors, "platform_fee", "Platform fee", &self.platform_fee);

        match (gst, platform_fee) {
            (Some(gst), Some(platform_fee)) => Ok(PlatformConfig { gst, platform_fee }),
            _ => Err(AdminError::Validation(errors)),
        }
    }
}

fn parse_percent(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, format!("{label} is required"));
        return None;
    }

    let digits = value.strip_prefix('-').unwrap_or(value);
    if !is_numeric_input(digits) {
        errors.push(field, format!("{label} must be a number"));
        return None;
    }
    match value.parse::<f64>() {
        Ok(parsed) if parsed < 0.0 => {
            errors.push(field, format!("{label} cannot be negative"));
            None
        }
        // `-0` is zero.
        Ok(parsed) if parsed.is_finite() => Some(parsed.abs()),
        _ => {
            errors.push(field, format!("{label} must be a number"));
            None
        }
    }
}

/// Validates `form` and updates the platform charges.
///
/// # Errors
///
/// Returns `AdminError::Validation` without a network call, or the
/// adapter's error.
#[tracing::instrument(skip_all)]
pub async fn update_platform_config(
    api: &dyn AdminApi,
    form: &PlatformConfigForm,
) -> Result<PlatformConfig> {
    let config = form.validate()?;
    api.update_platform_config(&config).await?;
    tracing::info!(gst = config.gst, platform_fee = config.platform_fee, "platform config updated");
    Ok(config)
}

/// Minimum length of a new admin password.
pub const MIN_NEW_PASSWORD_LEN: usize = 8;

/// Password change form input.
#[derive(Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for ChangePasswordForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordForm").finish_non_exhaustive()
    }
}

impl ChangePasswordForm {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Validates the form and builds the password change request.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<ChangePasswordRequest> {
        let mut errors = ValidationErrors::new();

        if self.current_password.is_empty() {
            errors.push("current_password", "Current password is required");
        }
        if self.new_password.is_empty() {
            errors.push("new_password", "New password is required");
        } else if self.new_password.chars().count() < MIN_NEW_PASSWORD_LEN {
            errors.push(
                "new_password",
                format!("Password must be at least {MIN_NEW_PASSWORD_LEN} characters"),
            );
        }
        if self.new_password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }

        errors.into_result()?;
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

/// Validates `form` and changes the admin password.
///
/// # Errors
///
/// Returns `AdminError::Validation` without a network call, or the
/// adapter's error.
#[tracing::instrument(skip_all)]
pub async fn change_password(api: &dyn AdminApi, form: &ChangePasswordForm) -> Result<()> {
    let request = form.validate()?;
    api.change_password(&request).await?;
    tracing::info!("admin password changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_input() {
        assert!(is_numeric_input("18"));
        assert!(is_numeric_input("2.5"));
        assert!(is_numeric_input("12."));
        assert!(!is_numeric_input("1.2.3"));
        assert!(!is_numeric_input("1e3"));
    }

    #[test]
    fn test_validate_parses_values() {
        let config = PlatformConfigForm::new("18", "2.5").validate().unwrap();
        assert_eq!(config.gst, 18.0);
        assert_eq!(config.platform_fee, 2.5);
    }

    #[test]
    fn test_validate_messages() {
        let Err(AdminError::Validation(errors)) = PlatformConfigForm::new("", "-1").validate()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("gst"), Some("GST is required"));
        assert_eq!(errors.get("platform_fee"), Some("Platform fee cannot be negative"));

        let Err(AdminError::Validation(errors)) = PlatformConfigForm::new("abc", ".").validate()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("gst"), Some("GST must be a number"));
        assert_eq!(errors.get("platform_fee"), Some("Platform fee must be a number"));
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        let config = PlatformConfigForm::new("-0", "-0.0").validate().unwrap();
        assert_eq!(config.gst, 0.0);
        assert!(config.gst.is_sign_positive());
        assert_eq!(config.platform_fee, 0.0);

        let Err(AdminError::Validation(errors)) = PlatformConfigForm::new("-0.5", "--1").validate()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("gst"), Some("GST cannot be negative"));
        assert_eq!(errors.get("platform_fee"), Some("Platform fee must be a number"));
    }

    #[test]
    fn test_change_password_messages() {
        let Err(AdminError::Validation(errors)) = ChangePasswordForm::default().validate() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("current_password"), Some("Current password is required"));
        assert_eq!(errors.get("new_password"), Some("New password is required"));
        assert_eq!(errors.get("confirm_password"), None);

        let Err(AdminError::Validation(errors)) =
            ChangePasswordForm::new("old-secret", "short", "shorter").validate()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("current_password"), None);
        assert_eq!(
            errors.get("new_password"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
    }

    #[test]
    fn test_change_password_valid_form() {
        let form = ChangePasswordForm::new("old-secret", "new-secret-1", "new-secret-1");
        let request = form.validate().unwrap();
        assert_eq!(request.current_password, "old-secret");
        assert_eq!(request.new_password, "new-secret-1");
        assert!(!format!("{form:?}").contains("secret"));
    }
}
