//! Admin login and registration.
//!
//! Forms are validated field by field before anything is sent, with the
//! same inline messages the registration page shows.

use crate::api::admin::{AdminApi, LoginRequest, RegisterRequest};
use crate::error::{Result, ValidationErrors};

/// Maximum number of digits accepted in the contact field.
pub const CONTACT_DIGITS: usize = 10;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum name length for new accounts.
pub const MIN_NAME_LEN: usize = 2;

/// Returns `true` for `local@domain.tld`-shaped input without whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // A dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Keeps only the digits of `input`.
///
/// Returns `None` when the result would exceed [`CONTACT_DIGITS`]; the
/// caller should then keep its previous value.
pub fn sanitize_contact(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    (digits.len() <= CONTACT_DIGITS).then_some(digits)
}

/// Login form input.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validates the form and builds the login request.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<LoginRequest> {
        let email = self.email.trim();
        let mut errors = ValidationErrors::new();

        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.push("email", "Invalid email format");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.into_result()?;
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration form input.
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("contact", &self.contact)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl RegisterForm {
    /// Replaces the contact with the digits of `input`.
    ///
    /// Input with more than [`CONTACT_DIGITS`] digits is ignored and
    /// `false` is returned.
    pub fn set_contact(&mut self, input: &str) -> bool {
        match sanitize_contact(input) {
            Some(digits) => {
                self.contact = digits;
                true
            }
            None => false,
        }
    }

    /// Validates a single field, returning its inline message if invalid.
    ///
    /// Unknown field names are always valid.
    pub fn validate_field(field: &str, value: &str) -> Option<&'static str> {
        match field {
            "name" if value.trim().chars().count() < MIN_NAME_LEN => {
                Some("Name must be at least 2 characters")
            }
            "contact"
                if value.len() != CONTACT_DIGITS || !value.chars().all(|c| c.is_ascii_digit()) =>
            {
                Some("Contact must be 10 digits")
            }
            "email" if !is_valid_email(value.trim()) => Some("Invalid email format"),
            "password" if value.chars().count() < MIN_PASSWORD_LEN => {
                Some("Password must be at least 6 characters")
            }
            _ => None,
        }
    }

    /// Validates all fields and builds the registration request.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<RegisterRequest> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("name", &self.name),
            ("contact", &self.contact),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if let Some(message) = Self::validate_field(field, value) {
                errors.push(field, message);
            }
        }

        errors.into_result()?;
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            contact: self.contact.clone(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Validates `form` and authenticates against the backend.
///
/// # Errors
///
/// Returns `AdminError::Validation` without a network call, or the
/// adapter's error.
#[tracing::instrument(skip_all, fields(email = %form.email.trim()))]
pub async fn login(api: &dyn AdminApi, form: &LoginForm) -> Result<()> {
    let request = form.validate()?;
    api.login(&request).await?;
    tracing::info!("admin logged in");
    Ok(())
}

/// Validates `form` and creates an admin account.
///
/// # Errors
///
/// Returns `AdminError::Validation` without a network call, or the
/// adapter's error.
#[tracing::instrument(skip_all, fields(email = %form.email.trim()))]
pub async fn register(api: &dyn AdminApi, form: &RegisterForm) -> Result<()> {
    let request = form.validate()?;
    api.register(&request).await?;
    tracing::info!("admin account registered");
    Ok(())
}
