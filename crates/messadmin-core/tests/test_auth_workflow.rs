//! Integration tests for the login, registration, password and platform
//! settings workflows against the mock admin adapter.

use messadmin_core::api::admin::PlatformConfig;
use messadmin_core::api::admin_mock::{AdminCall, MockAdminApi};
use messadmin_core::api::mess_mock::MockFailure;
use messadmin_core::workflows::{change_password, login, register, update_platform_config};
use messadmin_core::{AdminError, ChangePasswordForm, LoginForm, PlatformConfigForm, RegisterForm};

fn valid_registration() -> RegisterForm {
    RegisterForm {
        name: "Asha Rao".to_string(),
        contact: "9876543210".to_string(),
        email: "asha@livmeal.com".to_string(),
        password: "s3cret!".to_string(),
    }
}

#[tokio::test]
async fn test_login_sends_trimmed_email() {
    let api = MockAdminApi::new();
    login(&api, &LoginForm::new(" admin@livmeal.com ", "pw")).await.unwrap();

    assert_eq!(
        api.history(),
        vec![AdminCall::Login {
            email: "admin@livmeal.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_invalid_login_never_reaches_server() {
    let api = MockAdminApi::new();
    let result = login(&api, &LoginForm::new("not-an-email", "pw")).await;

    let Err(AdminError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("email"), Some("Invalid email format"));
    assert!(api.history().is_empty());
}

#[tokio::test]
async fn test_register_success() {
    let api = MockAdminApi::new();
    register(&api, &valid_registration()).await.unwrap();

    assert_eq!(
        api.history(),
        vec![AdminCall::Register {
            name: "Asha Rao".to_string(),
            contact: "9876543210".to_string(),
            email: "asha@livmeal.com".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_register_validation_blocks_request() {
    let api = MockAdminApi::new();
    let mut form = valid_registration();
    form.contact = "98765".to_string();
    form.password = "abc".to_string();

    let Err(AdminError::Validation(errors)) = register(&api, &form).await else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("contact"), Some("Contact must be 10 digits"));
    assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
    assert_eq!(errors.get("name"), None);
    assert!(api.history().is_empty());
}

#[tokio::test]
async fn test_register_surfaces_server_message() {
    let api = MockAdminApi::new();
    api.fail_with(MockFailure::Status(409), Some("Email already registered"));

    let err = register(&api, &valid_registration()).await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::HttpStatus { status: 409, message: Some(ref m) } if m == "Email already registered"
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_platform_config_update() {
    let api = MockAdminApi::new();
    let config = update_platform_config(&api, &PlatformConfigForm::new("18", "2.5"))
        .await
        .unwrap();

    let expected = PlatformConfig {
        gst: 18.0,
        platform_fee: 2.5,
    };
    assert_eq!(config, expected);
    assert_eq!(api.history(), vec![AdminCall::UpdateConfig(expected)]);
}

#[tokio::test]
async fn test_platform_config_rejects_bad_input() {
    let api = MockAdminApi::new();
    let result = update_platform_config(&api, &PlatformConfigForm::new("", "abc")).await;

    let Err(AdminError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("gst"), Some("GST is required"));
    assert_eq!(errors.get("platform_fee"), Some("Platform fee must be a number"));
    assert!(api.history().is_empty());
}

#[tokio::test]
async fn test_change_password_reaches_server_once_valid() {
    let api = MockAdminApi::new();

    let mismatched = ChangePasswordForm::new("old-secret", "new-secret-1", "new-secret-2");
    let Err(AdminError::Validation(errors)) = change_password(&api, &mismatched).await else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
    assert!(api.history().is_empty());

    let form = ChangePasswordForm::new("old-secret", "new-secret-1", "new-secret-1");
    change_password(&api, &form).await.unwrap();
    assert_eq!(api.history(), vec![AdminCall::ChangePassword]);
}

#[tokio::test]
async fn test_change_password_surfaces_server_refusal() {
    let api = MockAdminApi::new();
    api.fail_with(MockFailure::Status(401), Some("Current password is incorrect"));

    let form = ChangePasswordForm::new("wrong", "new-secret-1", "new-secret-1");
    let result = change_password(&api, &form).await;

    assert!(matches!(
        result,
        Err(AdminError::HttpStatus { status: 401, message: Some(ref m) }) if m == "Current password is incorrect"
    ));
}
