//! Workflow modules for the mess admin console.
//!
//! - `fetch`: load the mess collection behind a one-shot mount latch
//! - `verify`: accept or reject a pending mess
//! - `auth`: admin login and registration forms
//! - `settings`: platform fee configuration and password change forms
//!
//! The list and verification workflows are split into a synchronous
//! `begin_*` phase, the remote call, and a synchronous `finish_*` phase,
//! so an event loop can keep several requests outstanding while mutating
//! the view state only between events.

pub mod auth;
pub mod fetch;
pub mod settings;
pub mod verify;

// Re-export workflow entry points
pub use auth::{LoginForm, RegisterForm, login, register};
pub use fetch::{FetchReport, FetchTicket, FetchTrigger, fetch_messes};
pub use settings::{
    ChangePasswordForm, PlatformConfigForm, change_password, update_platform_config,
};
pub use verify::{Decision, PendingUpdate, VerificationOutcome, apply_decision};
