//! Notification crate for the mess admin console.
//!
//! This crate turns workflow results into user-facing notifications by
//! rendering minijinja templates. Built-in templates cover every message the
//! console emits; an optional directory of `.j2` files can override any of
//! them.
//!
//! # Examples
//!
//! ```
//! use messadmin_notify::{NoticeContext, NoticeEngine, NoticeLevel, NoticeManager};
//!
//! let manager = NoticeManager::builtin()?;
//!
//! let context = NoticeContext::for_mess("65f1c0", "University Main Mess");
//! let notice = manager.notify(NoticeLevel::Success, "verified", &context)?;
//! assert_eq!(notice.message, "University Main Mess has been verified.");
//! # Ok::<(), messadmin_notify::NoticeError>(())
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod manager;
pub mod notification;

// Re-export public types for convenience
pub use context::NoticeContext;
pub use engine::NoticeEngine;
pub use error::{NoticeError, Result};
pub use manager::NoticeManager;
pub use notification::{NoticeLevel, Notification};
