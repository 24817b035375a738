//! Messadmin Core - verification engine for the mess admin console.
//!
//! This crate holds everything the console does short of drawing: the mess
//! record model, the per-view state, the status partitioner, the fetch,
//! verification, account and platform settings workflows, the REST
//! adapters (HTTP and mock), configuration and error handling.
//!
//! # Architecture
//!
//! - [`model`]: Mess record, statuses and boundary decoding
//! - [`partition`]: Pure status partitioning and counts
//! - [`state`]: View-scoped collection, fetch latch and busy tracking
//! - [`workflows`]: Fetch, verify, auth, fee and password workflows
//! - [`api`]: Adapter traits, reqwest implementations and mocks
//! - [`view`]: Card and detail view-models
//! - [`dashboard`]: Dashboard overview data
//! - [`runtime`]: Wires config, adapters and notifications together
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result type alias
//!
//! # Example
//!
//! ```rust
//! use messadmin_core::{Decision, MealType, MessRecord, MessViewState, VerificationStatus};
//!
//! let mut state = MessViewState::with_messes(vec![
//!     MessRecord::new("1", "Spice Hub", "Gate 2", MealType::Both),
//! ]);
//!
//! let pending = state.begin_update("1", Decision::Accept, "")?;
//! // ... send pending.request() to the backend ...
//! let outcome = state.finish_update(pending, Ok(()))?;
//!
//! assert_eq!(outcome.status, VerificationStatus::Verified);
//! assert_eq!(state.counts().verified, 1);
//! # Ok::<(), messadmin_core::AdminError>(())
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod partition;
pub mod runtime;
pub mod state;
pub mod view;
pub mod workflows;

// Re-export core types for convenience
pub use api::ApiRegistry;
pub use config::AdminConfig;
pub use dashboard::{DashboardOverview, VerificationSummary};
pub use error::{AdminError, Result, ValidationErrors};
pub use model::{MealType, MessBatch, MessRecord, VerificationStatus};
pub use partition::{Partitions, StatusCounts, partition};
pub use runtime::{AdminRuntime, Operation};
pub use state::MessViewState;
pub use view::{MessCardView, MessDetailView};
pub use workflows::{
    ChangePasswordForm, Decision, FetchReport, FetchTrigger, LoginForm, PlatformConfigForm,
    RegisterForm, VerificationOutcome,
};
