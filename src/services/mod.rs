//! Application services layer.
//!
//! Services run work off the UI thread and hand results back through
//! pollable handles.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  UI layer (App, Screens)     │
//! └──────────────┬───────────────┘
//!                │ TaskHandle::try_recv each tick
//!                ▼
//! ┌──────────────────────────────┐
//! │  SubmissionService           │
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │  RequestGateway (reqwest)    │
//! └──────────────────────────────┘
//! ```

pub mod submission_service;

pub use submission_service::{
    into_submission_result, spawn_cancellable, SafetyRefresh, SubmissionService, TaskHandle,
};
