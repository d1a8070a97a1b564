//! Deployment jobs: catalogue loading, submission, and logs.

pub mod service;

pub use service::{DeploymentService, submit_notification};
