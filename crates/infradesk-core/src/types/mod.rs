//! Core type definitions used across the InfraDesk workspace.

pub mod id;
pub mod notification;

pub use id::*;
pub use notification::{Notification, NotificationLevel};
