//! # infradesk-entity
//!
//! Models for everything the console manages. Every editable kind comes as
//! a pair: the full model (the last known server state) and a `*Draft` with
//! every field optional (the in-progress form state). The [`Resource`] trait
//! ties a model to its draft and its REST collection.

pub mod asset_status;
pub mod datacenter;
pub mod deployment;
pub mod disk;
pub mod maintenance;
pub mod resource;
pub mod server;
pub mod session;
pub mod user;
pub mod validation;

pub use asset_status::AssetStatus;
pub use datacenter::{Datacenter, DatacenterDraft};
pub use deployment::{
    Cluster, DatacenterScoped, DeploymentJob, DeploymentLogs, NewDeploymentJob, Network,
};
pub use disk::{DiskArray, DiskArrayDraft};
pub use maintenance::{MaintenanceRecord, MaintenanceRecordDraft, MaintenanceResource};
pub use resource::Resource;
pub use server::{Server, ServerDraft};
pub use session::{Credentials, LoginResponse, MeResponse, Profile, Session};
pub use user::{User, UserDraft, UserRole, UserStatus};
