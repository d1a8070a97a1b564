//! Session lifecycle: login, persistence, rehydration, and logout.

pub mod forced;
pub mod storage;
pub mod store;

pub use forced::ForcedLogout;
pub use storage::{FileStorage, MemoryStorage};
pub use store::{AuthStatus, PersistedAuth, SessionStore};
