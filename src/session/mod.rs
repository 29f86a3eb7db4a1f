//! Session module for the EcoVault client
//!
//! Mission: Durable token/role state with change notification

pub mod models;
pub mod notifier;
pub mod storage;
pub mod store;

pub use models::{Role, Session};
pub use notifier::{ChangeNotifier, Subscription};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, ROLE_KEY, TOKEN_KEY};
pub use store::SessionStore;
