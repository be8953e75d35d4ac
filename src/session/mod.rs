//! Client-side session: the signed-in user, their token, and persistence.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{AUTH_TOKEN_KEY, CURRENT_USER_KEY, Session, SessionSnapshot, SessionStore};
