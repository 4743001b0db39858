//! Identity handlers.

mod sync_user;

pub use sync_user::{SyncUserCommand, SyncUserHandler};
