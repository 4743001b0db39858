//! Identity module - User profiles mirrored from the auth provider.

mod user;

pub use user::UserProfile;
