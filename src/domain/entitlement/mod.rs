//! Entitlement module - Invite codes, grants, and the access decision.

mod invite_code;
mod invite_grant;
mod access;
mod errors;

pub use invite_code::{InviteCode, CODE_LENGTH, CODE_TTL_DAYS};
pub use invite_grant::{InviteAccessGrant, GRANT_TTL_DAYS};
pub use access::AccessStatus;
pub use errors::EntitlementError;
