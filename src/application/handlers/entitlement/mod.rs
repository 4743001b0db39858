//! Entitlement handlers.

mod check_access;
mod generate_invite_code;
mod list_invite_codes;
mod redeem_invite_code;

pub use check_access::{CheckAccessHandler, CheckAccessQuery};
pub use generate_invite_code::{GenerateInviteCodeCommand, GenerateInviteCodeHandler};
pub use list_invite_codes::{ListInviteCodesHandler, ListInviteCodesQuery};
pub use redeem_invite_code::{
    RedeemInviteCodeCommand, RedeemInviteCodeHandler, RedeemInviteCodeResult,
};
