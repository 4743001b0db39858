//! Invite code entity and candidate generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InviteCodeId, Timestamp, UserId, ValidationError};

/// Length of a generated code.
pub const CODE_LENGTH: usize = 8;

/// Days an unredeemed code stays valid after issuance.
pub const CODE_TTL_DAYS: i64 = 30;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// An admin-issued invite code, redeemable at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteCode {
    pub id: InviteCodeId,
    pub code: String,
    pub created_by: UserId,
    pub redeemed_by: Option<UserId>,
    pub redeemed_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl InviteCode {
    /// Issues a fresh code expiring [`CODE_TTL_DAYS`] from `now`.
    pub fn issue(
        code: impl Into<String>,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let code = code.into();
        validate_code(&code)?;
        Ok(Self {
            id: InviteCodeId::new(),
            code,
            created_by,
            redeemed_by: None,
            redeemed_at: None,
            expires_at: now.add_days(CODE_TTL_DAYS),
            is_active: true,
            created_at: now,
        })
    }

    /// Draws a random candidate code from the `[A-Z0-9]` alphabet.
    ///
    /// Uniqueness is the caller's concern; candidates can collide.
    pub fn generate_candidate<R: Rng>(rng: &mut R) -> String {
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    pub fn is_redeemed(&self) -> bool {
        self.redeemed_by.is_some()
    }

    /// Expiry bound is inclusive: a code expiring exactly at `now` is
    /// still redeemable.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_before(&now)
    }
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::empty_field("code"));
    }
    if code.len() != CODE_LENGTH {
        return Err(ValidationError::out_of_range(
            "code",
            CODE_LENGTH as i64,
            CODE_LENGTH as i64,
            code.len() as i64,
        ));
    }
    if !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return Err(ValidationError::invalid_format(
            "code",
            "only uppercase letters and digits are allowed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserId {
        UserId::new("admin-1").unwrap()
    }

    #[test]
    fn issue_sets_thirty_day_expiry() {
        let now = Timestamp::now();
        let code = InviteCode::issue("ABCD1234", admin(), now).unwrap();
        assert_eq!(code.expires_at, now.add_days(30));
        assert!(code.is_active);
        assert!(!code.is_redeemed());
    }

    #[test]
    fn issue_rejects_wrong_length() {
        assert!(InviteCode::issue("ABC", admin(), Timestamp::now()).is_err());
    }

    #[test]
    fn issue_rejects_lowercase() {
        assert!(InviteCode::issue("abcd1234", admin(), Timestamp::now()).is_err());
    }

    #[test]
    fn generated_candidates_match_the_alphabet() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let code = InviteCode::generate_candidate(&mut rng);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn generated_candidates_are_valid_codes() {
        let mut rng = rand::thread_rng();
        let candidate = InviteCode::generate_candidate(&mut rng);
        assert!(InviteCode::issue(candidate, admin(), Timestamp::now()).is_ok());
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Timestamp::now();
        let code = InviteCode::issue("ABCD1234", admin(), now).unwrap();
        assert!(!code.is_expired_at(code.expires_at));
        assert!(code.is_expired_at(code.expires_at.plus_secs(1)));
    }
}
