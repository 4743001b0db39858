//! Email adapter - Transactional mail via Resend.

mod resend_mailer;

pub use resend_mailer::ResendMailer;
