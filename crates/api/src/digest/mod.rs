mod digest_mail;
pub mod send_registration_digest;
