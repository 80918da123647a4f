//! Authentication building blocks: password hashing and session tokens.

pub mod password;
pub mod session;
