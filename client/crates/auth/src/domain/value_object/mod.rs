//! Value Object Module

pub mod credentials;
pub mod user_role;
