//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Opaque auth token generation and header extraction
//! - Flat-directory image storage with a MIME whitelist

pub mod password;
pub mod storage;
pub mod token;
