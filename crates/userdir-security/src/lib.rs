//! # Userdir Security
//!
//! Credential hashing for API keys.

pub mod hasher;

pub use hasher::hash_api_key;
