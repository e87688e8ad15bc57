//! # Userdir Core
//!
//! Core types, entities, and error definitions shared by every layer of the
//! Userdir service.

pub mod domain;
pub mod error;
pub mod result;

pub use domain::*;
pub use error::*;
pub use result::*;
