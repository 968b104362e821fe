//! Service client implementations
//!
//! This module contains the client for the first-aid analysis backend.

pub mod first_aid;
pub(crate) mod common;

pub use common::UserAgent;
