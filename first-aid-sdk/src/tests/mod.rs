//! Unit tests for the first-aid SDK
//!
//! This module contains tests for the components of the SDK.

pub mod classifier_tests;
pub mod config_tests;
pub mod guidance_tests;
pub mod session_tests;
