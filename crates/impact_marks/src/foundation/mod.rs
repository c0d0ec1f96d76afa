//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and basis construction
//! - Frame time
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
