//! Integration tests for the processor module
//!
//! Tests the complete validation pipeline against temporary station
//! directories.

pub mod error_handling;
