//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: points, section tags, warnings and errors.

mod errors;
