//! Utility functions for the graph engine
//!
//! This module provides common utility functions used across the codebase.

mod tokenize;

pub use tokenize::{content_tokens, MIN_TOKEN_LEN};
