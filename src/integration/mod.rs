//! Integration tests
//!
//! Synthetic fixtures and end-to-end runs of the align and prepare stages.

pub mod fixtures;

mod e2e;
