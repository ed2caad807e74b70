//! Error types shared across the navigation core.

mod types;

pub use types::{Misuse, NavError, Result, fail_fast};
