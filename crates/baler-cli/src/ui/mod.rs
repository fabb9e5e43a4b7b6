//! Terminal output helpers.

pub mod format;
