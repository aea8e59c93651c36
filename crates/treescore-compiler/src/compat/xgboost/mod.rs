//! XGBoost model export support.
//!
//! This module parses XGBoost's `dump_model` JSON format and converts it to
//! the native [`Forest`](crate::repr::Forest) representation.

mod dump;

pub use dump::{forest_from_dump, read_dump, DumpError};
