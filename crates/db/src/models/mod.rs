//! Row structs and DTOs.
//!
//! Each submodule contains `FromRow` + `Serialize` structs matching the
//! database rows plus the input DTOs the repositories accept.

pub mod review;
