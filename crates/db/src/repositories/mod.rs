//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&mut PgConnection` as the first argument.

pub mod review_repo;
pub mod user_repo;

pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
