//! Domain rules for marketplace reviews: moderation statuses, field
//! validation and the shared error taxonomy.

pub mod error;
pub mod review;
pub mod types;
