//! Router-wide middleware.
//!
//! - [`response_shape`] -- gives responses produced outside the review
//!   handler (rejections, timeouts, panics, unknown routes) the handler's
//!   JSON error body and CORS header.

pub mod response_shape;
