//! Search module.
//!
//! Contains the collection query, the pagination descriptor, and decoding
//! of collection responses.

mod query;
mod results;

pub use query::{ProductQuery, MAX_LIMIT};
pub use results::{PageInfo, ProductPage};
