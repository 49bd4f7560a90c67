mod list;
mod service;

pub use list::{RatingsForProductQuery, ReviewsForProductQuery};
pub use service::ReviewQueryService;
