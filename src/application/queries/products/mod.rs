mod by_category;
mod detail;
mod list;
mod service;

pub use by_category::ProductsByCategoryQuery;
pub use detail::ProductDetailQuery;
pub use service::ProductQueryService;
