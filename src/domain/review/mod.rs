pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewReview, Rating, Review};
pub use repository::{ReviewReadRepository, ReviewWriteRepository};
pub use value_objects::{Grade, RatingId, ReviewBody, ReviewHeader, ReviewId};
