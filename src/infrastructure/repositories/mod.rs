pub mod error;
pub mod postgres_category;
pub mod postgres_product;
pub mod postgres_review;
pub mod postgres_user;

pub use error::map_sqlx;
pub use postgres_category::{PostgresCategoryReadRepository, PostgresCategoryWriteRepository};
pub use postgres_product::{PostgresProductReadRepository, PostgresProductWriteRepository};
pub use postgres_review::{PostgresReviewReadRepository, PostgresReviewWriteRepository};
pub use postgres_user::PostgresUserRepository;
