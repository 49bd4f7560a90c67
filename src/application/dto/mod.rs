pub mod auth;
pub mod categories;
pub mod products;
pub mod reviews;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use categories::CategoryDto;
pub use products::ProductDto;
pub use reviews::{RatingDto, ReviewDto};
pub use users::UserDto;
