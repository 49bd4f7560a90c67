pub mod category;
pub mod errors;
pub mod product;
pub mod review;
pub mod slug;
pub mod user;
