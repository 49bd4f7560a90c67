// src/application/commands/reviews/mod.rs
mod moderate;
mod service;
mod submit;

pub use moderate::DeactivateProductReviewsCommand;
pub use service::ReviewCommandService;
pub use submit::SubmitReviewCommand;
