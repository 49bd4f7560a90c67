// src/application/commands/mod.rs
pub(crate) mod capability;
pub mod categories;
pub mod products;
pub mod reviews;
pub mod users;
