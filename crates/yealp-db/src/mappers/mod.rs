//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows into domain objects.
//! `ReviewInsert` prepares a new review for binding.

mod business;
mod collection;
mod photo;
mod review;
mod session;
mod user;

pub use review::ReviewInsert;
