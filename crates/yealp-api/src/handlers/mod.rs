//! Route handlers
//!
//! All HTTP request handlers organized by domain. Pages answer with the
//! JSON view model of the page.

pub mod account;
pub mod auth;
pub mod collections;
pub mod health;
pub mod photos;
pub mod restaurants;
pub mod reviews;
pub mod users;
