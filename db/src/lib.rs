//! Persistence for eventbook.
//!
//! [`storage`] defines the repository traits the API is written against and
//! the MongoDB implementation of them. [`models`] holds the documents as
//! they are stored.

pub mod models;
pub mod password;
pub mod storage;

pub use mongodb::bson;
