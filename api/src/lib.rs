//! eventbook API service.
//!
//! Serves a GraphQL endpoint for listing and creating events and for
//! registering users, backed by MongoDB.
//!
//! # Configuration
//!
//! See [`config::EventbookApiConfig`]. The store connection is assembled from
//! a host URI plus `MONGO_USER`, `MONGO_PASSWORD` and `MONGO_DB`.
//!
//! # Identity
//!
//! There is no login. Every request acts as the user named by
//! `EVENTBOOK_CREATOR_ID`; see [`eventbook_common::caller::Caller`].

pub mod config;
pub mod resolvers;
pub mod schema;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;
