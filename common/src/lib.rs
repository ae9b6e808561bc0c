//! Types shared between the eventbook API, storage layer and tooling.
//!
//! [`views`] are what the API hands back to clients, [`params`] are what it
//! accepts, and [`caller`] describes who a request acts on behalf of.

pub mod caller;
pub mod params;
pub mod views;
