//! Domain types and pure logic shared by the ticketing backend crates.
//!
//! Nothing in this crate performs I/O; the database, cache and HTTP layers
//! build on top of it.

pub mod error;
pub mod rate_limit;
pub mod roles;
pub mod text;
pub mod types;
pub mod upload;
