//! # userhub Shared Library
//!
//! This crate contains the data model, persistence and validation used by
//! the userhub API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `db`: Connection pool and schema bootstrap
//! - `repository`: Storage abstraction with Postgres and in-memory backends
//! - `validation`: Schema validation of incoming user payloads
//! - `error`: Common error types

pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

/// Current version of the userhub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
