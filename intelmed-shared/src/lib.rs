//! # IntelMed Shared Library
//!
//! This crate contains the domain types, database layer and registration
//! workflow used by the IntelMed API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing
//! - `db`: Connection pool and migrations
//! - `models`: `user` and `patient` tables
//! - `registration`: Patient registration workflow and its database seam
//! - `sanitize`: Form field sanitization

pub mod auth;
pub mod db;
pub mod models;
pub mod registration;
pub mod sanitize;

/// Current version of the IntelMed shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
