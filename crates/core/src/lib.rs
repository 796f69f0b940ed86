//! Storelab Core - Shared types library.
//!
//! This crate provides common types used across all storelab components:
//! - `db` - Schema, repositories, and seed data
//! - `cli` - Command-line tools for schema setup, seeding, and reports
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This
//! keeps it lightweight and allows it to be used anywhere. The `sqlite`
//! feature adds sqlx trait implementations so the types can be bound and
//! decoded directly.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
