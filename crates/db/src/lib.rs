//! Storelab database layer.
//!
//! This crate owns the relational schema for the practice store and every
//! operation against it. The schema is plain SQLite DDL (foreign keys with
//! referential actions, unique and check constraints, a stored generated
//! column, and the `order_summary` view); the operations are sqlx
//! repositories over a connection pool.
//!
//! # Modules
//!
//! - [`db`] - Connection pool, error taxonomy, schema lifecycle, seed data,
//!   and the per-entity repositories
//! - [`models`] - Domain types the repositories accept and return

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod db;
pub mod models;
