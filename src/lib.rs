//! Shared adventure journal: REST API over a SQLite entry store, plus the
//! pure list-transform and client-session logic the single-page client is
//! built on.

pub mod agenda;
pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod store;
