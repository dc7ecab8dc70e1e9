//! Catalogo Backend Library
//!
//! Exposes core modules for use by the binary and tests.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod models;
