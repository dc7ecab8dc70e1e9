//! Catalog Module
//! Mission: Persist and query product records

pub mod store;

pub use store::ProductStore;
