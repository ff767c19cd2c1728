//! Travel data module.
//!
//! Provides the record types, commission arithmetic and the provider client.

pub mod client;
pub mod commission;
pub mod models;

pub use client::TravelClient;
