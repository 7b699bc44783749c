//! Client and wire types for the Google Analytics Data API.

pub mod client;
pub mod normalize;
pub mod types;

pub use client::{GaClient, GaError, ServiceAccountKey};
