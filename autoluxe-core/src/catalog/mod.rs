//! Client for the car catalog REST service.
mod client;
pub mod models;
mod params;

pub use client::{CarSource, CatalogClient, CatalogError};
pub use models::{Car, CarPage};
pub use params::listing_params;
