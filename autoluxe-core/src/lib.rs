pub mod auth;
pub mod car_draft;
pub mod catalog;
pub mod config;
pub mod filter_store;
pub mod listing;
pub mod query_codec;
pub mod storage;

pub use autoluxe_common as common;
