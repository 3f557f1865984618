#![allow(async_fn_in_trait)]
pub mod bbox;
pub mod download_links;
mod error;
pub mod provider;
pub mod report;
pub mod search;
pub mod settings;
pub mod signing;
pub mod stac_operations;
pub mod web;

#[cfg(test)]
mod test_util;

pub use error::{BboxError, CatalogError, FormError, SettingsError, SigningError};
