//! Catalog of purchasable desserts.
//!
//! The catalog is supplied externally (`desserts.json`) and never edited by the till.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A purchasable item as listed in the catalog data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    pub price: f64,
    /// Display hint for the tile, opaque to ticket logic
    pub image_class: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog data is malformed: {0}")]
    Malformed(String),
    #[error("Catalog item has an empty name")]
    EmptyName,
    #[error("Invalid price for {name}: {price}")]
    InvalidPrice { name: String, price: f64 },
    #[error("Duplicate catalog item: {0}")]
    DuplicateName(String),
}

/// Check the invariants the till relies on: non-empty unique names and finite, non-negative prices
pub fn validate_catalog(items: &[CatalogItem]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in items {
        if item.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                name: item.name.clone(),
                price: item.price,
            });
        }
        if !seen.insert(item.name.as_str()) {
            return Err(CatalogError::DuplicateName(item.name.clone()));
        }
    }
    Ok(())
}

/// Parse and validate raw catalog JSON
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let items: Vec<CatalogItem> =
        serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;
    validate_catalog(&items)?;
    Ok(items)
}
