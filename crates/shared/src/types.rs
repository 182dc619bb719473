//! Common types used across the storefront platform

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A country entry inside a region, as returned by the commerce backend.
///
/// Only `iso_2` matters for routing; everything else is carried along so the
/// region payload survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Two-letter ISO-3166-1 alpha-2 code (the backend may return any case).
    pub iso_2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A region as defined by the commerce backend: a group of countries sharing
/// currency, shipping, and tax rules.
///
/// The backend owns region identity; this platform only indexes regions by
/// country code, it never creates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub countries: Vec<Country>,
    /// Region fields we don't interpret (payment providers, tax rates, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response envelope of `GET /store/regions`.
///
/// `regions` is optional so a well-formed payload missing the field can be
/// distinguished from a parse failure.
#[derive(Debug, Deserialize)]
pub struct StoreRegionsResponse {
    #[serde(default)]
    pub regions: Option<Vec<Region>>,
}

/// Mapping from lowercase ISO-3166-1 alpha-2 country code to its region.
///
/// Keys are unique by construction; the map is rebuilt wholesale on every
/// refresh, never merged incrementally.
pub type RegionMap = HashMap<String, Arc<Region>>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_region_deserializes_unknown_fields() {
        let json = r#"{
            "id": "reg_01",
            "name": "Europe",
            "currency_code": "eur",
            "countries": [
                { "iso_2": "FR", "display_name": "France" },
                { "iso_2": "de" }
            ],
            "tax_rate": 20,
            "payment_providers": ["stripe"]
        }"#;

        let region: Region = serde_json::from_str(json).unwrap();
        assert_eq!(region.id, "reg_01");
        assert_eq!(region.countries.len(), 2);
        assert_eq!(region.countries[0].iso_2, "FR");
        assert!(region.extra.contains_key("tax_rate"));
    }

    #[test]
    fn test_region_defaults_missing_countries() {
        let region: Region = serde_json::from_str(r#"{ "id": "reg_02" }"#).unwrap();
        assert!(region.countries.is_empty());
        assert!(region.name.is_empty());
    }

    #[test]
    fn test_store_regions_response_missing_field() {
        let resp: StoreRegionsResponse = serde_json::from_str(r#"{ "count": 0 }"#).unwrap();
        assert!(resp.regions.is_none());

        let resp: StoreRegionsResponse =
            serde_json::from_str(r#"{ "regions": [] }"#).unwrap();
        assert_eq!(resp.regions.unwrap().len(), 0);
    }
}
