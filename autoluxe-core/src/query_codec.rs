//! URL query codec for filter selections
//!
//! Absence of a parameter is the canonical "unconstrained" encoding. Decoding
//! never fails as a whole: a malformed field is dropped and the rest still
//! decode.

use crate::filter_store::FilterStore;
use autoluxe_common::{FilterPatch, FilterSelection, PriceRange};
use tracing::{debug, warn};

const BRANDS: &str = "brands";
const PRICE_RANGE: &str = "priceRange";
const TYPE: &str = "type";
const TRANSMISSION: &str = "transmission";

/// Serialize the constrained fields of `filters` into a query string
/// (without the leading `?`).
pub fn encode(filters: &FilterSelection) -> String {
    let mut params: Vec<(&str, String)> = Vec::with_capacity(4);

    if !filters.brands.is_empty() {
        params.push((BRANDS, filters.brands.join(",")));
    }
    if let Some((min, max)) = filters.price_range.bounds() {
        params.push((PRICE_RANGE, format!("{min}-{max}")));
    }
    if !filters.car_type.is_empty() {
        params.push((TYPE, filters.car_type.clone()));
    }
    if !filters.transmission.is_empty() {
        params.push((TRANSMISSION, filters.transmission.clone()));
    }

    serde_urlencoded::to_string(&params).expect("string pairs are always serializable")
}

/// Parse a query string into the fields it actually carries.
///
/// Accepts an optional leading `?`. Empty values count as absent and the
/// first occurrence of a repeated key wins.
pub fn decode(query: &str) -> FilterPatch {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(e) => {
            warn!("Unreadable filter query {query:?}: {e}");
            return FilterPatch::default();
        }
    };

    let brands = param(&pairs, BRANDS).and_then(|raw| {
        let brands: Vec<String> = raw
            .split(',')
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();
        (!brands.is_empty()).then_some(brands)
    });

    let price_range = param(&pairs, PRICE_RANGE).and_then(|raw| {
        let parsed = parse_price_range(raw);
        if parsed.is_none() {
            debug!("Skipping malformed priceRange {raw:?}");
        }
        parsed
    });

    FilterPatch {
        brands,
        price_range,
        car_type: param(&pairs, TYPE).map(str::to_string),
        transmission: param(&pairs, TRANSMISSION).map(str::to_string),
    }
}

fn param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

fn parse_price_range(raw: &str) -> Option<PriceRange> {
    let (min, max) = raw.split_once('-')?;
    Some(PriceRange::new(min.parse().ok()?, max.parse().ok()?))
}

/// Hydrate `store` from a query string. Returns the resulting selection.
///
/// Nothing is written when the query carries no filter fields.
pub fn apply_query(store: &FilterStore, query: &str) -> FilterSelection {
    let patch = decode(query);
    if patch.is_empty() {
        return store.current();
    }
    debug!("Setting filters from URL: {:?}", patch);
    store.set_all(patch)
}

/// Navigation target for "apply filters": the listing page with the
/// encoded selection.
pub fn listing_href(filters: &FilterSelection) -> String {
    let query = encode(filters);
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStorage;
    use std::sync::Arc;

    fn full_selection() -> FilterSelection {
        FilterSelection {
            brands: vec!["mercedes".into(), "lexus".into()],
            price_range: PriceRange::new(1200, 4800),
            car_type: "suv".into(),
            transmission: "automatic".into(),
            price_range_modified: true,
        }
    }

    #[test]
    fn encodes_in_canonical_order() {
        assert_eq!(
            encode(&full_selection()),
            "brands=mercedes%2Clexus&priceRange=1200-4800&type=suv&transmission=automatic"
        );
    }

    #[test]
    fn omits_unconstrained_fields() {
        assert_eq!(encode(&FilterSelection::default()), "");

        let half_price = FilterSelection {
            price_range: PriceRange {
                min: Some(1000),
                max: None,
            },
            car_type: "sedan".into(),
            ..Default::default()
        };
        assert_eq!(encode(&half_price), "type=sedan");
    }

    #[test]
    fn round_trip_preserves_constrained_fields() {
        let original = full_selection();
        let patch = decode(&encode(&original));

        assert_eq!(patch.brands, Some(original.brands));
        assert_eq!(patch.price_range, Some(original.price_range));
        assert_eq!(patch.car_type, Some(original.car_type));
        assert_eq!(patch.transmission, Some(original.transmission));
    }

    #[test]
    fn round_trip_with_spaces_and_symbols() {
        let original = FilterSelection {
            brands: vec!["rolls-royce".into()],
            car_type: "grand tourer & co".into(),
            ..Default::default()
        };
        let patch = decode(&encode(&original));

        assert_eq!(patch.brands, Some(vec!["rolls-royce".to_string()]));
        assert_eq!(patch.car_type.as_deref(), Some("grand tourer & co"));
    }

    #[test]
    fn decodes_raw_commas() {
        let patch = decode("brands=lexus,ferrari&type=suv");

        assert_eq!(
            patch.brands,
            Some(vec!["lexus".to_string(), "ferrari".to_string()])
        );
        assert_eq!(patch.car_type.as_deref(), Some("suv"));
        assert_eq!(patch.price_range, None);
        assert_eq!(patch.transmission, None);
    }

    #[test]
    fn malformed_price_range_is_skipped_not_fatal() {
        let patch = decode("?priceRange=abc-200&transmission=manual");

        assert_eq!(patch.price_range, None);
        assert_eq!(patch.transmission.as_deref(), Some("manual"));

        for bad in ["1200", "-200", "100-", "1-2-3", "-5-10", "1.5-3"] {
            let patch = decode(&format!("priceRange={bad}"));
            assert_eq!(patch.price_range, None, "{bad} should be rejected");
        }
    }

    #[test]
    fn empty_values_and_unknown_keys_are_ignored() {
        let patch = decode("brands=&type=&color=red&page=3");
        assert!(patch.is_empty());
    }

    #[test]
    fn first_repeated_key_wins() {
        let patch = decode("type=suv&type=sedan");
        assert_eq!(patch.car_type.as_deref(), Some("suv"));
    }

    #[test]
    fn apply_query_marks_price_modified_only_for_valid_range() {
        let store = FilterStore::new(Arc::new(MemorySessionStorage::new()));
        apply_query(&store, "brands=lexus&priceRange=x-1");
        assert_eq!(store.current().brands, vec!["lexus".to_string()]);
        assert!(!store.current().price_range_modified);

        let current = apply_query(&store, "priceRange=2000-2000");
        assert!(current.price_range_modified);
        assert_eq!(current.price_range, PriceRange::new(2000, 2000));
        assert_eq!(current.brands, vec!["lexus".to_string()]);
    }

    #[test]
    fn apply_query_without_fields_keeps_selection() {
        let store = FilterStore::new(Arc::new(MemorySessionStorage::new()));
        store.toggle_brand("toyota");

        let current = apply_query(&store, "");
        assert_eq!(current.brands, vec!["toyota".to_string()]);
    }

    #[test]
    fn listing_href_for_empty_and_full_selection() {
        assert_eq!(listing_href(&FilterSelection::default()), "/");
        assert!(listing_href(&full_selection()).starts_with("/?brands="));
    }
}
