use serde::{Deserialize, Serialize};

/// Price bounds for the catalog filter.
///
/// `None` on either side is the "unset" sentinel. Serialized as a two-element
/// array of nullable numbers (`[1200, null]`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Option<u64>; 2]", into = "[Option<u64>; 2]")]
pub struct PriceRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PriceRange {
    /// Both bounds unset: no price constraint.
    pub const UNSET: PriceRange = PriceRange {
        min: None,
        max: None,
    };

    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns `(min, max)` only when both bounds are defined.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Human label shown next to the price slider, e.g. `AED 1K - 5K`.
    pub fn label(&self) -> String {
        match self.bounds() {
            Some((min, max)) => format!("AED {}K - {}K", thousands(min), thousands(max)),
            None => "Any".to_string(),
        }
    }
}

fn thousands(value: u64) -> u64 {
    value.saturating_add(500) / 1000
}

impl From<[Option<u64>; 2]> for PriceRange {
    fn from([min, max]: [Option<u64>; 2]) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for [Option<u64>; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

/// The user's catalog-narrowing criteria.
///
/// Empty strings and an empty brand list mean "unconstrained". The
/// `price_range_modified` flag records whether the range was ever set
/// explicitly, as opposed to sitting at its default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
    pub brands: Vec<String>,
    pub price_range: PriceRange,
    #[serde(rename = "type")]
    pub car_type: String,
    pub transmission: String,
    pub price_range_modified: bool,
}

/// A single-field update for [`FilterSelection::set_field`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterField {
    Brands(Vec<String>),
    PriceRange(PriceRange),
    Type(String),
    Transmission(String),
}

/// A partial selection. `None` means the field was not present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub brands: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub car_type: Option<String>,
    pub transmission: Option<String>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        self.brands.is_none()
            && self.price_range.is_none()
            && self.car_type.is_none()
            && self.transmission.is_none()
    }
}

impl FilterSelection {
    /// Merge the present fields of `patch`.
    ///
    /// A present price range forces `price_range_modified` to true; otherwise
    /// the flag keeps its previous value.
    pub fn apply_patch(&mut self, patch: FilterPatch) {
        if let Some(brands) = patch.brands {
            self.brands = brands;
        }
        if let Some(range) = patch.price_range {
            self.price_range = range;
            self.price_range_modified = true;
        }
        if let Some(car_type) = patch.car_type {
            self.car_type = car_type;
        }
        if let Some(transmission) = patch.transmission {
            self.transmission = transmission;
        }
    }

    /// Set exactly one field. Does not touch `price_range_modified`.
    pub fn set_field(&mut self, field: FilterField) {
        match field {
            FilterField::Brands(brands) => self.brands = brands,
            FilterField::PriceRange(range) => self.price_range = range,
            FilterField::Type(car_type) => self.car_type = car_type,
            FilterField::Transmission(transmission) => self.transmission = transmission,
        }
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
        self.price_range_modified = true;
    }

    /// Single-select brand toggle: deselect if selected, otherwise replace
    /// the selection with `brand_id` alone.
    pub fn toggle_brand(&mut self, brand_id: &str) {
        if self.brands.iter().any(|b| b == brand_id) {
            self.brands.retain(|b| b != brand_id);
        } else {
            self.brands = vec![brand_id.to_string()];
        }
    }

    /// The brand sent to the catalog service. Only the first is used.
    pub fn first_brand(&self) -> Option<&str> {
        self.brands.first().map(String::as_str)
    }

    /// Number of constrained dimensions (brand, price, type, transmission).
    pub fn active_count(&self) -> usize {
        [
            !self.brands.is_empty(),
            self.price_range.bounds().is_some(),
            !self.car_type.is_empty(),
            !self.transmission.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}
