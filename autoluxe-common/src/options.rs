//! Choices offered by the filter panel.

/// A selectable filter value and its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

pub const BRANDS: &[FilterOption] = &[
    option("mercedes", "Mercedes"),
    option("lexus", "Lexus"),
    option("toyota", "Toyota"),
    option("ferrari", "Ferrari"),
    option("rolls-royce", "Rolls Royce"),
    option("mclaren", "McLaren"),
];

pub const CAR_TYPES: &[FilterOption] = &[
    option("sedan", "Sedan"),
    option("suv", "SUV"),
    option("sports", "Sports"),
    option("luxury", "Luxury"),
];

pub const TRANSMISSIONS: &[FilterOption] =
    &[option("automatic", "Automatic"), option("manual", "Manual")];

/// Look up the label for `value`, falling back to the value itself.
pub fn label_for<'a>(options: &[FilterOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lookup() {
        assert_eq!(label_for(BRANDS, "rolls-royce"), "Rolls Royce");
        assert_eq!(label_for(CAR_TYPES, "suv"), "SUV");
        assert_eq!(label_for(TRANSMISSIONS, "cvt"), "cvt");
    }
}
