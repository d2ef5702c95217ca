use autoluxe_common::{FilterSelection, PageCursor};

/// Query parameters for one page of the car listing.
///
/// The price range is only sent when it was set explicitly
/// (`price_range_modified`) and both bounds are defined. Only the first
/// selected brand is sent; the catalog service filters on a single `make`.
pub fn listing_params(
    cursor: PageCursor,
    filters: &FilterSelection,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", cursor.to_string()),
        ("limit", page_size.to_string()),
    ];

    if let Some(brand) = filters.first_brand() {
        params.push(("make", brand.to_lowercase()));
    }

    if filters.price_range_modified {
        if let Some((min, max)) = filters.price_range.bounds() {
            params.push(("priceRange", format!("{min}-{max}")));
        }
    }

    let car_type = filters.car_type.trim();
    if !car_type.is_empty() {
        params.push(("type", car_type.to_lowercase()));
    }

    let transmission = filters.transmission.trim();
    if !transmission.is_empty() {
        params.push(("transmission", transmission.to_lowercase()));
    }

    params
}
