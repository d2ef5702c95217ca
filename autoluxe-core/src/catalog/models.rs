//! Wire types for the catalog service (camelCase JSON).

use autoluxe_common::{PageCursor, PageInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of the `/api/cars` listing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarPage {
    pub cars: Vec<Car>,
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_cars: Option<u64>,
}

impl CarPage {
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }

    pub fn next_cursor(&self) -> Option<PageCursor> {
        self.page_info().next_cursor()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Car {
    #[serde(rename = "_id")]
    pub id: String,
    pub make: String,
    pub model: String,
    pub variant: String,
    #[serde(rename = "type")]
    pub car_type: String,
    pub year: Option<i32>,
    pub color: Option<CarColor>,
    pub availability: Option<Availability>,
    pub pricing: Option<Pricing>,
    pub rating: Option<Rating>,
    pub license_plate: String,
    pub vin: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Car {
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// e.g. `AED 1500/day`, or `None` when the listing has no pricing.
    pub fn daily_price_label(&self) -> Option<String> {
        self.pricing
            .as_ref()
            .map(|p| format!("{} {}/day", p.currency, p.base_price))
    }

    pub fn location_name(&self) -> Option<&str> {
        self.availability
            .as_ref()
            .map(|a| a.location.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarColor {
    pub exterior: String,
    pub interior: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Booked,
    Maintenance,
    Unavailable,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupOption {
    Location,
    Delivery,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Availability {
    pub status: AvailabilityStatus,
    pub location: Location,
    pub pickup_options: Vec<PickupOption>,
    pub available_from: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Discounts {
    pub weekly_rate: f64,
    pub monthly_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_offer: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    pub basic: f64,
    pub premium: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pricing {
    pub base_price: f64,
    pub currency: String,
    pub deposit: f64,
    pub discounts: Discounts,
    pub insurance: Insurance,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
    pub is_rare: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "cars": [{
            "_id": "65a1",
            "make": "Ferrari",
            "model": "Roma",
            "variant": "Spider",
            "type": "sports",
            "year": 2023,
            "color": {"exterior": "Rosso", "interior": "Nero"},
            "availability": {
                "status": "available",
                "location": {
                    "name": "Dubai Marina Branch",
                    "address": "Marina Walk, Dubai Marina",
                    "coordinates": {"latitude": 25.0777, "longitude": 55.1304}
                },
                "pickupOptions": ["location", "delivery"],
                "availableFrom": "2024-01-10T00:00:00Z"
            },
            "pricing": {
                "basePrice": 3500,
                "currency": "AED",
                "deposit": 5000,
                "discounts": {"weeklyRate": 10, "monthlyRate": 20},
                "insurance": {"basic": 100, "premium": 250}
            },
            "rating": {"average": 4.8, "count": 12, "isRare": true},
            "licensePlate": "DXB 123",
            "vin": "ZFF000",
            "__v": 0
        }],
        "currentPage": 1,
        "totalPages": 4,
        "totalCars": 37
    }"#;

    #[test]
    fn parses_listing_page() {
        let page: CarPage = serde_json::from_str(PAGE_JSON).unwrap();

        assert_eq!(page.cars.len(), 1);
        assert_eq!(page.total_cars, Some(37));
        assert_eq!(page.next_cursor(), PageCursor::new(2));

        let car = &page.cars[0];
        assert_eq!(car.id, "65a1");
        assert_eq!(car.title(), "Ferrari Roma");
        assert_eq!(car.daily_price_label().as_deref(), Some("AED 3500/day"));
        assert_eq!(car.location_name(), Some("Dubai Marina Branch"));
        let availability = car.availability.as_ref().unwrap();
        assert_eq!(
            availability.pickup_options,
            vec![PickupOption::Location, PickupOption::Delivery]
        );
        assert!(car.rating.as_ref().unwrap().is_rare);
    }

    #[test]
    fn page_without_metadata_is_final() {
        let page: CarPage = serde_json::from_str(r#"{"cars": []}"#).unwrap();
        assert_eq!(page.next_cursor(), None);

        let empty: CarPage = serde_json::from_str("{}").unwrap();
        assert!(empty.cars.is_empty());
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let availability: Availability =
            serde_json::from_str(r#"{"status": "reserved", "pickupOptions": ["drone"]}"#).unwrap();
        assert_eq!(availability.status, AvailabilityStatus::Unknown);
        assert_eq!(availability.pickup_options, vec![PickupOption::Other]);
    }
}
