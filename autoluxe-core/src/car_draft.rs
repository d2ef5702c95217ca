//! Admin "add car" draft.
//!
//! Defaults mirror the admin form. Images are attached by URL only.

use crate::catalog::models::{
    Availability, AvailabilityStatus, CarColor, Coordinates, Location, PickupOption, Pricing,
    Rating,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Year of the first production automobile; anything older is a typo.
const FIRST_CAR_YEAR: i32 = 1886;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CarDraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("year {0} is out of range")]
    InvalidYear(i32),
}

/// A rental branch a car can be assigned to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub value: &'static str,
    pub label: &'static str,
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const LOCATIONS: &[Branch] = &[
    Branch {
        value: "Downtown Dubai Branch",
        label: "Downtown Dubai",
        address: "Sheikh Mohammed bin Rashid Blvd, Downtown Dubai",
        latitude: 25.2048,
        longitude: 55.2708,
    },
    Branch {
        value: "Palm Jumeirah Branch",
        label: "Palm Jumeirah",
        address: "Crescent Road, Palm Jumeirah",
        latitude: 25.1124,
        longitude: 55.139,
    },
    Branch {
        value: "Dubai Marina Branch",
        label: "Dubai Marina",
        address: "Marina Walk, Dubai Marina",
        latitude: 25.0777,
        longitude: 55.1304,
    },
    Branch {
        value: "DIFC Branch",
        label: "DIFC",
        address: "Gate Avenue, DIFC",
        latitude: 25.2147,
        longitude: 55.2796,
    },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Safety,
    #[default]
    Comfort,
    Performance,
    Convenience,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarFeature {
    pub id: Uuid,
    pub name: String,
    pub category: FeatureCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Engine {
    #[serde(rename = "type")]
    pub engine_type: String,
    pub capacity: f64,
    pub power: f64,
    pub transmission: String,
    pub cylinders: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            engine_type: String::new(),
            capacity: 0.0,
            power: 0.0,
            transmission: "Automatic".to_string(),
            cylinders: 8,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Performance {
    pub acceleration: f64,
    pub top_speed: f64,
    pub fuel_efficiency: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub wheelbase: f64,
    pub seating_capacity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specifications {
    pub engine: Engine,
    pub performance: Performance,
    pub dimensions: Dimensions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Regular,
    Major,
    Repair,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Excellent,
    Good,
    Fair,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRecord {
    pub date: DateTime<Utc>,
    pub mileage: u32,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}

impl Default for ServiceRecord {
    fn default() -> Self {
        Self {
            date: Utc::now(),
            mileage: 0,
            service_type: ServiceType::Regular,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDue {
    pub date: DateTime<Utc>,
    pub mileage: u32,
}

impl Default for ServiceDue {
    fn default() -> Self {
        Self {
            date: Utc::now(),
            mileage: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Maintenance {
    pub last_service: ServiceRecord,
    pub next_service_due: ServiceDue,
    pub condition: Condition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Restrictions {
    pub min_age: u32,
    pub min_license_years: u32,
    pub required_documents: Vec<String>,
}

impl Default for Restrictions {
    fn default() -> Self {
        Self {
            min_age: 25,
            min_license_years: 3,
            required_documents: vec![
                "Valid UAE/International Driver's License".to_string(),
                "Original Passport".to_string(),
                "Tourist Visa or UAE ID".to_string(),
                "Credit Card with Sufficient Limit".to_string(),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarImage {
    pub id: Uuid,
    pub url: String,
    pub alt: String,
    pub is_main: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Default for ListingMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }
}

/// Body of `POST /api/cars`. Missing fields take the form defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub variant: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub car_type: String,
    pub color: CarColor,
    pub vin: String,
    pub license_plate: String,
    pub specifications: Specifications,
    pub features: Vec<CarFeature>,
    pub maintenance: Maintenance,
    pub pricing: Pricing,
    pub availability: Availability,
    pub rating: Rating,
    pub restrictions: Restrictions,
    pub images: Vec<CarImage>,
    pub metadata: ListingMetadata,
}

impl Default for NewCar {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            make: String::new(),
            model: String::new(),
            variant: String::new(),
            year: now.year(),
            car_type: "luxury".to_string(),
            color: CarColor::default(),
            vin: String::new(),
            license_plate: String::new(),
            specifications: Specifications::default(),
            features: Vec::new(),
            maintenance: Maintenance::default(),
            pricing: Pricing {
                currency: "AED".to_string(),
                ..Default::default()
            },
            availability: Availability {
                status: AvailabilityStatus::Available,
                location: Location::default(),
                pickup_options: vec![PickupOption::Location, PickupOption::Delivery],
                available_from: Some(now),
            },
            rating: Rating {
                average: 5.0,
                count: 0,
                is_rare: false,
            },
            restrictions: Restrictions::default(),
            images: Vec::new(),
            metadata: ListingMetadata::default(),
        }
    }
}

impl NewCar {
    pub fn title(&self) -> String {
        [&self.make, &self.model, &self.variant]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check the fields the admin form marks as required.
    pub fn validate(&self) -> Result<(), CarDraftError> {
        let required = [
            ("make", &self.make),
            ("model", &self.model),
            ("variant", &self.variant),
            ("vin", &self.vin),
            ("licensePlate", &self.license_plate),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CarDraftError::MissingField(name));
            }
        }

        let latest = Utc::now().year() + 1;
        if !(FIRST_CAR_YEAR..=latest).contains(&self.year) {
            return Err(CarDraftError::InvalidYear(self.year));
        }
        Ok(())
    }

    /// Add a feature. Blank names are ignored. Returns the new feature id.
    pub fn add_feature(
        &mut self,
        name: &str,
        category: FeatureCategory,
        icon: Option<String>,
    ) -> Option<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.features.push(CarFeature {
            id,
            name: name.to_string(),
            category,
            icon: icon.filter(|i| !i.is_empty()),
        });
        Some(id)
    }

    pub fn remove_feature(&mut self, id: Uuid) {
        self.features.retain(|f| f.id != id);
    }

    /// Assign one of the known branches. Unknown values leave the location
    /// unchanged and return false.
    pub fn set_location(&mut self, value: &str) -> bool {
        let Some(branch) = LOCATIONS.iter().find(|b| b.value == value) else {
            return false;
        };
        self.availability.location = Location {
            name: branch.value.to_string(),
            address: branch.address.to_string(),
            coordinates: Coordinates {
                latitude: branch.latitude,
                longitude: branch.longitude,
            },
        };
        true
    }

    /// Attach an already-hosted image. The first image becomes the main one.
    pub fn add_image_url(&mut self, url: &str) {
        let index = self.images.len() + 1;
        self.images.push(CarImage {
            id: Uuid::new_v4(),
            url: url.to_string(),
            alt: format!("{} Image {}", self.title(), index),
            is_main: index == 1,
        });
    }
}
