use axum_helpers::{default_limit, default_page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const COLLECTION: &str = "stores";
pub const SEARCH_INDEX: &str = "stores_index";

/// WGS84 coordinates, indexed as a `geo_point`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub lon: f64,
}

/// Store entity - stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Store {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub publish: bool,
    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn new(input: StoreInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            address: input.address,
            city: input.city,
            province: input.province,
            postal_code: input.postal_code,
            location: input.location,
            publish: input.publish,
            logo: input.logo,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn replace_with(&mut self, input: StoreInput) {
        self.name = input.name;
        self.description = input.description;
        self.address = input.address;
        self.city = input.city;
        self.province = input.province;
        self.postal_code = input.postal_code;
        self.location = input.location;
        self.publish = input.publish;
        self.logo = input.logo;
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /stores` and `PUT /stores/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct StoreInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Store name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default, alias = "postalCode")]
    pub postal_code: String,
    #[serde(default)]
    #[validate(nested)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub publish: bool,
    #[serde(default)]
    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo: Option<String>,
}

/// Query parameters for `GET /stores`
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct StoreFilter {
    /// Free-text search on name, address, city and province
    pub search: Option<String>,
    pub publish: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for StoreFilter {
    fn default() -> Self {
        Self {
            search: None,
            publish: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Search-index projection of a store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub location: Option<GeoPoint>,
    pub publish: bool,
    pub logo: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Store> for StoreDocument {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.to_string(),
            name: store.name.clone(),
            description: store.description.clone(),
            address: store.address.clone(),
            city: store.city.clone(),
            province: store.province.clone(),
            postal_code: store.postal_code.clone(),
            location: store.location,
            publish: store.publish,
            logo: store.logo.clone(),
            updated_at: store.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_accepts_camel_case_postal_code() {
        let input: StoreInput = serde_json::from_value(json!({
            "name": "Downtown",
            "postalCode": "10110",
            "location": { "lat": -6.2, "lon": 106.8 }
        }))
        .unwrap();
        assert_eq!(input.postal_code, "10110");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_location_range_is_validated() {
        let input = StoreInput {
            name: "Nowhere".into(),
            location: Some(GeoPoint { lat: 120.0, lon: 0.0 }),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_logo_must_be_url() {
        let input = StoreInput {
            name: "Downtown".into(),
            logo: Some("not a url".into()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut store = Store::new(StoreInput {
            name: "Old".into(),
            ..Default::default()
        });
        let (id, created_at) = (store.id, store.created_at);
        store.replace_with(StoreInput {
            name: "New".into(),
            publish: true,
            ..Default::default()
        });
        assert_eq!(store.id, id);
        assert_eq!(store.created_at, created_at);
        assert_eq!(store.name, "New");
        assert!(store.publish);
    }
}
