//! Domain and wire types for the meal catalog.
//!
//! # Design
//! `Meal` is the canonical shape used by validation, the catalog and the
//! dashboard. `WireMeal` and `WirePayload` mirror the remote `Food` resource
//! and are defined independently from the mock-server crate; integration
//! tests catch any drift between the two.
//!
//! The remote store has no restaurant sub-object. Converting between the two
//! shapes lives in `transform`.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Price used for a new meal when the form leaves price empty.
pub const DEFAULT_PRICE: f64 = 12.99;

/// Whether a restaurant currently takes orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestaurantStatus {
    #[serde(rename = "Open Now")]
    OpenNow,
    Closed,
}

impl RestaurantStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            RestaurantStatus::OpenNow => "Open Now",
            RestaurantStatus::Closed => "Closed",
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, RestaurantStatus::OpenNow)
    }

    pub const fn from_open(open: bool) -> Self {
        if open {
            RestaurantStatus::OpenNow
        } else {
            RestaurantStatus::Closed
        }
    }
}

impl fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status token is neither `Open Now` nor `Closed`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown restaurant status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for RestaurantStatus {
    type Err = UnknownStatus;

    /// Exact match only. `"open now"` or `" Closed"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open Now" => Ok(RestaurantStatus::OpenNow),
            "Closed" => Ok(RestaurantStatus::Closed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub status: RestaurantStatus,
}

/// A catalog entry. Each meal owns its restaurant descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub image_url: String,
    pub restaurant: Restaurant,
    /// Badge for meals created during this session. Never sent to the store.
    #[serde(skip)]
    pub is_new: bool,
}

/// A validated meal that has not been assigned a store id yet.
///
/// Produced by `validation::validate` and consumed by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDraft {
    pub name: String,
    pub price: Option<f64>,
    pub rating: f64,
    pub image_url: String,
    pub restaurant: Restaurant,
}

impl MealDraft {
    /// Timestamp-based id for values that need identity before the store
    /// assigns one.
    pub fn local_id() -> String {
        Utc::now().timestamp_millis().to_string()
    }
}

impl From<&Meal> for MealDraft {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name.clone(),
            price: Some(meal.price),
            rating: meal.rating,
            image_url: meal.image_url.clone(),
            restaurant: meal.restaurant.clone(),
        }
    }
}

/// A record as returned by the remote `Food` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMeal {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub rating: String,
    pub open: bool,
    pub logo: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Body sent on create and update. The store owns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    pub name: String,
    pub avatar: String,
    pub rating: String,
    pub open: bool,
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}
