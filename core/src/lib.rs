//! Data layer for the meal catalog: validation, wire mapping, sync and state.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host supplies a
//! `Transport`, and `MealService` runs one round trip per operation on top
//! of it.
//!
//! # Design
//! - `MealClient` is stateless; it holds only the base URL of the `Food`
//!   resource.
//! - `transform` is the only place that knows the wire shape. Everything
//!   above it works with `Meal`.
//! - `Catalog` holds the collection and search results, `Dashboard`
//!   coordinates dialogs, validation and remote calls on top of it.
//! - Wire DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod catalog;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod notify;
pub mod service;
pub mod transform;
pub mod types;
pub mod validation;

pub use catalog::{Catalog, EmptyState, FEATURED_LIMIT};
pub use client::{MealClient, DEFAULT_BASE_URL};
pub use dashboard::{Dashboard, DashboardError, ModalState};
pub use error::{ClientError, FetchError, Operation, TransformError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notify::{Level, Notification, NotificationLog, Notifier, TracingNotifier};
pub use service::MealService;
pub use transform::{from_wire, to_wire, FixedPrice, PriceSource, SeededPrices};
pub use types::{Meal, MealDraft, Restaurant, RestaurantStatus, WireMeal, WirePayload, DEFAULT_PRICE};
pub use validation::{validate, Field, FormState, MealForm, ValidationErrors, ValidationRules};
