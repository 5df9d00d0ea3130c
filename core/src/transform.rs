//! Mapping between `Meal` and the remote `Food` record.
//!
//! # Design
//! The two directions are not inverses. `from_wire` re-derives restaurant
//! identity from the meal id every time and invents a price when the store
//! has none, so `from_wire(to_wire(m))` only preserves the fields the wire
//! actually carries.
//!
//! Synthesized prices come from a `PriceSource` so tests can pin them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::TransformError;
use crate::types::{Meal, MealDraft, Restaurant, RestaurantStatus, WireMeal, WirePayload};

/// Lower bound (inclusive) of a synthesized price.
pub const SYNTHETIC_PRICE_MIN: u32 = 5;
/// Upper bound (exclusive) of a synthesized price.
pub const SYNTHETIC_PRICE_MAX: u32 = 25;

/// Supplies prices for wire records that carry none.
pub trait PriceSource {
    fn next_price(&mut self) -> f64;
}

impl<P: PriceSource + ?Sized> PriceSource for &mut P {
    fn next_price(&mut self) -> f64 {
        (**self).next_price()
    }
}

/// Whole-number prices in `[5, 25)` drawn from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededPrices {
    rng: StdRng,
}

impl SeededPrices {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl PriceSource for SeededPrices {
    fn next_price(&mut self) -> f64 {
        f64::from(self.rng.gen_range(SYNTHETIC_PRICE_MIN..SYNTHETIC_PRICE_MAX))
    }
}

/// Always returns the same price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPrice(pub f64);

impl PriceSource for FixedPrice {
    fn next_price(&mut self) -> f64 {
        self.0
    }
}

pub fn to_wire(draft: &MealDraft) -> WirePayload {
    WirePayload {
        name: draft.name.clone(),
        avatar: draft.image_url.clone(),
        rating: draft.rating.to_string(),
        open: draft.restaurant.status.is_open(),
        logo: draft.restaurant.logo_url.clone(),
        price: draft.price.map(|price| price.to_string()),
    }
}

pub fn from_wire<P: PriceSource + ?Sized>(wire: WireMeal, prices: &mut P) -> Result<Meal, TransformError> {
    let rating = parse_number(&wire.rating).ok_or_else(|| TransformError::Rating(wire.rating.clone()))?;

    let price = match wire.price.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_number(raw).ok_or_else(|| TransformError::Price(raw.to_string()))?,
        _ => prices.next_price(),
    };

    Ok(Meal {
        restaurant: Restaurant {
            id: wire.id.clone(),
            name: format!("Restaurant {}", wire.id),
            logo_url: wire.logo,
            status: RestaurantStatus::from_open(wire.open),
        },
        id: wire.id,
        name: wire.name,
        price,
        rating,
        image_url: wire.avatar,
        is_new: false,
    })
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
