use std::env;

use anyhow::Context;
use meal_core::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    /// Seed for synthesized prices. `None` seeds from entropy.
    pub price_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let price_seed = match lookup("MEALS_PRICE_SEED").filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("MEALS_PRICE_SEED must be an unsigned integer, got {raw:?}"))?,
            ),
            None => None,
        };
        Ok(Self {
            api_url: lookup("MEALS_API_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            price_seed,
        })
    }
}
