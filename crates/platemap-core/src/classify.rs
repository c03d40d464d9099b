//! Ordinal classification bands for map coloring and filtering
//!
//! Both mappings are monotonic step functions with inclusive lower bounds.
//! Absent input maps to `Unknown` instead of being coerced into a band, so
//! "no data" stays representable end-to-end.

use serde::{Deserialize, Serialize};

const BUDGET_MAX_PRICE: f64 = 300.0;
const MODERATE_MAX_PRICE: f64 = 700.0;

const POSITIVE_MIN_RATING: f64 = 4.0;
const NEUTRAL_MIN_RATING: f64 = 2.5;

/// Price band for a two-person meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Budget,
    Moderate,
    Expensive,
    /// No price data; excluded from tier-based filters
    Unknown,
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PriceTier::Budget => "Budget",
            PriceTier::Moderate => "Moderate",
            PriceTier::Expensive => "Expensive",
            PriceTier::Unknown => "Unknown",
        })
    }
}

/// Sentiment band derived from a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// No rating data; surfaced explicitly, never a default band
    Unknown,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::Unknown => "Unknown",
        })
    }
}

/// Map a price for two to its tier
pub fn price_tier(price_for_two: Option<f64>) -> PriceTier {
    match price_for_two {
        Some(price) if !price.is_finite() => PriceTier::Unknown,
        Some(price) if price <= BUDGET_MAX_PRICE => PriceTier::Budget,
        Some(price) if price <= MODERATE_MAX_PRICE => PriceTier::Moderate,
        Some(_) => PriceTier::Expensive,
        None => PriceTier::Unknown,
    }
}

/// Map a rating to its sentiment band
pub fn sentiment(rating: Option<f64>) -> Sentiment {
    match rating {
        Some(rating) if !rating.is_finite() => Sentiment::Unknown,
        Some(rating) if rating >= POSITIVE_MIN_RATING => Sentiment::Positive,
        Some(rating) if rating >= NEUTRAL_MIN_RATING => Sentiment::Neutral,
        Some(_) => Sentiment::Negative,
        None => Sentiment::Unknown,
    }
}
