#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod state;

pub use client::{RecommendationClient, RecommendationTransport};
pub use error::{NutritionError, Result};
pub use models::{NutritionField, NutritionPreference, PreferenceModel, RecommendedItem};
pub use state::{RecommendationFailure, RequestOutcome};
