//! Car entity and its wire DTOs.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::OnceLock;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored representation of a car. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub release_date: Option<NaiveDate>,
}

/// Body of `POST /car`. Missing fields fall back to zero values and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertCarRequest {
    pub name: String,
    pub price: f64,
    /// `YYYY-MM-DD`, or empty for no date.
    pub release_date: String,
}

/// Car as returned by create, list and detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertCarResponse {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub release_date: String,
}

/// Whole-number prices go out as JSON integers (`500000000`, not `500000000.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if price.is_finite() && price.fract() == 0.0 && price.abs() <= MAX_EXACT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl From<Car> for InsertCarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            name: car.name,
            price: car.price,
            release_date: car.release_date.map(format_date).unwrap_or_default(),
        }
    }
}

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"))
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !date_shape().is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}
