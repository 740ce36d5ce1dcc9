//! Structural validation of car requests.

use crate::error::{AppError, FieldViolation};
use crate::model::{parse_date, InsertCarRequest};

pub struct RequestValidator;

impl RequestValidator {
    /// Check every field and report all violations together.
    pub fn validate_insert(req: &InsertCarRequest) -> Result<(), AppError> {
        let mut violations = Vec::new();
        if req.name.is_empty() {
            violations.push(FieldViolation::new("Name", "required"));
        }
        if req.price == 0.0 {
            violations.push(FieldViolation::new("Price", "required"));
        } else if req.price < 0.0 {
            violations.push(FieldViolation::new("Price", "gt"));
        }
        if !req.release_date.is_empty() && parse_date(&req.release_date).is_none() {
            violations.push(FieldViolation::new("ReleaseDate", "datetime"));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}
