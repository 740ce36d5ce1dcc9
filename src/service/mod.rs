//! Domain service for cars: validation, transaction handling, DTO mapping.

mod car;
mod validation;
pub use car::{CarService, CarServiceImpl};
pub use validation::RequestValidator;
