//! Persistence gateway for cars.
//!
//! The service opens a [`CarUnitOfWork`] per call through [`CarRepository::begin`],
//! runs gateway statements on it and then commits or rolls back. Gateway methods
//! classify failures as `NotFound` or `Internal` only; they never commit.

mod postgres;

pub use postgres::{PgCarRepository, PgCarUnitOfWork};

use crate::error::AppError;
use crate::model::Car;
use async_trait::async_trait;

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Start a transaction. Dropping the returned unit of work without commit rolls it back.
    async fn begin(&self) -> Result<Box<dyn CarUnitOfWork>, AppError>;
}

#[async_trait]
pub trait CarUnitOfWork: Send {
    /// Insert and return the car with its store-assigned id.
    async fn insert(&mut self, car: Car) -> Result<Car, AppError>;

    /// All cars; an empty table is `NotFound`.
    async fn get_all(&mut self) -> Result<Vec<Car>, AppError>;

    async fn get_detail(&mut self, id: i64) -> Result<Car, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}
