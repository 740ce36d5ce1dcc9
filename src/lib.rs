//! Car service: REST create/list/detail over a PostgreSQL `cars` table.
//!
//! Requests flow handler → service → repository. The service owns one
//! transaction per call; handlers are the only layer that shapes HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, FieldViolation};
pub use model::{Car, InsertCarRequest, InsertCarResponse};
pub use repository::{CarRepository, CarUnitOfWork, PgCarRepository};
pub use response::{code_to_status, ApiResponse};
pub use routes::{app_router, car_routes, common_routes, common_routes_with_ready};
pub use service::{CarService, CarServiceImpl};
pub use state::AppState;
pub use telemetry::{NoopTracer, Span, Tracer, TracingTracer};
