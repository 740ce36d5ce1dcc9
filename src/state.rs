//! Shared application state for the car routes.

use crate::service::CarService;
use crate::telemetry::Tracer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn CarService>,
    /// Records one span per handler invocation.
    pub tracer: Arc<dyn Tracer>,
}

impl AppState {
    pub fn new(service: Arc<dyn CarService>, tracer: Arc<dyn Tracer>) -> Self {
        Self { service, tracer }
    }
}
