//! Car service: validate, open one transaction, delegate to the gateway, commit or roll back.

use crate::error::AppError;
use crate::model::{parse_date, Car, InsertCarRequest, InsertCarResponse};
use crate::repository::{CarRepository, CarUnitOfWork};
use crate::service::RequestValidator;
use crate::telemetry::{record_json, Span, Tracer};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::Instrument;

#[async_trait]
pub trait CarService: Send + Sync {
    async fn insert(&self, request: InsertCarRequest) -> Result<InsertCarResponse, AppError>;
    async fn get_all(&self) -> Result<Vec<InsertCarResponse>, AppError>;
    async fn get_detail(&self, id: i64) -> Result<InsertCarResponse, AppError>;
}

pub struct CarServiceImpl {
    repository: Arc<dyn CarRepository>,
    tracer: Arc<dyn Tracer>,
}

impl CarServiceImpl {
    pub fn new(repository: Arc<dyn CarRepository>, tracer: Arc<dyn Tracer>) -> Self {
        Self { repository, tracer }
    }
}

/// Commit on success; on a gateway error roll back and return that error unchanged.
async fn finish<T>(
    uow: Box<dyn CarUnitOfWork>,
    result: Result<T, AppError>,
    span: &mut dyn Span,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(e) => {
            span.record("error", &e.to_string());
            if let Err(rb) = uow.rollback().await {
                tracing::warn!(error = %rb, "rollback failed");
            }
            Err(e)
        }
    }
}

fn to_entity(request: InsertCarRequest) -> Car {
    // validated beforehand, so a non-empty date always parses
    let release_date = if request.release_date.is_empty() {
        None
    } else {
        parse_date(&request.release_date)
    };
    Car {
        id: 0,
        name: request.name,
        price: request.price,
        release_date,
    }
}

#[async_trait]
impl CarService for CarServiceImpl {
    async fn insert(&self, request: InsertCarRequest) -> Result<InsertCarResponse, AppError> {
        let mut span = self.tracer.start_span("Service Insert");
        record_json(span.as_mut(), "request", &request);

        if let Err(e) = RequestValidator::validate_insert(&request) {
            span.record("error", &e.to_string());
            return Err(e);
        }
        let input = to_entity(request);

        let mut uow = self.repository.begin().await?;
        let result = uow.insert(input).instrument(span.context()).await;
        let car = finish(uow, result, span.as_mut()).await?;

        let response = InsertCarResponse::from(car);
        record_json(span.as_mut(), "response", &response);
        tracing::info!(id = response.id, "car inserted");
        Ok(response)
    }

    async fn get_all(&self) -> Result<Vec<InsertCarResponse>, AppError> {
        let mut span = self.tracer.start_span("Service GetAll");

        let mut uow = self.repository.begin().await?;
        let result = uow.get_all().instrument(span.context()).await;
        let cars = finish(uow, result, span.as_mut()).await?;

        let response: Vec<InsertCarResponse> = cars.into_iter().map(InsertCarResponse::from).collect();
        record_json(span.as_mut(), "response", &response);
        Ok(response)
    }

    async fn get_detail(&self, id: i64) -> Result<InsertCarResponse, AppError> {
        let mut span = self.tracer.start_span("Service GetDetail");
        span.record("id", &id.to_string());

        let mut uow = self.repository.begin().await.map_err(|e| {
            span.record("error", &e.to_string());
            match e {
                AppError::Internal(_) => e,
                other => AppError::Internal(other.to_string()),
            }
        })?;
        let result = uow.get_detail(id).instrument(span.context()).await;
        let car = finish(uow, result, span.as_mut()).await?;

        let response = InsertCarResponse::from(car);
        record_json(span.as_mut(), "response", &response);
        Ok(response)
    }
}
