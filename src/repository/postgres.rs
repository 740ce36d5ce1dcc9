//! PostgreSQL gateway: one parameterized statement per operation, inside a transaction.

use crate::error::AppError;
use crate::model::Car;
use crate::repository::{CarRepository, CarUnitOfWork};
use crate::telemetry::{record_json, Tracer};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::sync::Arc;

const INSERT_CAR: &str = "INSERT INTO cars (name, price, release_date) VALUES ($1, $2, $3) RETURNING id";
const SELECT_ALL_CARS: &str = "SELECT id, name, price, release_date FROM cars ORDER BY id";
const SELECT_CAR_BY_ID: &str = "SELECT id, name, price, release_date FROM cars WHERE id = $1";

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    name: String,
    price: f64,
    release_date: Option<NaiveDate>,
}

impl From<CarRow> for Car {
    fn from(r: CarRow) -> Self {
        Car {
            id: r.id,
            name: r.name,
            price: r.price,
            release_date: r.release_date,
        }
    }
}

fn internal(e: sqlx::Error) -> AppError {
    AppError::Internal(e.to_string())
}

#[derive(Clone)]
pub struct PgCarRepository {
    pool: PgPool,
    tracer: Arc<dyn Tracer>,
}

impl PgCarRepository {
    pub fn new(pool: PgPool, tracer: Arc<dyn Tracer>) -> Self {
        Self { pool, tracer }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn begin(&self) -> Result<Box<dyn CarUnitOfWork>, AppError> {
        let tx = self.pool.begin().await.map_err(internal)?;
        Ok(Box::new(PgCarUnitOfWork {
            tx,
            tracer: self.tracer.clone(),
        }))
    }
}

pub struct PgCarUnitOfWork {
    tx: Transaction<'static, Postgres>,
    tracer: Arc<dyn Tracer>,
}

#[async_trait]
impl CarUnitOfWork for PgCarUnitOfWork {
    async fn insert(&mut self, car: Car) -> Result<Car, AppError> {
        let mut span = self.tracer.start_span("Repository Insert");
        record_json(span.as_mut(), "request", &car);
        let result = insert_car(&mut self.tx, car).await;
        if let Err(e) = &result {
            span.record("error", &e.to_string());
        }
        result
    }

    async fn get_all(&mut self) -> Result<Vec<Car>, AppError> {
        let mut span = self.tracer.start_span("Repository GetAll");
        let result = select_all_cars(&mut self.tx).await;
        match &result {
            Ok(cars) => record_json(span.as_mut(), "response", cars),
            Err(e) => span.record("error", &e.to_string()),
        }
        result
    }

    async fn get_detail(&mut self, id: i64) -> Result<Car, AppError> {
        let mut span = self.tracer.start_span("Repository GetDetail");
        span.record("id", &id.to_string());
        let result = select_car_by_id(&mut self.tx, id).await;
        match &result {
            Ok(car) => record_json(span.as_mut(), "response", car),
            Err(e) => span.record("error", &e.to_string()),
        }
        result
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await.map_err(internal)
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(internal)
    }
}

async fn insert_car(conn: &mut PgConnection, mut car: Car) -> Result<Car, AppError> {
    tracing::debug!(sql = %INSERT_CAR, name = %car.name, "query (tx)");
    let id: i64 = sqlx::query_scalar(INSERT_CAR)
        .bind(&car.name)
        .bind(car.price)
        .bind(car.release_date)
        .fetch_one(&mut *conn)
        .await
        .map_err(internal)?;
    car.id = id;
    Ok(car)
}

async fn select_all_cars(conn: &mut PgConnection) -> Result<Vec<Car>, AppError> {
    tracing::debug!(sql = %SELECT_ALL_CARS, "query (tx)");
    let rows: Vec<CarRow> = sqlx::query_as(SELECT_ALL_CARS)
        .fetch_all(&mut *conn)
        .await
        .map_err(internal)?;
    if rows.is_empty() {
        return Err(AppError::not_found());
    }
    Ok(rows.into_iter().map(Car::from).collect())
}

async fn select_car_by_id(conn: &mut PgConnection, id: i64) -> Result<Car, AppError> {
    tracing::debug!(sql = %SELECT_CAR_BY_ID, id, "query (tx)");
    let row: Option<CarRow> = sqlx::query_as(SELECT_CAR_BY_ID)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(internal)?;
    row.map(Car::from).ok_or_else(AppError::not_found)
}
