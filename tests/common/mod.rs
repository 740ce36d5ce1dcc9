//! Test doubles for the repository and service ports.

#![allow(dead_code)]

use async_trait::async_trait;
use car_service::{
    AppError, AppState, Car, CarRepository, CarService, CarServiceImpl, CarUnitOfWork, InsertCarRequest,
    InsertCarResponse, NoopTracer, Span, Tracer,
};
use std::sync::{Arc, Mutex};

/// Which gateway operation should fail, and how.
#[derive(Clone, Debug)]
pub enum Failure {
    Insert(fn() -> AppError),
    GetAll(fn() -> AppError),
    GetDetail(fn() -> AppError),
    Begin(fn() -> AppError),
}

#[derive(Default)]
struct Store {
    rows: Vec<Car>,
    next_id: i64,
    commits: usize,
    rollbacks: usize,
    gateway_calls: usize,
}

/// In-memory car table with transactional staging.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    store: Arc<Mutex<Store>>,
    failure: Arc<Mutex<Option<Failure>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Car>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            store.next_id = rows.iter().map(|c| c.id).max().unwrap_or(0);
            store.rows = rows;
        }
        repo
    }

    pub fn fail_with(&self, failure: Failure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn rows(&self) -> Vec<Car> {
        self.store.lock().unwrap().rows.clone()
    }

    pub fn commits(&self) -> usize {
        self.store.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.store.lock().unwrap().rollbacks
    }

    pub fn gateway_calls(&self) -> usize {
        self.store.lock().unwrap().gateway_calls
    }

    fn failure(&self) -> Option<Failure> {
        self.failure.lock().unwrap().clone()
    }
}

#[async_trait]
impl CarRepository for MemoryRepository {
    async fn begin(&self) -> Result<Box<dyn CarUnitOfWork>, AppError> {
        if let Some(Failure::Begin(f)) = self.failure() {
            return Err(f());
        }
        Ok(Box::new(MemoryUnitOfWork {
            repo: self.clone(),
            staged: Vec::new(),
        }))
    }
}

pub struct MemoryUnitOfWork {
    repo: MemoryRepository,
    staged: Vec<Car>,
}

#[async_trait]
impl CarUnitOfWork for MemoryUnitOfWork {
    async fn insert(&mut self, mut car: Car) -> Result<Car, AppError> {
        self.repo.store.lock().unwrap().gateway_calls += 1;
        if let Some(Failure::Insert(f)) = self.repo.failure() {
            return Err(f());
        }
        let mut store = self.repo.store.lock().unwrap();
        store.next_id += 1;
        car.id = store.next_id;
        self.staged.push(car.clone());
        Ok(car)
    }

    async fn get_all(&mut self) -> Result<Vec<Car>, AppError> {
        self.repo.store.lock().unwrap().gateway_calls += 1;
        if let Some(Failure::GetAll(f)) = self.repo.failure() {
            return Err(f());
        }
        let rows = self.repo.rows();
        if rows.is_empty() {
            return Err(AppError::not_found());
        }
        Ok(rows)
    }

    async fn get_detail(&mut self, id: i64) -> Result<Car, AppError> {
        self.repo.store.lock().unwrap().gateway_calls += 1;
        if let Some(Failure::GetDetail(f)) = self.repo.failure() {
            return Err(f());
        }
        self.repo
            .rows()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(AppError::not_found)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryUnitOfWork { repo, staged } = *self;
        let mut store = repo.store.lock().unwrap();
        store.rows.extend(staged);
        store.commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.repo.store.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

/// Canned service results; records whether it was called.
pub struct StubService {
    pub insert: Mutex<Option<Result<InsertCarResponse, AppError>>>,
    pub get_all: Mutex<Option<Result<Vec<InsertCarResponse>, AppError>>>,
    pub get_detail: Mutex<Option<Result<InsertCarResponse, AppError>>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubService {
    pub fn new() -> Self {
        Self {
            insert: Mutex::new(None),
            get_all: Mutex::new(None),
            get_detail: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn take<T>(slot: &Mutex<Option<Result<T, AppError>>>, op: &str) -> Result<T, AppError> {
    slot.lock()
        .unwrap()
        .take()
        .unwrap_or_else(|| Err(AppError::Internal(format!("unexpected call to {}", op))))
}

#[async_trait]
impl CarService for StubService {
    async fn insert(&self, _request: InsertCarRequest) -> Result<InsertCarResponse, AppError> {
        self.calls.lock().unwrap().push("insert".into());
        take(&self.insert, "insert")
    }

    async fn get_all(&self) -> Result<Vec<InsertCarResponse>, AppError> {
        self.calls.lock().unwrap().push("get_all".into());
        take(&self.get_all, "get_all")
    }

    async fn get_detail(&self, id: i64) -> Result<InsertCarResponse, AppError> {
        self.calls.lock().unwrap().push(format!("get_detail:{}", id));
        take(&self.get_detail, "get_detail")
    }
}

type SpanLog = Arc<Mutex<Vec<(&'static str, Vec<(&'static str, String)>)>>>;

/// Keeps every started span with the fields recorded on it, in start order.
#[derive(Clone, Default)]
pub struct RecordingTracer {
    spans: SpanLog,
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn span_names(&self) -> Vec<&'static str> {
        self.spans.lock().unwrap().iter().map(|(name, _)| *name).collect()
    }

    /// Fields of the first span called `name`; panics if it was never started.
    pub fn fields(&self, name: &str) -> Vec<(&'static str, String)> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, fields)| fields.clone())
            .unwrap_or_else(|| panic!("span {} was not started", name))
    }

    pub fn field(&self, span: &str, key: &str) -> Option<String> {
        self.fields(span).into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

struct RecordingSpan {
    spans: SpanLog,
    index: usize,
}

impl Span for RecordingSpan {
    fn record(&mut self, key: &'static str, value: &str) {
        self.spans.lock().unwrap()[self.index].1.push((key, value.to_string()));
    }
}

impl Tracer for RecordingTracer {
    fn start_span(&self, name: &'static str) -> Box<dyn Span> {
        let mut spans = self.spans.lock().unwrap();
        spans.push((name, Vec::new()));
        Box::new(RecordingSpan {
            spans: self.spans.clone(),
            index: spans.len() - 1,
        })
    }
}

pub fn service_over(repo: &MemoryRepository) -> CarServiceImpl {
    CarServiceImpl::new(Arc::new(repo.clone()), Arc::new(NoopTracer))
}

pub fn service_traced(repo: &MemoryRepository, tracer: &RecordingTracer) -> CarServiceImpl {
    CarServiceImpl::new(Arc::new(repo.clone()), Arc::new(tracer.clone()))
}

pub fn state_with_service(service: Arc<dyn CarService>) -> AppState {
    AppState::new(service, Arc::new(NoopTracer))
}

pub fn state_traced(service: Arc<dyn CarService>, tracer: &RecordingTracer) -> AppState {
    AppState::new(service, Arc::new(tracer.clone()))
}

pub fn toyota() -> Car {
    Car {
        id: 1,
        name: "Toyota".into(),
        price: 614_000_000.0,
        release_date: chrono::NaiveDate::from_ymd_opt(2020, 10, 10),
    }
}
