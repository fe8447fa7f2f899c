//! Shared helpers for the integration tests: an in-process stand-in for the
//! vehicle REST backend and the pieces needed to mount the dashboard on it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use drivecore::build_tera;
use drivecore::repository::cache::{DEFAULT_TTL, QueryCache};
use drivecore::repository::{CachedRepository, DashboardRepository, HttpRepository};
use serde_json::{Value, json};
use tera::Tera;
use uuid::Uuid;

const VEHICLES_PATH: &str = "/api/v1/vehicles";
const TIMESTAMP: &str = "2024-03-05T10:00:00Z";

/// What the fake backend stores and what it has been asked.
#[derive(Default)]
pub struct BackendState {
    pub vehicles: Vec<Value>,
    pub list_queries: Vec<String>,
    pub get_requests: usize,
    pub updates: Vec<Value>,
    /// When set, every request answers with this status and body.
    pub failure: Option<(u16, Value)>,
}

pub struct FakeBackend {
    pub url: String,
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    /// Starts the backend on a random local port. Must be called inside an
    /// Actix runtime.
    pub fn start(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let data = web::Data::from(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route(VEHICLES_PATH, web::get().to(list))
                .route(VEHICLES_PATH, web::post().to(create))
                .route(&format!("{VEHICLES_PATH}/{{id}}"), web::get().to(get))
                .route(&format!("{VEHICLES_PATH}/{{id}}"), web::put().to(update))
                .route(&format!("{VEHICLES_PATH}/{{id}}"), web::delete().to(delete))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();

        actix_web::rt::spawn(server);

        Self { url, state }
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    pub fn repository(&self) -> DashboardRepository {
        let http = HttpRepository::new(&self.url, Duration::from_secs(5)).unwrap();
        let cache = QueryCache::new(NonZeroUsize::new(64).unwrap(), DEFAULT_TTL);
        CachedRepository::new(http, cache)
    }
}

/// Backend representation of a vehicle with the given plate.
pub fn vehicle(plate_number: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "plate_number": plate_number,
        "vin": null,
        "brand": "Lada",
        "model": "Vesta",
        "year": 2022,
        "color": "Белый",
        "status": "AVAILABLE",
        "mileage_km": 15000,
        "city": "Псков",
        "owner_name": null,
        "osago_policy_number": null,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

pub fn vehicle_id(vehicle: &Value) -> String {
    vehicle["id"].as_str().unwrap().to_string()
}

pub fn tera() -> Tera {
    build_tera(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap()
}

pub fn flash_framework() -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(Key::from(&[7u8; 64][..])).build();
    FlashMessagesFramework::builder(store).build()
}

/// Dashboard service wired to `$backend`, ready for `test::call_service`.
macro_rules! dashboard {
    ($backend:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(common::flash_framework())
                .configure(drivecore::configure)
                .app_data(actix_web::web::Data::new(common::tera()))
                .app_data(actix_web::web::Data::new($backend.repository())),
        )
        .await
    };
}
pub(crate) use dashboard;

type Shared = web::Data<Mutex<BackendState>>;

fn failure(state: &BackendState) -> Option<HttpResponse> {
    state.failure.as_ref().map(|(status, body)| {
        HttpResponse::build(StatusCode::from_u16(*status).unwrap()).json(body)
    })
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "detail": "Автомобиль не найден" }))
}

fn merge(target: &mut Value, fields: Value) {
    if let (Some(target), Value::Object(fields)) = (target.as_object_mut(), fields) {
        target.extend(fields);
    }
}

async fn list(req: HttpRequest, state: Shared) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.list_queries.push(req.query_string().to_string());
    if let Some(response) = failure(&state) {
        return response;
    }

    let params = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|query| query.into_inner())
        .unwrap_or_default();
    let number = |name: &str, default: u32| {
        params
            .get(name)
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(default)
    };

    let page = number("page", 1).max(1);
    let page_size = number("page_size", 10).max(1);
    let items: Vec<&Value> = state
        .vehicles
        .iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();

    HttpResponse::Ok().json(json!({
        "items": items,
        "total": state.vehicles.len(),
        "page": page,
        "page_size": page_size,
    }))
}

async fn get(id: web::Path<String>, state: Shared) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.get_requests += 1;
    if let Some(response) = failure(&state) {
        return response;
    }

    match state.vehicles.iter().find(|v| v["id"].as_str() == Some(id.as_str())) {
        Some(vehicle) => HttpResponse::Ok().json(vehicle),
        None => not_found(),
    }
}

async fn create(body: web::Json<Value>, state: Shared) -> HttpResponse {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    let mut vehicle = json!({
        "id": Uuid::new_v4(),
        "vin": null,
        "color": null,
        "city": null,
        "owner_name": null,
        "osago_policy_number": null,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    });
    merge(&mut vehicle, body.into_inner());
    state.vehicles.push(vehicle.clone());

    HttpResponse::Created().json(vehicle)
}

async fn update(id: web::Path<String>, body: web::Json<Value>, state: Shared) -> HttpResponse {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    let body = body.into_inner();
    state.updates.push(body.clone());
    match state
        .vehicles
        .iter_mut()
        .find(|v| v["id"].as_str() == Some(id.as_str()))
    {
        Some(vehicle) => {
            merge(vehicle, body);
            HttpResponse::Ok().json(vehicle.clone())
        }
        None => not_found(),
    }
}

async fn delete(id: web::Path<String>, state: Shared) -> HttpResponse {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    let before = state.vehicles.len();
    state
        .vehicles
        .retain(|v| v["id"].as_str() != Some(id.as_str()));
    if state.vehicles.len() == before {
        return not_found();
    }
    HttpResponse::NoContent().finish()
}
