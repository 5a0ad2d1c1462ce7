/// Common test utilities for integration tests
///
/// - An in-memory `RegistrationStore` that mimics the PostgreSQL schema:
///   generated ids, unique email, unique insurance number, all-or-nothing inserts
/// - Fault injection for the patient insert and for database outages
/// - Router construction and form request helpers

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
};
use intelmed_api::app::{build_router, AppState};
use intelmed_api::config::{ApiConfig, Config, DatabaseConfig, LogFormat, RedirectConfig};
use intelmed_shared::models::patient::CreatePatient;
use intelmed_shared::models::user::CreateUser;
use intelmed_shared::registration::{
    NewPatientProfile, RegisteredPatient, RegistrationError, RegistrationStore, Violation,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tower::Service as _;

pub const SUCCESS_URL: &str = "/group_projectDBWS/feedback_success.html";
pub const ERROR_URL: &str = "/group_projectDBWS/feedback_error.html";

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: i64,
    pub data: CreateUser,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<StoredUser>,
    patients: Vec<CreatePatient>,
}

/// In-memory stand-in for the PostgreSQL store
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_patient_insert: AtomicBool,
    offline: AtomicBool,
}

impl InMemoryStore {
    pub fn users(&self) -> Vec<StoredUser> {
        self.tables.lock().unwrap().users.clone()
    }

    pub fn patients(&self) -> Vec<CreatePatient> {
        self.tables.lock().unwrap().patients.clone()
    }

    /// Makes every following patient insert fail with a foreign key violation
    pub fn fail_patient_insert(&self, fail: bool) {
        self.fail_patient_insert.store(fail, Ordering::SeqCst);
    }

    /// Simulates an unreachable database
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), RegistrationError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RegistrationError::Connectivity("pool timed out".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for InMemoryStore {
    async fn register(
        &self,
        user: CreateUser,
        profile: NewPatientProfile,
    ) -> Result<RegisteredPatient, RegistrationError> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();

        // user insert
        if tables.users.iter().any(|u| u.data.email == user.email) {
            return Err(RegistrationError::Integrity {
                violation: Violation::Unique,
                constraint: "user_email_key".to_string(),
            });
        }
        let user_id = tables.next_id + 1;

        // patient insert; nothing is written unless both succeed
        if self.fail_patient_insert.load(Ordering::SeqCst) {
            return Err(RegistrationError::Integrity {
                violation: Violation::ForeignKey,
                constraint: "patient_user_id_fkey".to_string(),
            });
        }
        if tables
            .patients
            .iter()
            .any(|p| p.health_insurance == profile.health_insurance)
        {
            return Err(RegistrationError::Integrity {
                violation: Violation::Unique,
                constraint: "patient_health_insurance_key".to_string(),
            });
        }

        tables.next_id = user_id;
        tables.users.push(StoredUser { id: user_id, data: user });
        tables.patients.push(CreatePatient {
            health_insurance: profile.health_insurance.clone(),
            user_id,
            area: profile.area,
            address: profile.address,
        });

        Ok(RegisteredPatient {
            user_id,
            health_insurance: profile.health_insurance,
        })
    }

    async fn ping(&self) -> Result<(), RegistrationError> {
        self.check_online()
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            production: false,
            registration_path: "/patients".to_string(),
            static_dir: None,
            max_concurrent_hashes: 2,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
        redirects: RedirectConfig::default(),
        log_format: LogFormat::Pretty,
    }
}

/// Router plus handles on the state behind it
pub struct TestApp {
    pub app: axum::Router,
    pub store: Arc<InMemoryStore>,
    pub hash_permits: Arc<Semaphore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let state = AppState::new(store.clone(), config);
        let hash_permits = state.hash_permits.clone();
        let app = build_router(state);
        Self {
            app,
            store,
            hash_permits,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }
}

/// The registration form filled in for Jane Doe
pub fn jane_doe() -> Vec<(&'static str, &'static str)> {
    vec![
        ("health_insurance_number", "HI123"),
        ("area", "North"),
        ("address", "1 Main St"),
        ("firstname", "Jane"),
        ("lastname", "Doe"),
        ("sex", "F"),
        ("phonenumber", "555-0100"),
        ("email", "jane@example.com"),
        ("password", "secret"),
    ]
}

/// Replaces one field of a form
pub fn with_field<'a>(
    mut fields: Vec<(&'a str, &'a str)>,
    name: &str,
    value: &'a str,
) -> Vec<(&'a str, &'a str)> {
    for field in fields.iter_mut() {
        if field.0 == name {
            field.1 = value;
        }
    }
    fields
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
