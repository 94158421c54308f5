//! In-memory doubles shared by the crate's own tests and by downstream
//! integration tests: a scripted transport, a CRUD-faithful in-memory
//! backend, and recording navigator/hook implementations.

use crate::entity_model::{EntitySpec, FieldSpec, FieldValue, Rule};
use crate::identity::{EntityId, Identified};
use crate::resolver::Navigator;
use crate::rest_client::{Transport, WireRequest, WireResponse};
use crate::save::SaveHooks;
use crate::{AppError, Entity, Ymd};
use async_trait::async_trait;
use chrono::NaiveDate;
use http::{Method, StatusCode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::serde_as;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted transport: answers from a queue, records every request.
/// An optional latency makes in-flight states observable under a paused
/// tokio clock.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<WireRequest>>,
    responses: Mutex<VecDeque<Result<WireResponse, AppError>>>,
    latency: Option<Duration>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        FakeTransport { latency: Some(latency), ..Self::default() }
    }

    pub fn push_ok(&self, body: Value) {
        self.push(Ok(WireResponse::ok(StatusCode::OK, body)));
    }

    pub fn push_empty(&self, status: StatusCode) {
        self.push(Ok(WireResponse::empty(status)));
    }

    pub fn push_err(&self, err: AppError) {
        self.push(Err(err));
    }

    pub fn push(&self, response: Result<WireResponse, AppError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, req: WireRequest) -> Result<WireResponse, AppError> {
        self.requests.lock().unwrap().push(req);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(WireResponse::empty(StatusCode::OK)),
        }
    }
}

/// CRUD-faithful in-memory backend keyed by resource path. Ids are
/// server-assigned on POST, absence is a success status with an empty body.
pub struct MemoryBackend {
    store: Mutex<HashMap<String, BTreeMap<EntityId, Value>>>,
    next_id: AtomicI64,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend { store: Mutex::new(HashMap::new()), next_id: AtomicI64::new(1000) }
    }

    /// Seeds one record under its embedded id.
    pub fn seed(&self, resource: &str, record: Value) {
        let id = record.get("id").and_then(Value::as_i64).expect("seed record needs an id");
        self.store.lock().unwrap().entry(resource.to_string()).or_default().insert(id, record);
    }

    pub fn record(&self, resource: &str, id: EntityId) -> Option<Value> {
        self.store.lock().unwrap().get(resource).and_then(|t| t.get(&id)).cloned()
    }

    pub fn len(&self, resource: &str) -> usize {
        self.store.lock().unwrap().get(resource).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, resource: &str) -> bool {
        self.len(resource) == 0
    }

    fn split_path(path: &str) -> (String, Option<EntityId>) {
        if let Some((resource, tail)) = path.rsplit_once('/') {
            if let Ok(id) = tail.parse::<EntityId>() {
                return (resource.to_string(), Some(id));
            }
        }
        (path.to_string(), None)
    }

    fn body_of(req: &WireRequest) -> Result<Value, AppError> {
        req.body
            .clone()
            .ok_or_else(|| AppError::BadRequest(format!("missing body for {} {}", req.method, req.path)))
    }
}

#[async_trait]
impl Transport for MemoryBackend {
    async fn execute(&self, req: WireRequest) -> Result<WireResponse, AppError> {
        let (resource, id) = Self::split_path(&req.path);
        let mut store = self.store.lock().unwrap();
        let table = store.entry(resource).or_default();
        match (req.method.clone(), id) {
            (Method::GET, Some(id)) => match table.get(&id) {
                Some(record) => Ok(WireResponse::ok(StatusCode::OK, record.clone())),
                None => Ok(WireResponse::empty(StatusCode::OK)),
            },
            (Method::GET, None) => {
                let all: Vec<Value> = table.values().cloned().collect();
                Ok(WireResponse::ok(StatusCode::OK, Value::Array(all)))
            }
            (Method::POST, None) => {
                let mut record = Self::body_of(&req)?;
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                record["id"] = Value::from(id);
                table.insert(id, record.clone());
                Ok(WireResponse::ok(StatusCode::CREATED, record))
            }
            (Method::PUT, Some(id)) => {
                if !table.contains_key(&id) {
                    return Ok(WireResponse::empty(StatusCode::NOT_FOUND));
                }
                let record = Self::body_of(&req)?;
                table.insert(id, record.clone());
                Ok(WireResponse::ok(StatusCode::OK, record))
            }
            (Method::PATCH, Some(id)) => {
                let patch = Self::body_of(&req)?;
                match table.get_mut(&id) {
                    Some(Value::Object(record)) => {
                        if let Value::Object(fields) = patch {
                            for (key, value) in fields {
                                record.insert(key, value);
                            }
                        }
                        Ok(WireResponse::ok(StatusCode::OK, Value::Object(record.clone())))
                    }
                    _ => Ok(WireResponse::empty(StatusCode::NOT_FOUND)),
                }
            }
            (Method::DELETE, Some(id)) => {
                table.remove(&id);
                Ok(WireResponse::empty(StatusCode::NO_CONTENT))
            }
            (method, _) => Err(AppError::BadRequest(format!("unroutable {} {}", method, req.path))),
        }
    }
}

/// Records navigation instead of performing it.
#[derive(Default)]
pub struct RecordingNavigator {
    pub events: Vec<&'static str>,
}

impl Navigator for RecordingNavigator {
    fn back(&mut self) {
        self.events.push("back");
    }

    fn not_found(&mut self) {
        self.events.push("not_found");
    }
}

/// Records hook invocations in order, shareable across a spawned save.
#[derive(Clone, Default)]
pub struct RecordingHooks {
    pub events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn taken(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl<E> SaveHooks<E> for RecordingHooks {
    fn on_success(&mut self, _saved: &E) {
        self.events.lock().unwrap().push("success");
    }

    fn on_error(&mut self, _err: &AppError) {
        self.events.lock().unwrap().push("error");
    }

    fn on_finalize(&mut self) {
        self.events.lock().unwrap().push("finalize");
    }
}

// ---------- Sample entity exercised by the engine tests ----------

#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slip {
    pub id: Option<EntityId>,
    pub note: Option<String>,
    #[serde(default)]
    #[serde_as(as = "Option<Ymd>")]
    pub issued_on: Option<NaiveDate>,
    pub copies: Option<i64>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<EntityId>,
    pub label: Option<String>,
}

static SLIP_SPEC: Lazy<EntitySpec<Slip>> = Lazy::new(|| EntitySpec {
    name: "slip",
    resource: "api/slips",
    seed: || Slip { id: None, note: None, issued_on: None, copies: None, tags: Vec::new() },
    fields: vec![
        FieldSpec { name: "note", rules: &[Rule::Required], value: |s| FieldValue::Text(s.note.clone()) },
        FieldSpec { name: "issuedOn", rules: &[], value: |s| FieldValue::Date(s.issued_on) },
        FieldSpec {
            name: "copies",
            rules: &[Rule::Required, Rule::Min(0)],
            value: |s| FieldValue::Int(s.copies),
        },
        FieldSpec {
            name: "tags",
            rules: &[],
            value: |s| FieldValue::References(s.tags.iter().filter_map(|t| t.id).collect()),
        },
    ],
});

impl Identified for Slip {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Slip {
    fn spec() -> &'static EntitySpec<Self> {
        &SLIP_SPEC
    }

    fn set_id(&mut self, id: Option<EntityId>) {
        self.id = id;
    }
}

static TAG_SPEC: Lazy<EntitySpec<Tag>> = Lazy::new(|| EntitySpec {
    name: "tag",
    resource: "api/tags",
    seed: || Tag { id: None, label: None },
    fields: vec![FieldSpec {
        name: "label",
        rules: &[Rule::Required],
        value: |t| FieldValue::Text(t.label.clone()),
    }],
});

impl Identified for Tag {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Tag {
    fn spec() -> &'static EntitySpec<Self> {
        &TAG_SPEC
    }

    fn set_id(&mut self, id: Option<EntityId>) {
        self.id = id;
    }
}

/// A fully populated slip, wire-equal to
/// `{"id":id,"note":"blue regal","issuedOn":"2025-01-25","copies":2,"tags":[]}`.
pub fn slip(id: EntityId) -> Slip {
    Slip {
        id: Some(id),
        note: Some("blue regal".to_string()),
        issued_on: NaiveDate::from_ymd_opt(2025, 1, 25),
        copies: Some(2),
        tags: Vec::new(),
    }
}

pub fn tag(id: EntityId, label: &str) -> Tag {
    Tag { id: Some(id), label: Some(label.to_string()) }
}
