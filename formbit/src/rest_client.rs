use crate::entity_model::Entity;
use crate::identity::EntityId;
use crate::query::QueryOptions;
use crate::AppError;
use async_trait::async_trait;
use http::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// One backend exchange: JSON in, JSON out. Dates are already strings here.
#[derive(Clone, Debug)]
pub struct WireRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl WireRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        WireRequest { method, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Clone, Debug)]
pub struct WireResponse {
    pub status: StatusCode,
    /// `None` for an empty body; a 200 with no body signals absence.
    pub body: Option<Value>,
}

impl WireResponse {
    pub fn ok(status: StatusCode, body: Value) -> Self {
        WireResponse { status, body: Some(body) }
    }

    pub fn empty(status: StatusCode) -> Self {
        WireResponse { status, body: None }
    }
}

/// The transport seam. The HTTP stack behind it is an external collaborator:
/// it delivers/parses JSON and surfaces failures as typed errors, nothing
/// more. Tests swap in in-memory implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, req: WireRequest) -> Result<WireResponse, AppError>;
}

/// reqwest-backed transport for a single backend host.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: Arc<reqwest::Client>,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Some(Duration::from_secs(30)))
            .build()?;
        Ok(HttpTransport {
            http_client: Arc::new(http_client),
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, req: WireRequest) -> Result<WireResponse, AppError> {
        crate::debug!("{} {}", req.method, self.url(&req.path));
        let mut builder = self.http_client.request(req.method.clone(), self.url(&req.path));
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() { None } else { Some(serde_json::from_slice(&bytes)?) };
        Ok(WireResponse { status, body })
    }
}

/// Typed CRUD operations over the conventional REST contract, shared by every
/// entity type through its spec's resource path.
pub struct RestApi<T> {
    transport: T,
}

impl<T: Transport> RestApi<T> {
    pub fn new(transport: T) -> Self {
        RestApi { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET one by id. A success status with an empty body (or a 404) means
    /// the entity is absent; callers decide whether that redirects.
    pub async fn find<E: Entity>(&self, id: EntityId) -> Result<Option<E>, AppError> {
        let req = WireRequest::new(Method::GET, format!("{}/{}", E::resource(), id));
        let res = self.transport.execute(req).await?;
        if res.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        require_success(&res, Method::GET, E::resource())?;
        match res.body {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    pub async fn query<E: Entity>(&self, options: &QueryOptions) -> Result<Vec<E>, AppError> {
        let req = WireRequest::new(Method::GET, E::resource()).with_query(options.to_pairs());
        let res = self.transport.execute(req).await?;
        require_success(&res, Method::GET, E::resource())?;
        match res.body {
            Some(body) => Ok(serde_json::from_value(body)?),
            None => Ok(Vec::new()),
        }
    }

    /// POST a new record. The client never invents an id; the created record
    /// comes back with the server-assigned one.
    pub async fn create<E: Entity>(&self, entity: &E) -> Result<E, AppError> {
        if entity.id().is_some() {
            return Err(AppError::BadRequest(format!(
                "a new {} cannot already have an id",
                E::entity_name()
            )));
        }
        let req = WireRequest::new(Method::POST, E::resource())
            .with_body(serde_json::to_value(entity)?);
        let res = self.transport.execute(req).await?;
        require_success(&res, Method::POST, E::resource())?;
        required_body(res, Method::POST, E::resource())
    }

    /// PUT the full record under its id.
    pub async fn update<E: Entity>(&self, entity: &E) -> Result<E, AppError> {
        let id = entity.id().ok_or_else(|| {
            AppError::BadRequest(format!("cannot update a {} without an id", E::entity_name()))
        })?;
        let req = WireRequest::new(Method::PUT, format!("{}/{}", E::resource(), id))
            .with_body(serde_json::to_value(entity)?);
        let res = self.transport.execute(req).await?;
        require_success(&res, Method::PUT, E::resource())?;
        required_body(res, Method::PUT, E::resource())
    }

    /// PATCH a partial record. The payload must carry the id; date fields, if
    /// present, are already in wire form.
    pub async fn partial_update<E: Entity>(&self, patch: Value) -> Result<E, AppError> {
        let id = patch
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| AppError::BadRequest("partial update requires an id".to_string()))?;
        let req = WireRequest::new(Method::PATCH, format!("{}/{}", E::resource(), id))
            .with_body(patch);
        let res = self.transport.execute(req).await?;
        require_success(&res, Method::PATCH, E::resource())?;
        required_body(res, Method::PATCH, E::resource())
    }

    /// DELETE by id. Success is judged by status alone, no body required.
    pub async fn delete<E: Entity>(&self, id: EntityId) -> Result<(), AppError> {
        let req = WireRequest::new(Method::DELETE, format!("{}/{}", E::resource(), id));
        let res = self.transport.execute(req).await?;
        require_success(&res, Method::DELETE, E::resource())
    }
}

fn require_success(res: &WireResponse, method: Method, path: &str) -> Result<(), AppError> {
    if res.status.is_success() {
        Ok(())
    } else {
        Err(AppError::Status { method, path: path.to_string(), status: res.status })
    }
}

fn required_body<E: Entity>(res: WireResponse, method: Method, path: &str) -> Result<E, AppError> {
    match res.body {
        Some(body) => Ok(serde_json::from_value(body)?),
        None => Err(AppError::Status { method, path: path.to_string(), status: res.status }),
    }
}
