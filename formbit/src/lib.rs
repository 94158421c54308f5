//! formbit implements the entity synchronization pattern shared by generated
//! admin front ends talking to a conventional REST backend: identity-based
//! deduplication of relationship option lists, lossless calendar-date
//! (de)serialization at the wire boundary, the create/edit form lifecycle
//! with a locked primary key, and the save/error/finalize state machine
//! driving one in-flight mutation at a time.
//!
//! One generic engine, parameterized by a per-entity [`EntitySpec`]
//! descriptor (field list, rules, defaults, resource path), replaces the
//! per-entity copies such generators emit. The backing HTTP stack and the
//! view layer stay behind the [`Transport`] and [`Navigator`] seams.

pub mod collection;
pub mod date_serde_enc;
pub mod entity_model;
pub mod error;
pub mod form;
pub mod identity;
pub mod logger;
pub mod query;
pub mod relations;
pub mod resolver;
pub mod rest_client;
pub mod save;
pub mod test_support;

pub use async_trait::async_trait;
pub use chrono;
pub use chrono::NaiveDate;
pub use collection::add_to_collection_if_missing;
pub use date_serde_enc::{decode, encode, Ymd, DATE_FORMAT};
pub use entity_model::{evaluate, Entity, EntitySpec, FieldSpec, FieldValue, Rule, Violation};
pub use error::AppError;
pub use form::{FieldState, Form};
pub use futures;
pub use http;
pub use http::Method;
pub use http::StatusCode;
pub use identity::{eq_by_id, EntityId, Identified};
pub use once_cell;
pub use once_cell::sync::Lazy;
pub use query::QueryOptions;
pub use relations::load_options;
pub use resolver::{resolve, Navigator, Resolution};
pub use rest_client::{HttpTransport, RestApi, Transport, WireRequest, WireResponse};
pub use save::{NavigateBack, SaveHooks, SaveWorkflow, Saved};
pub use serde;
pub use serde::Deserialize;
pub use serde::Serialize;
pub use serde_json;
pub use serde_with;
