//! HTTP request handlers for the gateway

use crate::client::CompletionClient;
use crate::config::AppConfig;
use crate::gate::error::ApiError;
use crate::prompt::InferenceRequest;
use crate::store::{
    Award, Collection, CreateAward, CreateRequirement, DeleteRequest, Requirement, StoreClient,
    UpdateAward, UpdateRequirement,
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

/// Shared state: read-only configuration plus a pooled HTTP client. Outbound
/// clients are built from it per request, so a missing credential fails that
/// request with a named error and nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inference gateway
// ---------------------------------------------------------------------------

/// Handle a typed inference request: build the prompt, forward one request to
/// the upstream completion endpoint, return the extracted text.
pub async fn inference(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: InferenceRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("unknown or invalid request: {e}")))?;

    let kind = request.kind();
    info!(kind, "inference request");

    let client = CompletionClient::new(state.http.clone(), &state.config.llm).map_err(|e| {
        error!(kind, "inference configuration error: {e}");
        ApiError::from(e)
    })?;

    let text = client.complete(&request.into_messages()).await.map_err(|e| {
        error!(kind, "inference request failed: {e}");
        ApiError::from(e)
    })?;

    Ok(Json(json!({
        "content": [{ "type": "text", "text": text }]
    })))
}

// ---------------------------------------------------------------------------
// Record store adapter
// ---------------------------------------------------------------------------

/// Query parameters for `/api/data`
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    /// Collection selector
    #[serde(rename = "type")]
    collection: Option<String>,

    /// Foreign-key filter for requirement listings
    #[serde(rename = "awardId")]
    award_id: Option<String>,
}

impl DataQuery {
    /// Decode the selector through `Collection`'s own `Deserialize`, keeping
    /// one decoding path while preserving the JSON error shape for unknown
    /// selectors (a plain extractor rejection would lose it).
    fn collection(&self) -> Result<Collection, ApiError> {
        let raw = self.collection.as_deref().unwrap_or("");
        serde_json::from_value(Value::String(raw.to_string())).map_err(|_| {
            ApiError::BadRequest(format!("unknown collection type: \"{raw}\""))
        })
    }
}

fn table_name(config: &AppConfig, collection: Collection) -> &str {
    match collection {
        Collection::Awards => &config.store.awards_table,
        Collection::Requirements => &config.store.requirements_table,
    }
}

fn store_client(
    state: &AppState,
    collection: Collection,
    method: &str,
) -> Result<StoreClient, ApiError> {
    StoreClient::new(state.http.clone(), &state.config.store).map_err(|e| {
        error!(collection = %collection, method, "store configuration error: {e}");
        ApiError::from(e)
    })
}

fn store_error(collection: Collection, method: &str) -> impl FnOnce(crate::Error) -> ApiError + '_ {
    move |e| {
        error!(collection = %collection, method, "store operation failed: {e}");
        ApiError::from(e)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))
}

/// List a collection, mapped through the canonical-field resolver.
///
/// Requirement listings honor the optional `awardId` filter; it is applied
/// after mapping so it works regardless of the backing column casing.
pub async fn data_list(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Response, ApiError> {
    let collection = query.collection()?;
    let store = store_client(&state, collection, "GET")?;
    let records = store
        .list(table_name(&state.config, collection))
        .await
        .map_err(store_error(collection, "GET"))?;

    match collection {
        Collection::Awards => {
            let awards: Vec<Award> = records.iter().map(Award::from_record).collect();
            Ok(Json(awards).into_response())
        }
        Collection::Requirements => {
            let mut requirements: Vec<Requirement> =
                records.iter().map(Requirement::from_record).collect();
            if let Some(ref award_id) = query.award_id {
                requirements.retain(|r| r.award_id == *award_id);
            }
            Ok(Json(requirements).into_response())
        }
    }
}

/// Create a record, echoing the canonical entity (201)
pub async fn data_create(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let collection = query.collection()?;
    let store = store_client(&state, collection, "POST")?;
    let table = table_name(&state.config, collection);

    match collection {
        Collection::Awards => {
            let payload: CreateAward = parse_body(body)?;
            let record = store
                .create(table, payload.into_fields())
                .await
                .map_err(store_error(collection, "POST"))?;
            Ok((StatusCode::CREATED, Json(Award::from_record(&record))).into_response())
        }
        Collection::Requirements => {
            let payload: CreateRequirement = parse_body(body)?;
            let record = store
                .create(table, payload.into_fields())
                .await
                .map_err(store_error(collection, "POST"))?;
            Ok((StatusCode::CREATED, Json(Requirement::from_record(&record))).into_response())
        }
    }
}

/// Partial-update a record; only supplied fields are sent to the store
pub async fn data_update(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let collection = query.collection()?;
    let store = store_client(&state, collection, "PATCH")?;
    let table = table_name(&state.config, collection);

    match collection {
        Collection::Awards => {
            let payload: UpdateAward = parse_body(body)?;
            let id = payload.id.clone();
            let record = store
                .update(table, &id, payload.into_fields())
                .await
                .map_err(store_error(collection, "PATCH"))?;
            Ok(Json(Award::from_record(&record)).into_response())
        }
        Collection::Requirements => {
            let payload: UpdateRequirement = parse_body(body)?;
            let id = payload.id.clone();
            let record = store
                .update(table, &id, payload.into_fields())
                .await
                .map_err(store_error(collection, "PATCH"))?;
            Ok(Json(Requirement::from_record(&record)).into_response())
        }
    }
}

/// Delete a record by identifier
pub async fn data_delete(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let collection = query.collection()?;
    let store = store_client(&state, collection, "DELETE")?;
    let payload: DeleteRequest = parse_body(body)?;

    store
        .destroy(table_name(&state.config, collection), &payload.id)
        .await
        .map_err(store_error(collection, "DELETE"))?;

    Ok(Json(json!({ "success": true })))
}
