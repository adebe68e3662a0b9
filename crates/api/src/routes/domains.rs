//! Domain and service management endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{
    AddGoogleSuiteService, AddManualService, Aggregate, Domain, DomainName, DomainRegistry,
    GoogleVerificationToken, ManualLabel, Record, RecordSet, RecordType, RegisterDomain,
    RemoveService, ServiceId,
};
use event_store::EventStore;
use projections::{DomainDetailView, DomainListView, ProjectionProcessor};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EventStore> {
    pub registry: DomainRegistry<S>,
    pub domain_list: Arc<DomainListView>,
    pub domain_detail: Arc<DomainDetailView>,
    pub event_store: S,
    pub projection_processor: Arc<ProjectionProcessor<S>>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterDomainRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct RecordRequest {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub label: String,
    pub value: String,
    pub ttl: i64,
}

#[derive(Deserialize)]
pub struct AddManualServiceRequest {
    pub service_id: Option<String>,
    pub label: String,
    pub records: Vec<RecordRequest>,
}

#[derive(Deserialize)]
pub struct AddGoogleSuiteServiceRequest {
    pub service_id: Option<String>,
    pub verification_token: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct DomainRegisteredResponse {
    pub name: String,
}

#[derive(Serialize)]
pub struct DomainSummaryResponse {
    pub name: String,
    pub service_count: usize,
    pub record_count: usize,
}

#[derive(Serialize)]
pub struct ServiceResponse {
    pub service_id: String,
    pub service_type: String,
    pub label: String,
}

#[derive(Serialize)]
pub struct DomainResponse {
    pub name: String,
    pub version: i64,
    pub services: Vec<ServiceResponse>,
    pub records: Vec<Record>,
}

#[derive(Serialize)]
pub struct ServiceAddedResponse {
    pub service_id: String,
    pub service_type: String,
}

/// Response type for event envelope data.
#[derive(Serialize)]
pub struct EventEnvelopeResponse {
    pub event_id: String,
    pub event_type: String,
    pub stream_name: String,
    pub version: i64,
    pub timestamp: String,
    pub payload: serde_json::Value,
}

// -- Handlers --

/// POST /domains — register a new domain.
#[tracing::instrument(skip(state, req))]
pub async fn register<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterDomainRequest>,
) -> Result<(StatusCode, Json<DomainRegisteredResponse>), ApiError> {
    let domain_name = DomainName::parse(&req.name)?;

    let result = state
        .registry
        .register(RegisterDomain::new(domain_name))
        .await?;

    let response = DomainRegisteredResponse {
        name: result
            .aggregate
            .name()
            .map(ToString::to_string)
            .unwrap_or_default(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /domains — list all registered domains from the projection.
#[tracing::instrument(skip(state))]
pub async fn list<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<DomainSummaryResponse>>, ApiError> {
    // Catch up so the read model includes the latest events.
    state
        .projection_processor
        .run_catch_up()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let domains = state.domain_list.get_all_domains().await;

    let responses: Vec<DomainSummaryResponse> = domains
        .into_iter()
        .map(|d| DomainSummaryResponse {
            name: d.domain_name,
            service_count: d.service_count,
            record_count: d.record_count,
        })
        .collect();

    Ok(Json(responses))
}

/// GET /domains/{name} — load a domain aggregate by name.
#[tracing::instrument(skip(state))]
pub async fn get<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<DomainResponse>, ApiError> {
    let domain_name = DomainName::parse(&name)?;
    let domain = state
        .registry
        .get_domain(&domain_name.stream_name())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Domain {name} not found")))?;

    Ok(Json(domain_response(&domain)))
}

/// POST /domains/{name}/services/manual — attach a manual service.
///
/// Each record is validated against the per-type grammar before any
/// command is issued; one invalid record fails the whole request.
#[tracing::instrument(skip(state, req))]
pub async fn add_manual_service<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
    Json(req): Json<AddManualServiceRequest>,
) -> Result<(StatusCode, Json<ServiceAddedResponse>), ApiError> {
    let domain_name = DomainName::parse(&name)?;
    let service_id = parse_service_id(req.service_id.as_deref())?;

    let mut records = Vec::with_capacity(req.records.len());
    for record in &req.records {
        records.push(
            Record::new(
                record.record_type,
                record.label.as_str(),
                record.value.as_str(),
                record.ttl,
            )
            .map_err(domain::RegistryError::from)?,
        );
    }
    let records: RecordSet = records.into_iter().collect();

    let result = state
        .registry
        .add_manual(AddManualService::new(
            domain_name,
            service_id,
            ManualLabel::new(req.label),
            records,
        ))
        .await?;

    let service_type = result
        .aggregate
        .get_service(&service_id)
        .map(|s| s.service_type().as_str().to_string())
        .ok_or_else(|| ApiError::Internal(format!("Service {service_id} missing after add")))?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceAddedResponse {
            service_id: service_id.to_string(),
            service_type,
        }),
    ))
}

/// POST /domains/{name}/services/googlesuite — attach a Google Suite service.
#[tracing::instrument(skip(state, req))]
pub async fn add_google_suite_service<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
    Json(req): Json<AddGoogleSuiteServiceRequest>,
) -> Result<(StatusCode, Json<ServiceAddedResponse>), ApiError> {
    let domain_name = DomainName::parse(&name)?;
    let service_id = parse_service_id(req.service_id.as_deref())?;

    let result = state
        .registry
        .add_google_suite(AddGoogleSuiteService::new(
            domain_name,
            service_id,
            GoogleVerificationToken::new(req.verification_token),
        ))
        .await?;

    let service_type = result
        .aggregate
        .get_service(&service_id)
        .map(|s| s.service_type().as_str().to_string())
        .ok_or_else(|| ApiError::Internal(format!("Service {service_id} missing after add")))?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceAddedResponse {
            service_id: service_id.to_string(),
            service_type,
        }),
    ))
}

/// DELETE /domains/{name}/services/{service_id} — detach a service.
///
/// 404s when either the domain or the service id is unknown; the
/// aggregate itself treats removing an absent id as a no-op.
#[tracing::instrument(skip(state))]
pub async fn remove_service<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((name, service_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let domain_name = DomainName::parse(&name)?;
    let service_id = parse_service_id(Some(&service_id))?;

    let domain = state
        .registry
        .get_domain(&domain_name.stream_name())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Domain {name} not found")))?;

    if domain.get_service(&service_id).is_none() {
        return Err(ApiError::NotFound(format!(
            "Service {service_id} not found on domain {name}"
        )));
    }

    state
        .registry
        .remove_service(RemoveService::new(domain_name, service_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /domains/{name}/events — list all events in a domain's stream.
#[tracing::instrument(skip(state))]
pub async fn events<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<EventEnvelopeResponse>>, ApiError> {
    let domain_name = DomainName::parse(&name)?;

    let envelopes = state
        .event_store
        .get_events_for_stream(&domain_name.stream_name())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    if envelopes.is_empty() {
        return Err(ApiError::NotFound(format!("Domain {name} not found")));
    }

    let responses: Vec<EventEnvelopeResponse> = envelopes
        .into_iter()
        .map(|e| EventEnvelopeResponse {
            event_id: e.event_id.to_string(),
            event_type: e.event_type,
            stream_name: e.stream_name.to_string(),
            version: e.version.as_i64(),
            timestamp: e.timestamp.to_rfc3339(),
            payload: e.payload,
        })
        .collect();

    Ok(Json(responses))
}

fn domain_response(domain: &Domain) -> DomainResponse {
    let mut services: Vec<ServiceResponse> = domain
        .services()
        .map(|(id, service)| ServiceResponse {
            service_id: id.to_string(),
            service_type: service.service_type().as_str().to_string(),
            label: service.display_label(),
        })
        .collect();
    services.sort_by(|a, b| a.service_id.cmp(&b.service_id));

    DomainResponse {
        name: domain.name().map(ToString::to_string).unwrap_or_default(),
        version: domain.version().as_i64(),
        services,
        records: domain.record_set().iter().cloned().collect(),
    }
}

fn parse_service_id(id: Option<&str>) -> Result<ServiceId, ApiError> {
    match id {
        Some(id) => {
            let uuid = uuid::Uuid::parse_str(id)
                .map_err(|e| ApiError::BadRequest(format!("Invalid service_id: {e}")))?;
            Ok(ServiceId::from_uuid(uuid))
        }
        None => Ok(ServiceId::new()),
    }
}
