// Qatar Hub - JSON API
// Thin axum layer over the library: every handler parses, calls one library
// operation, and wraps the result in the `ApiResponse` envelope.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::calculators::{BreakEven, Calculator, ProfitLoss, Roi, Vat, VatInput, VatResult};
use crate::catalog::{
    Catalog, CategoryFilter, CompanyStat, ContactRecord, PlaceRecord, ServiceOffering,
    SoftwareRecord, TemplateRecord, Testimonial, TipGroup,
};
use crate::config::Config;
use crate::contact::{ContactForm, ContactSubmission};
use crate::document::{self, ExportFormat};
use crate::errors::HubError;
use crate::notify::Notification;
use crate::uploads::{self, FileUpload, UploadKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            catalog: Arc::new(Catalog::load()),
            config: Arc::new(config),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Hub(#[from] HubError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, field) = match &self {
            ApiError::Hub(err @ HubError::Validation { field, .. }) => {
                (StatusCode::BAD_REQUEST, err.code(), Some(field.clone()))
            }
            ApiError::Hub(err @ HubError::UnsupportedFileType { .. }) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.code(), None)
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
        };

        tracing::debug!(status = status.as_u16(), error = %self, "request failed");

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: self.to_string(),
                field,
            }),
        };

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub services: Vec<ServiceOffering>,
    pub testimonials: Vec<Testimonial>,
    pub stats: Vec<CompanyStat>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub format: ExportFormat,
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file: FileUpload,
    pub size_label: String,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub submission: ContactSubmission,
    pub notification: Notification,
}

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct SoftwareQuery {
    #[serde(default)]
    pub free: bool,
}

#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    pub format: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: crate::VERSION,
    }))
}

/// POST /api/calculators/vat - blank rate falls back to the configured default
async fn calculate_vat(
    State(state): State<AppState>,
    Json(mut input): Json<VatInput>,
) -> ApiResult<VatResult> {
    if input.rate.trim().is_empty() {
        input.rate = state.config.vat_rate_field();
    }
    let output = Vat::compute(&input)?;
    Ok(Json(ApiResponse::ok(Vat::rounded(&output))))
}

/// POST /api/calculators/{profit-loss,roi,break-even}
async fn calculate<C>(Json(input): Json<C::Input>) -> ApiResult<C::Output>
where
    C: Calculator + 'static,
    C::Input: Send + 'static,
    C::Output: Send + 'static,
{
    let output = C::compute(&input)?;
    tracing::debug!(calculator = C::NAME, "api calculation");
    Ok(Json(ApiResponse::ok(C::rounded(&output))))
}

/// GET /api/places?q=&category= - Search the Qatar directory
async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> ApiResult<Vec<PlaceRecord>> {
    let filter: CategoryFilter = query
        .category
        .parse()
        .map_err(|e: crate::catalog::places::UnknownCategory| {
            HubError::validation("category", &e.to_string())
        })?;

    let places = state
        .catalog
        .places
        .search(&query.q, filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(places)))
}

/// GET /api/places/:name - One place by (URL-encoded) name
async fn get_place(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<PlaceRecord> {
    // Decode URL-encoded name
    let decoded = urlencoding::decode(&name)
        .map(|s| s.into_owned())
        .unwrap_or(name);

    state
        .catalog
        .places
        .find(&decoded)
        .cloned()
        .map(|place| Json(ApiResponse::ok(place)))
        .ok_or(ApiError::NotFound(format!("place '{}'", decoded)))
}

/// GET /api/emergency-contacts
async fn get_emergency_contacts(State(state): State<AppState>) -> Json<ApiResponse<Vec<ContactRecord>>> {
    Json(ApiResponse::ok(state.catalog.emergency_contacts.clone()))
}

/// GET /api/living-tips
async fn get_living_tips(State(state): State<AppState>) -> Json<ApiResponse<Vec<TipGroup>>> {
    Json(ApiResponse::ok(state.catalog.living_tips.clone()))
}

/// GET /api/software?free=true
async fn get_software(
    State(state): State<AppState>,
    Query(query): Query<SoftwareQuery>,
) -> Json<ApiResponse<Vec<SoftwareRecord>>> {
    let software = if query.free {
        state.catalog.software.free_only()
    } else {
        state.catalog.software.all()
    };
    Json(ApiResponse::ok(software.into_iter().cloned().collect()))
}

/// GET /api/templates - Templates grouped by category
async fn get_templates(
    State(state): State<AppState>,
) -> Json<ApiResponse<BTreeMap<String, Vec<TemplateRecord>>>> {
    let grouped = state
        .catalog
        .software
        .templates_by_category()
        .into_iter()
        .map(|(category, templates)| {
            (category.to_string(), templates.into_iter().cloned().collect())
        })
        .collect();
    Json(ApiResponse::ok(grouped))
}

/// GET /api/services
async fn get_services(State(state): State<AppState>) -> Json<ApiResponse<ServicesResponse>> {
    Json(ApiResponse::ok(ServicesResponse {
        services: state.catalog.services.clone(),
        testimonials: state.catalog.testimonials.clone(),
        stats: state.catalog.stats.clone(),
    }))
}

/// GET /api/document?format=markdown|text - Export the sample resume
async fn get_document(Query(query): Query<DocumentQuery>) -> ApiResult<DocumentResponse> {
    let format = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(|msg| HubError::validation("format", &msg))?,
    };

    Ok(Json(ApiResponse::ok(DocumentResponse {
        format,
        file_name: format!("professional_document.{}", format.extension()),
        content: document::resume().export(format),
    })))
}

/// POST /api/uploads/:kind - Type-check an upload (image or pdf)
async fn check_upload(
    Path(kind): Path<String>,
    Json(file): Json<FileUpload>,
) -> ApiResult<UploadResponse> {
    let kind = match kind.as_str() {
        "image" => UploadKind::Image,
        "pdf" => UploadKind::Pdf,
        other => return Err(ApiError::NotFound(format!("upload kind '{}'", other))),
    };

    let file = uploads::accept(kind, file)?;
    let notification = Notification::info(
        "File Uploaded",
        format!("{} has been accepted", file.name),
    );
    Ok(Json(ApiResponse::ok(UploadResponse {
        size_label: file.size_label(),
        file,
        notification,
    })))
}

/// POST /api/contact - Submit the enquiry form
async fn submit_contact(
    Json(mut form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ApiResponse<ContactResponse>>), ApiError> {
    let (submission, notification) = form.submit()?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ContactResponse {
            submission,
            notification,
        })),
    ))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/calculators/vat", post(calculate_vat))
        .route("/calculators/profit-loss", post(calculate::<ProfitLoss>))
        .route("/calculators/roi", post(calculate::<Roi>))
        .route("/calculators/break-even", post(calculate::<BreakEven>))
        .route("/places", get(search_places))
        .route("/places/:name", get(get_place))
        .route("/emergency-contacts", get(get_emergency_contacts))
        .route("/living-tips", get(get_living_tips))
        .route("/software", get(get_software))
        .route("/templates", get(get_templates))
        .route("/services", get(get_services))
        .route("/document", get(get_document))
        .route("/uploads/:kind", post(check_upload))
        .route("/contact", post(submit_contact))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Config::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["status"], json!("OK"));
    }

    #[tokio::test]
    async fn test_vat_blank_rate_uses_default() {
        let (status, body) =
            post_json("/api/calculators/vat", json!({"amount": "1000", "rate": ""})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["vat"], json!(50.0));
        assert_eq!(body["data"]["total"], json!(1050.0));
    }

    #[tokio::test]
    async fn test_vat_validation_error() {
        let (status, body) = post_json("/api/calculators/vat", json!({"amount": "0"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
        assert_eq!(body["error"]["field"], json!("amount"));
    }

    #[tokio::test]
    async fn test_break_even_rounds_units_up() {
        let (status, body) = post_json(
            "/api/calculators/break-even",
            json!({"fixed_costs": "10000", "variable_cost": "30", "selling_price": "50"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["break_even_units"], json!(500));
        assert_eq!(body["data"]["break_even_revenue"], json!(25000.0));
    }

    #[tokio::test]
    async fn test_roi_without_period_omits_annualized() {
        let (status, body) = post_json(
            "/api/calculators/roi",
            json!({"investment": "1000", "final_value": "1500"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["roi_percentage"], json!(50.0));
        assert!(body["data"].get("annualized_roi").is_none());
    }

    #[tokio::test]
    async fn test_places_search_and_lookup() {
        let (status, body) = get_json("/api/places?q=metro&category=transport").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], json!("Doha Metro"));

        let (status, body) = get_json("/api/places?category=nightlife").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], json!("category"));

        let (status, body) = get_json("/api/places/Doha%20Metro").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["category"], json!("transport"));

        let (status, _) = get_json("/api/places/Nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_free_software_only() {
        let (_, body) = get_json("/api/software?free=true").await;
        let items = body["data"].as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|s| s["is_free"] == json!(true)));
    }

    #[tokio::test]
    async fn test_document_export() {
        let (status, body) = get_json("/api/document?format=text").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["file_name"], json!("professional_document.txt"));

        let (status, _) = get_json("/api/document?format=docx").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_type_check() {
        let (status, body) = post_json(
            "/api/uploads/pdf",
            json!({"name": "photo.png", "mime": "image/png"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], json!("UNSUPPORTED_FILE_TYPE"));

        let (status, body) = post_json(
            "/api/uploads/pdf",
            json!({"name": "invoice.pdf", "size_bytes": 1572864}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["size_label"], json!("1.5 MB"));
    }

    #[tokio::test]
    async fn test_contact_submission() {
        let (status, body) = post_json("/api/contact", json!({"name": "Ali", "email": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], json!("email"));

        let (status, body) = post_json(
            "/api/contact",
            json!({"name": "Ali", "email": "ali@example.qa", "message": "Need a POS quote"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["submission"]["name"], json!("Ali"));
        assert!(body["data"]["submission"].get("phone").is_none());
    }
}
