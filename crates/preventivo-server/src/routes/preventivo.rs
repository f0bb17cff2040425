use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::select_domain;
use crate::error::ApiError;
use crate::pipeline::{self, GeneratedQuote};
use crate::state::AppState;

#[derive(Deserialize)]
struct DomainBody {
    domain: Option<String>,
}

/// The quote endpoint: any method, any of the historical paths.
///
/// The body is read raw so that a missing or non-JSON body simply means "no
/// domain in the body" rather than a rejection.
pub async fn generate_preventivo(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body_domain = serde_json::from_slice::<DomainBody>(&body)
        .ok()
        .and_then(|b| b.domain);
    let domain = select_domain(
        body_domain.as_deref(),
        &params,
        state.default_domain.as_deref(),
    );
    let download = params.iter().any(|(k, v)| k == "download" && v == "1");

    match pipeline::generate(&state, &domain).await {
        Ok(quote) => Ok(pdf_response(quote, download)),
        Err(e) => {
            state.artifacts.record_error("Error generating PDF", &e);
            Err(e)
        }
    }
}

fn pdf_response(quote: GeneratedQuote, download: bool) -> Response {
    let disposition = if download { "attachment" } else { "inline" };
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{}.pdf\"", quote.filename),
            ),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        quote.pdf,
    )
        .into_response()
}
