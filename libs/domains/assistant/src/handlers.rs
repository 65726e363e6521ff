//! HTTP handlers for the AI assistant

use axum::{Router, extract::State, routing::post};
use axum_helpers::{
    ApiResponse, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestValidationResponse, ServiceUnavailableResponse,
    },
};
use utoipa::OpenApi;

use crate::error::AssistantResult;
use crate::models::{SummarizeRequest, SummarizeResponse};
use crate::service::AssistantService;

#[derive(OpenApi)]
#[openapi(
    paths(summarize),
    components(
        schemas(SummarizeRequest, SummarizeResponse),
        responses(BadRequestValidationResponse, BadGatewayResponse, ServiceUnavailableResponse)
    ),
    tags(
        (name = "Assistant", description = "AI text helpers")
    )
)]
pub struct ApiDoc;

pub fn router(service: AssistantService) -> Router {
    Router::new()
        .route("/summarize", post(summarize))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/summarize",
    tag = "Assistant",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary", body = ApiResponse<SummarizeResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn summarize(
    State(service): State<AssistantService>,
    ValidatedJson(request): ValidatedJson<SummarizeRequest>,
) -> AssistantResult<ApiResponse<SummarizeResponse>> {
    let response = service.summarize(request).await?;
    Ok(ApiResponse::ok(response))
}
