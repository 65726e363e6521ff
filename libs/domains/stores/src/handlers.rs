//! HTTP handlers for Stores API

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse, DeletedResponse, Paginated, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StoreResult;
use crate::models::{GeoPoint, Store, StoreFilter, StoreInput};
use crate::repository::StoreRepository;
use crate::service::StoreService;

#[derive(OpenApi)]
#[openapi(
    paths(list_stores, create_store, get_store, update_store, delete_store),
    components(
        schemas(Store, StoreInput, StoreFilter, GeoPoint, DeletedResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Stores", description = "Physical store locations")
    )
)]
pub struct ApiDoc;

pub fn router<R: StoreRepository + 'static>(service: StoreService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route(
            "/{id}",
            get(get_store).put(update_store).delete(delete_store),
        )
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "",
    tag = "Stores",
    params(StoreFilter),
    responses(
        (status = 200, description = "Page of stores", body = ApiResponse<Paginated<Store>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_stores<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    Query(filter): Query<StoreFilter>,
) -> StoreResult<ApiResponse<Paginated<Store>>> {
    let page = service.list_stores(filter).await?;
    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    post,
    path = "",
    tag = "Stores",
    request_body = StoreInput,
    responses(
        (status = 201, description = "Store created", body = ApiResponse<Store>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    ValidatedJson(input): ValidatedJson<StoreInput>,
) -> StoreResult<impl IntoResponse> {
    let store = service.create_store(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(store, "Store created successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Stores",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store found", body = ApiResponse<Store>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    UuidPath(id): UuidPath,
) -> StoreResult<ApiResponse<Store>> {
    let store = service.get_store(id).await?;
    Ok(ApiResponse::ok(store))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Stores",
    params(("id" = Uuid, Path, description = "Store ID")),
    request_body = StoreInput,
    responses(
        (status = 200, description = "Store updated", body = ApiResponse<Store>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<StoreInput>,
) -> StoreResult<ApiResponse<Store>> {
    let store = service.update_store(id, input).await?;
    Ok(ApiResponse::with_message(store, "Update success"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Stores",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store deleted", body = ApiResponse<DeletedResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    UuidPath(id): UuidPath,
) -> StoreResult<ApiResponse<DeletedResponse>> {
    service.delete_store(id).await?;
    Ok(ApiResponse::with_message(
        DeletedResponse { id: id.to_string() },
        "Delete success",
    ))
}
