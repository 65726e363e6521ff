//! HTTP handlers for Categories API

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, DeletedResponse, Paginated, UuidPath, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{
    Category, CategoryFilter, CategoryInput, LengthStatus, SeoScores, SeoSuggestions,
    SuggestionRequest, SuggestionResponse,
};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
        suggest_seo,
    ),
    components(
        schemas(
            Category, CategoryInput, CategoryFilter, SuggestionRequest, SuggestionResponse,
            SeoScores, SeoSuggestions, LengthStatus, DeletedResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            BadGatewayResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Category tree management and SEO helpers")
    )
)]
pub struct ApiDoc;

pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/suggestions", post(suggest_seo))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(shared_service)
}

/// List categories through the search index
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<Paginated<Category>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Query(filter): Query<CategoryFilter>,
) -> CategoryResult<ApiResponse<Paginated<Category>>> {
    let page = service.list_categories(filter).await?;
    Ok(ApiResponse::ok(page))
}

/// Create a category; level, ancestors and path are derived from the parent
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(category, "Category created successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<Category>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<ApiResponse<Category>> {
    let category = service.get_category(id).await?;
    Ok(ApiResponse::ok(category))
}

/// Replace a category and recompute its position in the tree
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> CategoryResult<ApiResponse<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(ApiResponse::with_message(category, "Update success"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<DeletedResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<ApiResponse<DeletedResponse>> {
    service.delete_category(id).await?;
    Ok(ApiResponse::with_message(
        DeletedResponse { id: id.to_string() },
        "Delete success",
    ))
}

/// Score category SEO fields and ask the AI for improvements
#[utoipa::path(
    post,
    path = "/suggestions",
    tag = "Categories",
    request_body = SuggestionRequest,
    responses(
        (status = 201, description = "New suggestions", body = ApiResponse<SuggestionResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn suggest_seo<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(request): ValidatedJson<SuggestionRequest>,
) -> CategoryResult<impl IntoResponse> {
    let response = service.suggest(request).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(response, "new suggestions"),
    ))
}
