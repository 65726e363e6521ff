//! HTTP handlers for Products API

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, DeletedResponse, Paginated, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, PayloadTooLargeResponse, UnsupportedMediaTypeResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::images::ImageUpload;
use crate::models::{
    Discount, DiscountType, Product, ProductFilter, ProductInput, RemoveImages, Variant,
    VariantAttribute,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Multipart field carrying image files
pub const IMAGES_FIELD: &str = "images";

/// Request body cap for image uploads, 25 MiB
pub const DEFAULT_UPLOAD_LIMIT: usize = 25 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        upload_images,
        remove_images,
    ),
    components(
        schemas(
            Product, ProductInput, ProductFilter, Discount, DiscountType, Variant,
            VariantAttribute, RemoveImages, DeletedResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnsupportedMediaTypeResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog and product images")
    )
)]
pub struct ApiDoc;

pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    router_with_upload_limit(service, DEFAULT_UPLOAD_LIMIT)
}

/// Like [`router`], with `upload_limit` bytes allowed for `POST /{id}/images`.
pub fn router_with_upload_limit<R: ProductRepository + 'static>(
    service: ProductService<R>,
    upload_limit: usize,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/{id}/images",
            post(upload_images)
                .layer(DefaultBodyLimit::max(upload_limit))
                .delete(remove_images),
        )
        .with_state(shared_service)
}

/// Collect every file sent under [`IMAGES_FIELD`]; other fields are skipped.
async fn read_uploads(mut multipart: Multipart) -> ProductResult<Vec<ImageUpload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;

        uploads.push(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(uploads)
}

/// List products through the search index
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<Paginated<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<ApiResponse<Paginated<Product>>> {
    let page = service.list_products(filter).await?;
    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(product, "Product created successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.get_product(id).await?;
    Ok(ApiResponse::ok(product))
}

/// Replace a product; its images are kept
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(ApiResponse::with_message(product, "Update success"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<DeletedResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<ApiResponse<DeletedResponse>> {
    service.delete_product(id).await?;
    Ok(ApiResponse::with_message(
        DeletedResponse { id: id.to_string() },
        "Delete success",
    ))
}

/// Upload one or more images (`multipart/form-data`, field `images`)
#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content_type = "multipart/form-data", description = "Files under the `images` field"),
    responses(
        (status = 201, description = "Images attached", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_images<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    multipart: Multipart,
) -> ProductResult<impl IntoResponse> {
    let uploads = read_uploads(multipart).await?;
    let product = service.add_images(id, uploads).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(product, "Product image has been uploaded"),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}/images",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = RemoveImages,
    responses(
        (status = 200, description = "Images removed", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_images<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(body): ValidatedJson<RemoveImages>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.remove_images(id, body.images).await?;
    Ok(ApiResponse::with_message(
        product,
        "Product image has been deleted",
    ))
}
