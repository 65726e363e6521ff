//! HTTP handlers for Users and Auth APIs

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
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    ChangePassword, CreateUser, LoginRequest, Role, UpdateUser, UserFilter, UserResponse,
    UserStatus,
};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        change_password,
    ),
    components(
        schemas(
            UserResponse, CreateUser, UpdateUser, ChangePassword, LoginRequest, UserFilter,
            Role, UserStatus, DeletedResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Admin and customer accounts")
    )
)]
pub struct ApiDoc;

/// Documentation for the routes under `/auth`
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(
        schemas(LoginRequest, UserResponse, Role, UserStatus),
        responses(BadRequestValidationResponse, UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Auth", description = "Credential verification")
    )
)]
pub struct AuthApiDoc;

/// Routes mounted under `/users`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/change-password", post(change_password))
        .with_state(Arc::new(service))
}

/// Routes mounted under `/auth`
pub fn auth_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(UserFilter),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<Paginated<UserResponse>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(filter): Query<UserFilter>,
) -> UserResult<ApiResponse<Paginated<UserResponse>>> {
    let page = service.list_users(filter).await?;
    Ok(ApiResponse::ok(page))
}

#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(user, "User created successfully"),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(ApiResponse::ok(user))
}

/// Replace profile fields; the password is not touched
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(ApiResponse::with_message(user, "Update success"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<DeletedResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<DeletedResponse>> {
    service.delete_user(id).await?;
    Ok(ApiResponse::with_message(
        DeletedResponse { id: id.to_string() },
        "Delete success",
    ))
}

#[utoipa::path(
    post,
    path = "/{id}/change-password",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = ChangePassword,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn change_password<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ChangePassword>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.change_password(id, input).await?;
    Ok(ApiResponse::with_message(user, "Password has been changed"))
}

/// Verify email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials valid", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.login(input).await?;
    Ok(ApiResponse::with_message(user, "Login success"))
}
