//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admin Dashboard API",
        version = "0.1.0",
        description = "Catalog, store and account administration backed by MongoDB with a search mirror",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/categories", api = domain_categories::ApiDoc),
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/stores", api = domain_stores::ApiDoc),
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api/auth", api = domain_users::AuthApiDoc),
        (path = "/api/assistant", api = domain_assistant::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/categories",
            "/api/categories/{id}",
            "/api/products/{id}/images",
            "/api/stores/{id}",
            "/api/users/{id}/change-password",
            "/api/auth/login",
            "/api/assistant/summarize",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected} in {paths:?}"
            );
        }
    }
}
