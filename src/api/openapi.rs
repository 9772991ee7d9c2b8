//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, envelope, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "In-memory bookshelf REST API. Every response is wrapped in \
                       {status, message?, data?}; the schemas below describe `data`.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookPayload,
            crate::models::book::BookQuery,
            books::CreatedBook,
            books::BookList,
            books::BookDetail,
            envelope::ResponseStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book shelf management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
