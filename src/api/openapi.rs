//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    admin::render,
    api::{admin, authors, book_instances, books, genres, health, languages},
    models,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Library catalog administration",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Admin
        admin::admin_index,
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance,
        book_instances::update_book_instance,
        book_instances::delete_book_instance,
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        languages::list_languages,
        languages::get_language,
        languages::create_language,
        languages::update_language,
        languages::delete_language,
    ),
    components(
        schemas(
            // Catalog
            models::Author,
            models::author::CreateAuthor,
            models::author::UpdateAuthor,
            models::Book,
            models::book::CreateBook,
            models::book::UpdateBook,
            models::BookInstance,
            models::book_instance::CreateBookInstance,
            models::book_instance::UpdateBookInstance,
            models::book_instance::InlineInstanceChange,
            models::book_instance::DueBackFilter,
            models::Genre,
            models::genre::CreateGenre,
            models::genre::UpdateGenre,
            models::Language,
            models::language::CreateLanguage,
            models::language::UpdateLanguage,
            models::LoanStatus,
            // Admin screens
            render::ChangeList,
            render::ChangeListRow,
            render::Column,
            render::FilterSpec,
            render::FilterChoice,
            render::ChangeForm,
            render::RenderedFieldset,
            render::FormField,
            render::RenderedInline,
            render::InlineRow,
            render::IndexEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Admin index"),
        (name = "authors", description = "Author administration"),
        (name = "books", description = "Book administration"),
        (name = "book-instances", description = "Book copy administration"),
        (name = "genres", description = "Genre administration"),
        (name = "languages", description = "Language administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_admin_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/admin/books/{id}"));
        assert!(doc.paths.paths.contains_key("/admin/book-instances"));
        assert!(doc.paths.paths.contains_key("/api/v1/ready"));
    }
}
