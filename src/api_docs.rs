use crate::api;
use crate::domain;
use crate::models::LoanStatus;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::author::list_authors,
        api::author::create_author,
        api::author::get_author,
        api::author::update_author,
        api::author::delete_author,
        api::genre::list_genres,
        api::genre::create_genre,
        api::genre::get_genre,
        api::genre::update_genre,
        api::genre::delete_genre,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::set_book_genres,
        api::books::delete_book,
        api::book_instance::list_instances,
        api::book_instance::list_book_instances,
        api::book_instance::create_instance,
        api::book_instance::get_instance,
        api::book_instance::update_instance,
        api::book_instance::delete_instance,
        api::catalog::summary,
    ),
    components(
        schemas(
            domain::Author,
            domain::AuthorInput,
            domain::Genre,
            domain::GenreInput,
            domain::Book,
            domain::BookInput,
            domain::BookInstance,
            domain::CreateBookInstanceInput,
            domain::UpdateBookInstanceInput,
            domain::CatalogSummary,
            api::books::SetGenresRequest,
            LoanStatus,
        )
    ),
    tags(
        (name = "locallibrary", description = "LocalLibrary catalog API")
    )
)]
pub struct ApiDoc;
