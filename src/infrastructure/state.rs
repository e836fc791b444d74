//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AuthorRepository, BookInstanceRepository, BookRepository, GenreRepository};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection, used by the summary view
    db: DatabaseConnection,
    pub author_repo: Arc<dyn AuthorRepository>,
    pub genre_repo: Arc<dyn GenreRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    pub instance_repo: Arc<dyn BookInstanceRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let author_repo = Arc::new(SeaOrmAuthorRepository::new(db.clone()));
        let genre_repo = Arc::new(SeaOrmGenreRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let instance_repo = Arc::new(SeaOrmBookInstanceRepository::new(db.clone()));

        Self {
            db,
            author_repo,
            genre_repo,
            book_repo,
            instance_repo,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
