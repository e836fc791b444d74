//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_instance_repository;
pub mod book_repository;
pub mod genre_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_instance_repository::SeaOrmBookInstanceRepository;
pub use book_repository::SeaOrmBookRepository;
pub use genre_repository::SeaOrmGenreRepository;
