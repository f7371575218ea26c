use sqlx::AnyPool;
use crate::books::repository::BookRepository;
use crate::books::repository::sql_book_repository::SqlBookRepository;

pub(crate) fn create_book_repository(pool: AnyPool) -> Box<dyn BookRepository> {
    Box::new(SqlBookRepository::new(pool))
}
