use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row};

use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

const INSERT_BOOK: &str = "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
    RETURNING isbn, amazon_url, author, language, pages, publisher, title, year";

// placeholders are numbered in order of appearance, sqlite assigns them positionally
const UPDATE_BOOK: &str = "UPDATE books \
    SET amazon_url = $1, author = $2, language = $3, pages = $4, publisher = $5, title = $6, year = $7 \
    WHERE isbn = $8 \
    RETURNING isbn, amazon_url, author, language, pages, publisher, title, year";

const SELECT_BOOK: &str = "SELECT isbn, amazon_url, author, language, pages, publisher, title, year \
    FROM books WHERE isbn = $1";

const SELECT_BOOKS: &str = "SELECT isbn, amazon_url, author, language, pages, publisher, title, year \
    FROM books ORDER BY title, isbn";

const DELETE_BOOK: &str = "DELETE FROM books WHERE isbn = $1";

#[derive(Debug)]
pub struct SqlBookRepository {
    pool: AnyPool,
}

impl SqlBookRepository {
    pub(crate) fn new(pool: AnyPool) -> Self {
        Self {
            pool,
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for SqlBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let row = sqlx::query(INSERT_BOOK)
            .bind(entity.isbn.as_str())
            .bind(entity.amazon_url.as_str())
            .bind(entity.author.as_str())
            .bind(entity.language.as_str())
            .bind(entity.pages)
            .bind(entity.publisher.as_str())
            .bind(entity.title.as_str())
            .bind(entity.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match LibraryError::from(err) {
                LibraryError::DuplicateKey { .. } => {
                    LibraryError::duplicate_key(format!("book already exists for {}", entity.isbn).as_str())
                }
                other => other,
            })?;
        map_to_book(&row)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let row = sqlx::query(UPDATE_BOOK)
            .bind(entity.amazon_url.as_str())
            .bind(entity.author.as_str())
            .bind(entity.language.as_str())
            .bind(entity.pages)
            .bind(entity.publisher.as_str())
            .bind(entity.title.as_str())
            .bind(entity.year)
            .bind(entity.isbn.as_str())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => map_to_book(&row),
            None => Err(LibraryError::not_found(format!("book not found for {}", entity.isbn).as_str())),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let row = sqlx::query(SELECT_BOOK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => map_to_book(&row),
            None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let res = sqlx::query(DELETE_BOOK)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(LibraryError::not_found(format!("book not found for {}", id).as_str()));
        }
        Ok(res.rows_affected() as usize)
    }

    async fn list(&self) -> LibraryResult<Vec<BookEntity>> {
        sqlx::query(SELECT_BOOKS)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(map_to_book)
            .collect()
    }
}

fn map_to_book(row: &AnyRow) -> LibraryResult<BookEntity> {
    Ok(BookEntity {
        isbn: row.try_get("isbn")?,
        amazon_url: row.try_get("amazon_url")?,
        author: row.try_get("author")?,
        language: row.try_get("language")?,
        pages: int_column(row, "pages")?,
        publisher: row.try_get("publisher")?,
        title: row.try_get("title")?,
        year: int_column(row, "year")?,
    })
}

// sqlite hands back every INTEGER as 64 bits
fn int_column(row: &AnyRow, name: &str) -> LibraryResult<i32> {
    let value: i64 = row.try_get(name)?;
    i32::try_from(value).map_err(|_| {
        LibraryError::database(format!("column {} out of range: {}", name, value).as_str(), None, false)
    })
}
