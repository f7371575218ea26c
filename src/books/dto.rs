use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is the JSON shape of a book in requests and responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Book for BookDto {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            amazon_url: other.amazon_url.to_string(),
            author: other.author.to_string(),
            language: other.language.to_string(),
            pages: other.pages,
            publisher: other.publisher.to_string(),
            title: other.title.to_string(),
            year: other.year,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            amazon_url: other.amazon_url.to_string(),
            author: other.author.to_string(),
            language: other.language.to_string(),
            pages: other.pages,
            publisher: other.publisher.to_string(),
            title: other.title.to_string(),
            year: other.year,
        }
    }
}
