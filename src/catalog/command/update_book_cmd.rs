use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// isbn comes from the path, never from the body
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    #[serde(skip)]
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl UpdateBookCommandRequest {
    pub fn with_isbn(mut self, isbn: &str) -> Self {
        self.isbn = isbn.to_string();
        self
    }

    pub fn build_book(&self) -> BookDto {
        BookDto {
            isbn: self.isbn.to_string(),
            amazon_url: self.amazon_url.to_string(),
            author: self.author.to_string(),
            language: self.language.to_string(),
            pages: self.pages,
            publisher: self.publisher.to_string(),
            title: self.title.to_string(),
            year: self.year,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.update_book(&book).await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::utils::fixtures::{seeded_pool, test_config, SEEDED_ISBN};

    fn update_request(isbn: &str) -> UpdateBookCommandRequest {
        let req: UpdateBookCommandRequest = serde_json::from_value(json!({
            "isbn": "ignored",
            "amazon_url": "https://amazon.com",
            "author": "New Author",
            "language": "english",
            "pages": 1000,
            "publisher": "New Publisher",
            "title": "New Title",
            "year": 2021
        })).expect("should parse request");
        req.with_isbn(isbn)
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let svc = factory::create_catalog_service(&test_config(), seeded_pool().await);
        let update_cmd = UpdateBookCommand::new(svc);

        let res = update_cmd.execute(update_request(SEEDED_ISBN)).await.expect("should update book");
        assert_eq!(SEEDED_ISBN, res.book.isbn.as_str());
        assert_eq!("New Author", res.book.author.as_str());
        assert_eq!("New Title", res.book.title.as_str());
    }

    #[tokio::test]
    async fn test_should_fail_update_missing_book() {
        let svc = factory::create_catalog_service(&test_config(), seeded_pool().await);
        let update_cmd = UpdateBookCommand::new(svc);

        let res = update_cmd.execute(update_request("1111")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
