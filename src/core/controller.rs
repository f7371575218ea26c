use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum::extract::rejection::JsonRejection;
use serde::{Serialize, Serializer};
use serde_json::json;
use sqlx::AnyPool;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) pool: AnyPool,
}

impl AppState {
    pub fn new(config: Configuration, pool: AnyPool) -> AppState {
        AppState {
            config,
            pool,
        }
    }
}

// ServerError is rendered as {"error": {"status": .., "message": .., "violations": [..]}}
#[derive(Debug, Serialize)]
pub struct ServerError {
    #[serde(serialize_with = "serialize_status")]
    pub(crate) status: StatusCode,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) violations: Option<Vec<String>>,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        ServerError {
            status,
            message: message.to_string(),
            violations: None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self }))).into_response()
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

pub fn rejection_to_server_error(err: JsonRejection) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Database { .. } => {
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, err.message())
            }
            CommandError::DuplicateKey { .. } => {
                ServerError::new(StatusCode::CONFLICT, err.message())
            }
            CommandError::NotFound { .. } => {
                ServerError::new(StatusCode::NOT_FOUND, err.message())
            }
            CommandError::Unavailable { .. } => {
                ServerError::new(StatusCode::SERVICE_UNAVAILABLE, err.message())
            }
            CommandError::Runtime { .. } => {
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, err.message())
            }
            CommandError::Serialization { .. } => {
                ServerError::new(StatusCode::BAD_REQUEST, err.message())
            }
            CommandError::Validation { message, violations } => {
                ServerError {
                    status: StatusCode::BAD_REQUEST,
                    message,
                    violations: Some(violations),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::Value;
    use crate::core::command::CommandError;
    use crate::core::controller::ServerError;

    async fn body_of(err: ServerError) -> (StatusCode, Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        (status, serde_json::from_slice(&bytes).expect("should be json"))
    }

    #[tokio::test]
    async fn test_should_map_command_errors() {
        let cases = vec![
            (CommandError::NotFound { message: "x".to_string() }, StatusCode::NOT_FOUND),
            (CommandError::DuplicateKey { message: "x".to_string() }, StatusCode::CONFLICT),
            (CommandError::Serialization { message: "x".to_string() }, StatusCode::BAD_REQUEST),
            (CommandError::Unavailable { message: "x".to_string(), reason_code: None }, StatusCode::SERVICE_UNAVAILABLE),
            (CommandError::Database { message: "x".to_string(), reason_code: None, retryable: false }, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(status, ServerError::from(err).status);
        }
    }

    #[tokio::test]
    async fn test_should_render_error_body() {
        let (status, body) = body_of(ServerError::from(CommandError::NotFound { message: "no book".to_string() })).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(404, body["error"]["status"]);
        assert_eq!("no book", body["error"]["message"]);
        assert!(body["error"].get("violations").is_none());
    }

    #[tokio::test]
    async fn test_should_render_violations() {
        let err = CommandError::Validation { message: "invalid book".to_string(), violations: vec!["title is required".to_string()] };
        let (status, body) = body_of(ServerError::from(err)).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("title is required", body["error"]["violations"][0]);
    }
}
