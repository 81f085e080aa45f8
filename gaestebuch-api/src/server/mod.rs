use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{FormRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use gaestebuch_db::repository::PostRepository;
use gaestebuch_db::store::DbError;
use identity::AuthUrls;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

mod extract;
pub mod identity;
mod routes;
mod templates;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub repository: Arc<PostRepository>,
    pub auth_urls: AuthUrls,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Submitted form rejected: {0}")]
    FormRejection(#[from] FormRejection),
    #[error("Rendering the page failed: {0}")]
    Template(#[from] askama::Error),
    #[error("Formatting a timestamp failed: {0}")]
    TimestampFormat(#[from] time::error::Format),
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ServerError::QueryRejection(_) | ServerError::FormRejection(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Template(_)
            | ServerError::TimestampFormat(_)
            | ServerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        (status, Html(format!("<h1>{status}</h1>"))).into_response()
    }
}
