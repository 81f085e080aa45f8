use crate::server::ServerError;
use axum::extract::{FromRequest, FromRequestParts};

#[derive(FromRequestParts, Debug, Clone, Copy, Default)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct Query<T>(pub T);

#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(axum::extract::Form), rejection(ServerError))]
pub struct Form<T>(pub T);
