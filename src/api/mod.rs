//! HTTP handlers: admin screens, health checks and API docs

pub mod admin;
pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod languages;
pub mod openapi;

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body whose rejections are reported as [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Payload<T>(pub T);
