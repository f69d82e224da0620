//! Request extractors whose rejections go through [`AppError`].
//!
//! axum's own `Json` and `Query` reject with plain-text bodies; these wrappers
//! turn every malformed body or query string into an `InvalidInput` error so
//! clients always receive `{"error": "..."}`.

use crate::types::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// URL query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
