use async_graphql::ErrorExtensions;

use crate::{errors::AppResult, models::dto::request::PaginationParams};

/// Converts a service result into a GraphQL result carrying the `code` extension.
pub fn into_graphql<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|e| e.extend())
}

pub fn pagination(offset: Option<i64>, limit: Option<i64>) -> PaginationParams {
    PaginationParams { offset, limit }
}
