//! Caller identity.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Header carrying the authenticated employee's id.
///
/// Authentication happens upstream; this service trusts the header.
pub const EMPLOYEE_HEADER: &str = "x-employee-id";

/// The employee making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(EMPLOYEE_HEADER)
            .ok_or_else(|| ApiError::BadRequest("X-Employee-Id header is required.".to_string()))?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(EmployeeId)
            .ok_or_else(|| ApiError::BadRequest("X-Employee-Id must be an integer.".to_string()))
    }
}
