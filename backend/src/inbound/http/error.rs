//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting handlers
//! propagate failures with `?`. Missing sessions become a redirect to the
//! login page, missing items the not-found view, and everything else the
//! generic error page. Domain messages never reach the response body.

use actix_web::http::header::{HeaderName, HeaderValue, LOCATION};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use minijinja::context;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::views::{self, names};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/";

const NOT_FOUND_MESSAGE: &str = "The item you were looking for does not exist.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::SEE_OTHER,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// A `303 See Other` redirect to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Render `err` as a page. `authenticated` keeps the signed-in navigation.
fn render_error(err: &Error, authenticated: bool) -> HttpResponse {
    let status = status_for(err.code());
    let mut response = match err.code() {
        ErrorCode::Unauthorized => see_other(LOGIN_PATH),
        ErrorCode::NotFound => {
            warn!(error = %err, "resource not found");
            views::page(
                status,
                names::NOT_FOUND,
                context! { authenticated => authenticated, message => NOT_FOUND_MESSAGE },
            )
        }
        _ => {
            error!(code = ?err.code(), error = %err, "request failed");
            views::page(
                status,
                names::ERROR,
                context! { authenticated => authenticated, trace_id => err.trace_id() },
            )
        }
    };

    if let Some(value) = err.trace_id().and_then(|id| HeaderValue::from_str(id).ok()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
    response
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        render_error(self, false)
    }
}

/// A domain [`Error`] raised by a handler behind the session guard.
///
/// Renders the same pages as [`Error`] but keeps the navigation for the
/// signed-in visitor.
#[derive(Debug)]
pub struct SignedInError(Error);

impl From<Error> for SignedInError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for SignedInError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for SignedInError {
    fn status_code(&self) -> StatusCode {
        status_for(self.0.code())
    }

    fn error_response(&self) -> HttpResponse {
        render_error(&self.0, true)
    }
}

/// Result alias for handlers behind the session guard.
pub type SignedInResult<T> = Result<T, SignedInError>;

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn body_of(response: HttpResponse) -> String {
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("no session"), StatusCode::SEE_OTHER)]
    #[case(Error::not_found("item 1 not found"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("taken"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("db down"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&err), status);
        assert_eq!(ResponseError::error_response(&err).status(), status);
    }

    #[rstest]
    fn unauthorized_redirects_to_login() {
        let response = Error::unauthorized("login required").error_response();
        assert_eq!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[actix_web::test]
    async fn not_found_renders_view_without_domain_message() {
        let response = Error::not_found("item 99 not found").error_response();
        let body = body_of(response).await;
        assert!(body.contains(NOT_FOUND_MESSAGE));
        assert!(!body.contains("item 99"));
    }

    #[actix_web::test]
    async fn storage_failure_hides_internal_message_and_shows_trace_id() {
        let err = Error::service_unavailable("connection refused by 10.0.0.5").with_trace_id(TRACE_ID);
        let response = err.error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some(TRACE_ID)
        );
        let body = body_of(response).await;
        assert!(!body.contains("10.0.0.5"));
        assert!(body.contains(TRACE_ID));
    }

    #[rstest]
    #[case::not_found(Error::not_found("item 7 not found"), StatusCode::NOT_FOUND)]
    #[case::storage(Error::service_unavailable("db down"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn signed_in_error_pages_keep_navigation(#[case] err: Error, #[case] status: StatusCode) {
        let anonymous = body_of(err.error_response()).await;
        let signed_in = SignedInError::from(err);
        assert_eq!(ResponseError::status_code(&signed_in), status);

        let response = signed_in.error_response();
        assert_eq!(response.status(), status);
        let body = body_of(response).await;

        assert!(body.contains("action=\"/logout/\""));
        assert!(!anonymous.contains("action=\"/logout/\""));
    }

    #[rstest]
    fn actix_errors_become_internal() {
        let actix_err = actix_web::error::ErrorBadRequest("parse failure");
        let err = Error::from(actix_err);
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");
    }
}
