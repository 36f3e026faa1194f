//! HTML views rendered with minijinja.
//!
//! Templates are embedded in the binary and compiled into one process-wide
//! environment on first use. `.html` templates are autoescaped.

use std::sync::LazyLock;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use minijinja::Environment;
use serde::Serialize;
use tracing::error;

/// Template names rendered by handlers.
pub mod names {
    pub const LOGIN: &str = "login.html";
    pub const SIGNUP: &str = "signup.html";
    pub const LOGOUT: &str = "logout.html";
    pub const ITEM_LIST: &str = "item_list.html";
    pub const ITEM_FORM: &str = "item_form.html";
    pub const ITEM_CONFIRM_DELETE: &str = "item_confirm_delete.html";
    pub const ITEM_SUMMARY: &str = "item_summary.html";
    pub const NOT_FOUND: &str = "not_found.html";
    pub const ERROR: &str = "error.html";
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/base.html")),
    ("_errors.html", include_str!("../../../templates/_errors.html")),
    (names::LOGIN, include_str!("../../../templates/login.html")),
    (names::SIGNUP, include_str!("../../../templates/signup.html")),
    (names::LOGOUT, include_str!("../../../templates/logout.html")),
    (names::ITEM_LIST, include_str!("../../../templates/item_list.html")),
    (names::ITEM_FORM, include_str!("../../../templates/item_form.html")),
    (
        names::ITEM_CONFIRM_DELETE,
        include_str!("../../../templates/item_confirm_delete.html"),
    ),
    (
        names::ITEM_SUMMARY,
        include_str!("../../../templates/item_summary.html"),
    ),
    (names::NOT_FOUND, include_str!("../../../templates/not_found.html")),
    (names::ERROR, include_str!("../../../templates/error.html")),
];

static ENVIRONMENT: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(err) = env.add_template(name, source) {
            error!(template = name, error = %err, "failed to compile template");
        }
    }
    env
});

/// Last-resort body when a template itself cannot be rendered.
const FALLBACK_BODY: &str = "<!doctype html><title>Error</title><p>Something went wrong.</p>";

/// Render `template` with `context` into an HTML string.
pub fn render<C: Serialize>(template: &str, context: C) -> Result<String, minijinja::Error> {
    ENVIRONMENT.get_template(template)?.render(context)
}

/// Render `template` into a response with the given status.
///
/// A rendering failure is logged and answered with a plain 500 page.
pub fn page<C: Serialize>(status: StatusCode, template: &str, context: C) -> HttpResponse {
    match render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body),
        Err(err) => {
            error!(template, error = %err, "failed to render template");
            HttpResponse::InternalServerError()
                .content_type(ContentType::html())
                .body(FALLBACK_BODY)
        }
    }
}

/// Render `template` with status 200.
pub fn ok<C: Serialize>(template: &str, context: C) -> HttpResponse {
    page(StatusCode::OK, template, context)
}
