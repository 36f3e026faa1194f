//! Account pages: log in, sign up and log out.
//!
//! ```text
//! GET|POST /          Log in
//! GET|POST /signup/   Create an account
//! GET|POST /logout/   End the session (session required)
//! ```

use actix_web::{HttpResponse, web};
use minijinja::context;
use tracing::{error, info, warn};

use crate::domain::ErrorCode;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::see_other;
use crate::inbound::http::forms::{FormErrors, INVALID_LOGIN, LoginForm, SignupForm, UNAVAILABLE};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, names};

/// Landing page after a successful login.
pub const AFTER_LOGIN_PATH: &str = "/items/";
/// Landing page after a successful signup.
pub const AFTER_SIGNUP_PATH: &str = "/";

const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

fn login_page(username: &str, errors: &FormErrors) -> HttpResponse {
    views::ok(
        names::LOGIN,
        context! { username => username, errors => errors },
    )
}

fn signup_page(username: &str, errors: &FormErrors) -> HttpResponse {
    views::ok(
        names::SIGNUP,
        context! { username => username, errors => errors },
    )
}

/// Render the empty login form.
pub async fn login_form() -> HttpResponse {
    login_page("", &FormErrors::default())
}

/// Check credentials and start a session.
///
/// Failed logins re-render the form with a single non-field message so the
/// response never reveals whether the username exists.
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(login_page(&form.username, &errors)),
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            info!(user_id = %user_id, "user logged in");
            Ok(see_other(AFTER_LOGIN_PATH))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            warn!(username = credentials.username(), "login rejected");
            Ok(login_page(
                credentials.username(),
                &FormErrors::non_field(INVALID_LOGIN),
            ))
        }
        Err(err) => {
            error!(error = %err, "login could not be checked");
            Ok(login_page(
                credentials.username(),
                &FormErrors::non_field(UNAVAILABLE),
            ))
        }
    }
}

/// Render the empty signup form.
pub async fn signup_form() -> HttpResponse {
    signup_page("", &FormErrors::default())
}

/// Register a new account and send the visitor to the login page.
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> HttpResponse {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return signup_page(&form.username, &errors),
    };

    match state.signup.register(&credentials).await {
        Ok(_) => see_other(AFTER_SIGNUP_PATH),
        Err(err) if err.code() == ErrorCode::Conflict => {
            let mut errors = FormErrors::default();
            errors.push("username", DUPLICATE_USERNAME);
            signup_page(credentials.username().as_ref(), &errors)
        }
        Err(err) => {
            error!(error = %err, "signup could not be stored");
            signup_page(
                credentials.username().as_ref(),
                &FormErrors::non_field(UNAVAILABLE),
            )
        }
    }
}

/// End the session and confirm.
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Ok(Some(user_id)) = session.user_id() {
        info!(user_id = %user_id, "user logged out");
    }
    session.purge();
    views::ok(names::LOGOUT, context! { authenticated => false })
}
