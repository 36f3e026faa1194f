//! Shared harness for the HTTP flow suites.
//!
//! Apps run on the in-memory adapters with the real services, so each test
//! starts from empty storage. Cookies are carried between requests by
//! [`Visitor`].

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::test::TestRequest;
use actix_web::{App, web};

use pricebook::Trace;
use pricebook::domain::{AccountService, ItemService};
use pricebook::inbound::http::routes;
use pricebook::inbound::http::state::HttpState;
use pricebook::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use pricebook::outbound::password::BcryptPasswordHasher;

const SESSION_COOKIE: &str = "session";
/// Cheapest bcrypt work factor; keeps signup and login fast in tests.
const TEST_BCRYPT_COST: u32 = 4;

/// A fresh app backed by empty in-memory storage.
pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let hasher = BcryptPasswordHasher::new(TEST_BCRYPT_COST).expect("valid bcrypt cost");
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(hasher),
    ));
    let items = Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new())));
    let state = HttpState::new(accounts.clone(), accounts, items.clone(), items);

    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .wrap(Trace)
        .configure(routes::configure)
}

/// A browser stand-in that remembers the session cookie.
#[derive(Default)]
pub struct Visitor {
    cookie: Option<Cookie<'static>>,
}

impl Visitor {
    pub fn get(&self, uri: &str) -> TestRequest {
        self.with_cookie(TestRequest::get().uri(uri))
    }

    pub fn post(&self, uri: &str, form: &[(&str, &str)]) -> TestRequest {
        self.with_cookie(TestRequest::post().uri(uri).set_form(form))
    }

    /// Record any session cookie the response sets or clears.
    pub fn observe<B>(&mut self, response: &ServiceResponse<B>) {
        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        {
            self.cookie = (!cookie.value().is_empty()).then(|| cookie.into_owned());
        }
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    fn with_cookie(&self, request: TestRequest) -> TestRequest {
        match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        }
    }
}

/// The `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Send a request through `$app`, let `$visitor` see the cookies, and
/// return the response.
macro_rules! visit {
    ($app:expr, $visitor:expr, $request:expr) => {{
        let response = actix_web::test::call_service(&$app, $request.to_request()).await;
        $visitor.observe(&response);
        response
    }};
}

/// Read a response body as text.
macro_rules! body_text {
    ($response:expr) => {
        String::from_utf8(actix_web::test::read_body($response).await.to_vec()).expect("utf-8 body")
    };
}

/// Sign up `username` with `password` and log in, leaving `$visitor` with a
/// live session.
macro_rules! sign_up_and_log_in {
    ($app:expr, $visitor:expr, $username:expr, $password:expr) => {{
        let signup = visit!(
            $app,
            $visitor,
            $visitor.post(
                "/signup/",
                &[
                    ("username", $username),
                    ("password1", $password),
                    ("password2", $password),
                ],
            )
        );
        assert_eq!(signup.status(), actix_web::http::StatusCode::SEE_OTHER);
        let login = visit!(
            $app,
            $visitor,
            $visitor.post("/", &[("username", $username), ("password", $password)])
        );
        assert_eq!(login.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert!($visitor.has_session());
    }};
}
