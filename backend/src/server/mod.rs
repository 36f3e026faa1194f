//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use pricebook::Trace;
use pricebook::inbound::http::routes;
use pricebook::inbound::http::session_config::SessionSettings;
use pricebook::inbound::http::state::HttpState;

fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    let ttl = CookieDuration::try_from(settings.ttl).unwrap_or_else(|err| {
        warn!(error = %err, "session ttl out of range; using two hours");
        CookieDuration::hours(2)
    });

    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(ttl))
        .build()
}

fn build_app(
    http_state: web::Data<HttpState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(routes::configure)
}

/// Bind the listener and start serving.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let ServerConfig {
        session,
        bind_addr,
        hasher: _,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || build_app(http_state.clone(), session_middleware(&session)))
        .bind(bind_addr)?
        .run();

    Ok(server)
}
