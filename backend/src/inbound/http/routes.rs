//! Route table for the HTTP adapter.
//!
//! ```text
//! /               login          public
//! /signup/        signup         public
//! /logout/        logout         session required
//! /items/         item list      session required
//! /add/           add item       session required
//! /edit/{id}/     edit item      session required
//! /delete/{id}/   delete item    session required
//! /summary/       summary        session required
//! ```
//!
//! The session guard wraps each protected resource rather than a catch-all
//! scope, so unknown paths still answer 404.

use actix_web::web;

use crate::inbound::http::{auth, items};
use crate::middleware::RequireSession;

/// Register every page on `cfg`.
///
/// The caller must install the session middleware around the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(auth::login_form))
            .route(web::post().to(auth::login)),
    )
    .service(
        web::resource("/signup/")
            .route(web::get().to(auth::signup_form))
            .route(web::post().to(auth::signup)),
    )
    .service(
        web::resource("/logout/")
            .wrap(RequireSession)
            .route(web::get().to(auth::logout))
            .route(web::post().to(auth::logout)),
    )
    .service(
        web::resource("/items/")
            .wrap(RequireSession)
            .route(web::get().to(items::list)),
    )
    .service(
        web::resource("/add/")
            .wrap(RequireSession)
            .route(web::get().to(items::add_form))
            .route(web::post().to(items::add)),
    )
    .service(
        web::resource("/edit/{id}/")
            .wrap(RequireSession)
            .route(web::get().to(items::edit_form))
            .route(web::post().to(items::edit)),
    )
    .service(
        web::resource("/delete/{id}/")
            .wrap(RequireSession)
            .route(web::get().to(items::delete_form))
            .route(web::post().to(items::delete)),
    )
    .service(
        web::resource("/summary/")
            .wrap(RequireSession)
            .route(web::get().to(items::summary)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::error::LOGIN_PATH;
    use crate::inbound::http::test_utils::{MockPorts, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case::list("GET", "/items/")]
    #[case::add_form("GET", "/add/")]
    #[case::add("POST", "/add/")]
    #[case::edit_form("GET", "/edit/1/")]
    #[case::edit("POST", "/edit/1/")]
    #[case::delete_form("GET", "/delete/1/")]
    #[case::delete("POST", "/delete/1/")]
    #[case::summary("GET", "/summary/")]
    #[case::logout("POST", "/logout/")]
    #[actix_web::test]
    async fn protected_routes_redirect_anonymous_visitors(
        #[case] method: &str,
        #[case] uri: &str,
    ) {
        // Any port call would panic: the guard must stop the request first.
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MockPorts::default().into_state()))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;
        let request = match method {
            "POST" => test::TestRequest::post().set_form([("name", "x"), ("price", "1")]),
            _ => test::TestRequest::get(),
        };

        let res = test::call_service(&app, request.uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[actix_web::test]
    async fn unknown_paths_are_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MockPorts::default().into_state()))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/nowhere/").to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
