//! End-to-end signup, login and logout flows over the in-memory adapters.

#[macro_use]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use pricebook::domain::TRACE_ID_HEADER;
use rstest::rstest;

use support::{Visitor, app, location};

const PASSWORD: &str = "plum-orchard-42";

#[rstest]
#[actix_web::test]
async fn signup_then_login_reaches_the_item_list() {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();

    let signup = visit!(
        app,
        visitor,
        visitor.post(
            "/signup/",
            &[("username", "ada"), ("password1", PASSWORD), ("password2", PASSWORD)],
        )
    );
    assert_eq!(signup.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signup), Some("/"));
    assert!(!visitor.has_session(), "signup must not log the user in");

    let login = visit!(
        app,
        visitor,
        visitor.post("/", &[("username", "ada"), ("password", PASSWORD)])
    );
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&login), Some("/items/"));

    let list = visit!(app, visitor, visitor.get("/items/"));
    assert_eq!(list.status(), StatusCode::OK);
    assert!(body_text!(list).contains("No items yet."));
}

#[rstest]
#[case::wrong_password("ada", "not-the-password")]
#[case::unknown_user("grace", PASSWORD)]
#[actix_web::test]
async fn bad_credentials_re_render_the_login_form(#[case] username: &str, #[case] password: &str) {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();
    let signup = visit!(
        app,
        visitor,
        visitor.post(
            "/signup/",
            &[("username", "ada"), ("password1", PASSWORD), ("password2", PASSWORD)],
        )
    );
    assert_eq!(signup.status(), StatusCode::SEE_OTHER);

    let login = visit!(
        app,
        visitor,
        visitor.post("/", &[("username", username), ("password", password)])
    );

    assert_eq!(login.status(), StatusCode::OK);
    assert!(!visitor.has_session());
    let body = body_text!(login);
    assert!(body.contains("Please enter a correct username and password."));
    assert!(body.contains(&format!("value=\"{username}\"")));
}

#[rstest]
#[actix_web::test]
async fn duplicate_usernames_are_rejected_at_signup() {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();
    sign_up_and_log_in!(app, visitor, "ada", PASSWORD);

    let mut stranger = Visitor::default();
    let again = visit!(
        app,
        stranger,
        stranger.post(
            "/signup/",
            &[("username", "ada"), ("password1", PASSWORD), ("password2", PASSWORD)],
        )
    );

    assert_eq!(again.status(), StatusCode::OK);
    assert!(body_text!(again).contains("A user with that username already exists."));
}

#[rstest]
#[actix_web::test]
async fn mismatched_passwords_keep_the_visitor_on_the_signup_page() {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();

    let signup = visit!(
        app,
        visitor,
        visitor.post(
            "/signup/",
            &[("username", "ada"), ("password1", PASSWORD), ("password2", "plum-orchard-43")],
        )
    );

    assert_eq!(signup.status(), StatusCode::OK);
    assert!(body_text!(signup).contains("password fields didn"));

    let login = visit!(
        app,
        visitor,
        visitor.post("/", &[("username", "ada"), ("password", PASSWORD)])
    );
    assert_eq!(login.status(), StatusCode::OK, "no account was created");
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session() {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();
    sign_up_and_log_in!(app, visitor, "ada", PASSWORD);

    let logout = visit!(app, visitor, visitor.post("/logout/", &[]));
    assert_eq!(logout.status(), StatusCode::OK);
    assert!(!visitor.has_session());
    assert!(body_text!(logout).contains("You have been logged out."));

    let list = visit!(app, visitor, visitor.get("/items/"));
    assert_eq!(list.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&list), Some("/"));
}

#[rstest]
#[case("/items/")]
#[case("/add/")]
#[case("/edit/1/")]
#[case("/delete/1/")]
#[case("/summary/")]
#[actix_web::test]
async fn anonymous_visitors_are_sent_to_login(#[case] uri: &str) {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();

    let res = visit!(app, visitor, visitor.get(uri));

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/"));
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = test::init_service(app()).await;
    let mut visitor = Visitor::default();

    let login_page = visit!(app, visitor, visitor.get("/"));
    let missing = visit!(app, visitor, visitor.get("/no-such-page/"));

    assert!(login_page.headers().contains_key(TRACE_ID_HEADER));
    assert!(missing.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
