//! Session guard for pages that need a logged-in user.
//!
//! Requests without a valid user id in the session never reach the wrapped
//! handler; they receive a `303 See Other` to the login page instead.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::inbound::http::error::{LOGIN_PATH, see_other};
use crate::inbound::http::session::SessionContext;

/// Middleware redirecting anonymous requests to the login page.
///
/// Must sit inside the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, web};
/// use pricebook::middleware::RequireSession;
///
/// let resource = web::resource("/items/")
///     .wrap(RequireSession)
///     .route(web::get().to(|| async { HttpResponse::Ok().finish() }));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authenticated = match SessionContext::new(req.get_session()).user_id() {
            Ok(user) => user.is_some(),
            Err(error) => {
                warn!(%error, "unreadable session; treating request as anonymous");
                false
            }
        };

        if authenticated {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        debug!(path = %req.path(), "no session; redirecting to login");
        let response = req
            .into_response(see_other(LOGIN_PATH))
            .map_into_right_body();
        Box::pin(async move { Ok(response) })
    }
}
