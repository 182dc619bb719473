//! Locale Routing Middleware
//!
//! Applies the resolver to every storefront request: fetches the (cached)
//! region map, derives the request's country code, and either lets the
//! request continue or answers with a 307 to the country-prefixed URL,
//! attaching the cart/onboarding cookies where needed.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::EdgeError;
use crate::resolver::{self, CookieOp, Decision, RequestContext, COOKIE_MAX_AGE_SECS};
use crate::state::AppState;

/// Paths that never take part in locale routing: API routes, static assets,
/// the favicon, and our own health probes.
fn is_excluded(path: &str) -> bool {
    path.starts_with("/api")
        || path.starts_with("/static")
        || path.starts_with("/assets")
        || path.starts_with("/health")
        || path == "/favicon.ico"
}

pub async fn locale_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Response {
    if is_excluded(req.uri().path()) {
        return next.run(req).await;
    }

    let region_map = match state.regions.get_or_refresh(&state.region_client).await {
        Ok(map) => map,
        Err(e) => {
            tracing::error!(path = %req.uri().path(), error = %e, "Region lookup failed");
            return EdgeError::from(e).into_response();
        }
    };

    let ctx = RequestContext::from_parts(req.uri(), req.headers(), &jar);
    match resolver::resolve(&ctx, &region_map, &state.config.default_region) {
        Decision::PassThrough => next.run(req).await,
        Decision::Redirect { location, cookies } => {
            tracing::debug!(from = %ctx.path, to = %location, "Locale redirect");
            redirect_response(&location, &cookies)
        }
    }
}

/// Build the 307 response, preserving method and body semantics for the
/// client's retry against the new location.
fn redirect_response(location: &str, cookies: &[CookieOp]) -> Response {
    let location_value = match HeaderValue::from_str(location) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Unencodable redirect target");
            return EdgeError::Internal.into_response();
        }
    };

    let mut response = (StatusCode::TEMPORARY_REDIRECT, Body::empty()).into_response();
    response
        .headers_mut()
        .insert(header::LOCATION, location_value);

    for op in cookies {
        let cookie = Cookie::build((op.name, op.value.clone()))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(COOKIE_MAX_AGE_SECS))
            .build();
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(v) => {
                response.headers_mut().append(header::SET_COOKIE, v);
            }
            Err(e) => {
                tracing::warn!(cookie = op.name, error = %e, "Dropping unencodable cookie");
            }
        }
    }

    response
}
