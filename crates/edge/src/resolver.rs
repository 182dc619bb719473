//! Locale resolution for incoming storefront requests
//!
//! Pure decision procedure: given the request's URL, headers, and cookies plus
//! the current region map, decide whether to pass the request through or
//! redirect it to the canonically country-prefixed URL (possibly setting the
//! cart and onboarding cookies on the way).
//!
//! No I/O happens here and nothing fails outward; inputs that cannot be
//! interpreted degrade to "no country code determined".

use axum::http::{header, HeaderMap, Uri};
use axum_extra::extract::CookieJar;
use storefront_shared::RegionMap;

/// Cookie holding the cart id picked up from a `cart_id` query parameter.
pub const CART_COOKIE: &str = "_medusa_cart_id";

/// Cookie marking that the onboarding flow has been entered.
pub const ONBOARDING_COOKIE: &str = "_medusa_onboarding";

/// Header set by the hosting platform with the client's country.
pub const IP_COUNTRY_HEADER: &str = "x-vercel-ip-country";

/// Max-age for both propagated cookies (24 hours).
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24;

/// The routing-relevant slice of one request. Built once per request and
/// discarded with it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Scheme + authority the redirect target is rebuilt against.
    pub origin: String,
    pub path: String,
    /// Raw query string, preserved verbatim on redirect.
    pub query: Option<String>,
    /// Lowercased `x-vercel-ip-country` value, if present and readable.
    pub ip_country: Option<String>,
    pub onboarding_param: bool,
    pub cart_id: Option<String>,
    pub has_step_param: bool,
    pub has_onboarding_cookie: bool,
    pub has_cart_cookie: bool,
}

impl RequestContext {
    /// Extract the routing-relevant pieces of a request.
    pub fn from_parts(uri: &Uri, headers: &HeaderMap, jar: &CookieJar) -> Self {
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");

        let mut onboarding_param = false;
        let mut cart_id = None;
        let mut has_step_param = false;
        if let Some(q) = uri.query() {
            for (key, value) in url::form_urlencoded::parse(q.as_bytes()) {
                match key.as_ref() {
                    "onboarding" => onboarding_param = value == "true",
                    "cart_id" => cart_id = Some(value.into_owned()),
                    "step" => has_step_param = true,
                    _ => {}
                }
            }
        }

        let ip_country = match headers.get(IP_COUNTRY_HEADER) {
            Some(value) => match value.to_str() {
                Ok(s) => Some(s.to_lowercase()),
                Err(e) => {
                    // Degrade to "no country" rather than failing the request.
                    tracing::debug!(error = %e, "Unreadable {} header", IP_COUNTRY_HEADER);
                    None
                }
            },
            None => None,
        };

        Self {
            origin: format!("{proto}://{host}"),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            ip_country,
            onboarding_param,
            cart_id,
            has_step_param,
            has_onboarding_cookie: jar.get(ONBOARDING_COOKIE).is_some(),
            has_cart_cookie: jar.get(CART_COOKIE).is_some(),
        }
    }

    /// The request's absolute URL, reassembled.
    fn original_url(&self) -> String {
        match &self.query {
            Some(q) => format!("{}{}?{}", self.origin, self.path, q),
            None => format!("{}{}", self.origin, self.path),
        }
    }
}

/// A cookie to set on the outgoing response (path `/`, 24 h max-age).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOp {
    pub name: &'static str,
    pub value: String,
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request continue untouched.
    PassThrough,
    /// 307 to `location`, setting `cookies` on the response.
    Redirect {
        location: String,
        cookies: Vec<CookieOp>,
    },
}

fn first_path_segment(path: &str) -> Option<&str> {
    path.split('/').find(|s| !s.is_empty())
}

/// Derive the country code for a request, in strict priority order: URL
/// prefix, `x-vercel-ip-country` header, configured default, any map key.
/// Yields `None` only when the region map is empty.
pub fn get_country_code(
    ctx: &RequestContext,
    region_map: &RegionMap,
    default_region: &str,
) -> Option<String> {
    if let Some(segment) = first_path_segment(&ctx.path) {
        let candidate = segment.to_lowercase();
        if region_map.contains_key(&candidate) {
            return Some(candidate);
        }
    }

    if let Some(country) = &ctx.ip_country {
        if region_map.contains_key(country) {
            return Some(country.clone());
        }
    }

    if region_map.contains_key(default_region) {
        return Some(default_region.to_string());
    }

    // Arbitrary but valid fallback; order is whatever the map yields.
    region_map.keys().next().cloned()
}

/// Decide whether to pass the request through or redirect it.
///
/// The URL "carries" a country code only when its first path segment equals
/// the derived code exactly; `/usd/...` does not count as carrying `us`.
pub fn resolve(ctx: &RequestContext, region_map: &RegionMap, default_region: &str) -> Decision {
    let country_code = get_country_code(ctx, region_map, default_region);

    let url_has_country_code = match &country_code {
        Some(code) => {
            first_path_segment(&ctx.path).map(str::to_lowercase).as_deref() == Some(code.as_str())
        }
        None => false,
    };

    let needs_onboarding_cookie = ctx.onboarding_param && !ctx.has_onboarding_cookie;
    let needs_cart_cookie = ctx.cart_id.is_some() && !ctx.has_cart_cookie;

    // With no derivable code (empty region map) there is no prefix to add;
    // only a cookie need can still force a redirect.
    let url_settled = url_has_country_code || country_code.is_none();
    if url_settled && !needs_onboarding_cookie && !needs_cart_cookie {
        return Decision::PassThrough;
    }

    // Base target: prefix the derived code when the URL lacks it, otherwise
    // keep the original URL (the redirect then only exists to set cookies).
    let mut location = match (&country_code, url_has_country_code) {
        (Some(code), false) => {
            let path = if ctx.path == "/" { "" } else { ctx.path.as_str() };
            match &ctx.query {
                Some(q) => format!("{}/{}{}?{}", ctx.origin, code, path, q),
                None => format!("{}/{}{}", ctx.origin, code, path),
            }
        }
        _ => ctx.original_url(),
    };

    let mut cookies = Vec::new();

    // A cart id arriving by query parameter is moved into a cookie and the
    // checkout is pointed at the address step, unless a step is already set.
    if let Some(cart_id) = &ctx.cart_id {
        if !ctx.has_step_param {
            location.push_str("&step=address");
            cookies.push(CookieOp {
                name: CART_COOKIE,
                value: cart_id.clone(),
            });
        }
    }

    if ctx.onboarding_param {
        cookies.push(CookieOp {
            name: ONBOARDING_COOKIE,
            value: "true".to_string(),
        });
    }

    Decision::Redirect { location, cookies }
}
