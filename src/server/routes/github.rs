//! Repository metadata endpoint

use crate::core::rate_limiter::RateLimitResult;
use crate::core::service::{LookupOutcome, NOT_FOUND_MESSAGE};
use crate::server::middleware::{extract_client_ip, extract_request_id};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use serde::Deserialize;
use tracing::debug;

/// Shared-cache policy for successful lookups
pub const SUCCESS_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

const RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATELIMIT_RESET: &str = "x-ratelimit-reset";

/// Configure repository metadata routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").route("/github", web::get().to(get_repo)));
}

/// Query string of `GET /api/github`
#[derive(Debug, Default, Deserialize)]
pub struct RepoQuery {
    pub repo: Option<String>,
}

/// Look up repository metadata
///
/// Query parameters that fail to decode are treated as absent.
pub async fn get_repo(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let query = web::Query::<RepoQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();
    let client_ip = extract_client_ip(req.headers());
    let request_id = extract_request_id(req.headers());

    debug!(client = %client_ip, repo = ?query.repo, "Repository lookup");

    let outcome = state
        .service
        .lookup(&client_ip, query.repo.as_deref())
        .await;

    match outcome {
        LookupOutcome::Ok {
            summary,
            rate_limit,
        } => {
            let mut builder = HttpResponse::Ok();
            builder.insert_header((header::CACHE_CONTROL, SUCCESS_CACHE_CONTROL));
            insert_rate_limit_headers(&mut builder, &rate_limit);
            builder.json(summary)
        }
        LookupOutcome::TooManyRequests(rate_limit) => {
            let retry_after = rate_limit
                .retry_after_secs
                .unwrap_or_else(|| state.service.limiter().window().as_secs().max(1));
            let mut response =
                GatewayError::rate_limit("Too Many Requests", retry_after).to_response(request_id);

            let headers = response.headers_mut();
            for (name, value) in rate_limit_headers(&rate_limit) {
                headers.insert(name, value);
            }
            response
        }
        LookupOutcome::BadRequest(message) => {
            GatewayError::bad_request(message).to_response(request_id)
        }
        LookupOutcome::NotFound => GatewayError::not_found(NOT_FOUND_MESSAGE).to_response(request_id),
        LookupOutcome::InternalError => {
            GatewayError::internal("repository lookup failed").to_response(request_id)
        }
    }
}

fn rate_limit_headers(rate_limit: &RateLimitResult) -> [(HeaderName, HeaderValue); 3] {
    [
        (
            HeaderName::from_static(RATELIMIT_LIMIT),
            HeaderValue::from(rate_limit.limit),
        ),
        (
            HeaderName::from_static(RATELIMIT_REMAINING),
            HeaderValue::from(rate_limit.remaining),
        ),
        (
            HeaderName::from_static(RATELIMIT_RESET),
            HeaderValue::from(rate_limit.reset_at_millis()),
        ),
    ]
}

fn insert_rate_limit_headers(builder: &mut HttpResponseBuilder, rate_limit: &RateLimitResult) {
    for header in rate_limit_headers(rate_limit) {
        builder.insert_header(header);
    }
}
