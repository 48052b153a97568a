//! HTTP surface tests
//!
//! Full stack: actix app, lookup service, real `GitHubClient`, mock upstream.

#[cfg(test)]
mod tests {
    use crate::common::{CountingSource, RepoFactory, RepoPayloadFactory};
    use actix_web::http::{StatusCode, header};
    use actix_web::{test, web};
    use repometa_gateway::Config;
    use repometa_gateway::server::builder::ServerBuilder;
    use repometa_gateway::server::server::HttpServer;
    use repometa_gateway::server::state::AppState;
    use repometa_gateway::utils::error::ErrorResponse;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(upstream: &MockServer, limit: u32) -> Config {
        let mut config = Config::default();
        config.gateway.upstream.api_base = upstream.uri();
        config.gateway.upstream.timeout_secs = 2;
        config.gateway.rate_limit.requests_per_window = limit;
        config
    }

    async fn state_for(config: Config) -> web::Data<AppState> {
        let server = ServerBuilder::new().with_config(config).build().await.unwrap();
        web::Data::new(server.state().clone())
    }

    // ==================== Success Path ====================

    #[actix_web::test]
    async fn test_lookup_returns_summary_with_headers() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RepoPayloadFactory::create("octocat/Hello-World")),
            )
            .expect(1)
            .mount(&upstream)
            .await;

        let app = test::init_service(HttpServer::create_app(
            state_for(config_for(&upstream, 60)).await,
        ))
        .await;

        for expected_remaining in ["59", "58"] {
            let req = test::TestRequest::get()
                .uri("/api/github?repo=https%3A%2F%2Fgithub.com%2Foctocat%2FHello-World")
                .insert_header(("x-forwarded-for", "203.0.113.10, 10.0.0.1"))
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                resp.headers().get(header::CACHE_CONTROL).unwrap(),
                "public, s-maxage=3600, stale-while-revalidate=86400"
            );
            assert_eq!(
                resp.headers().get("x-ratelimit-remaining").unwrap(),
                expected_remaining
            );

            let reset: i64 = resp
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap();
            // epoch milliseconds, roughly a minute ahead
            let ahead = reset - chrono::Utc::now().timestamp_millis();
            assert!(ahead > 0 && ahead <= 60_000, "reset {} ms ahead", ahead);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["full_name"], "octocat/Hello-World");
            assert_eq!(body["license"], "MIT License");
            assert_eq!(body["topics"], serde_json::json!(["octocat", "atom"]));
            assert!(body.get("id").is_none());
        }
    }

    // ==================== Client Errors ====================

    #[actix_web::test]
    async fn test_missing_repo_parameter() {
        let upstream = MockServer::start().await;
        let app = test::init_service(HttpServer::create_app(
            state_for(config_for(&upstream, 60)).await,
        ))
        .await;

        for uri in ["/api/github", "/api/github?repo=", "/api/github?other=x"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error.code, "BAD_REQUEST");
            assert_eq!(body.error.message, "Missing 'repo' parameter");
            assert!(body.error.request_id.is_some());
        }
        assert!(upstream.received_requests().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_invalid_repo_format() {
        let upstream = MockServer::start().await;
        let app = test::init_service(HttpServer::create_app(
            state_for(config_for(&upstream, 60)).await,
        ))
        .await;

        for repo in ["octocat", "a%2Fb%2Fc", "https%3A%2F%2Fexample.com%2Fa%2Fb"] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/github?repo={}", repo))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(
                body.error.message,
                "Invalid repository format. Use 'owner/repo' or GitHub URL"
            );
        }
    }

    // ==================== Upstream Failures ====================

    #[actix_web::test]
    async fn test_not_found_is_cached() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&upstream)
            .await;

        let app = test::init_service(HttpServer::create_app(
            state_for(config_for(&upstream, 60)).await,
        ))
        .await;

        for _ in 0..3 {
            let req = test::TestRequest::get()
                .uri("/api/github?repo=ghost/repo")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert!(resp.headers().get(header::CACHE_CONTROL).is_none());

            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error.message, "Repository not found or inaccessible");
        }
    }

    #[actix_web::test]
    async fn test_upstream_outage_is_not_found() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&upstream)
            .await;

        let app = test::init_service(HttpServer::create_app(
            state_for(config_for(&upstream, 60)).await,
        ))
        .await;

        let req = test::TestRequest::get().uri("/api/github?repo=a/b").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // ==================== Rate Limiting ====================

    #[actix_web::test]
    async fn test_rate_limited_response() {
        let source = CountingSource::returning_repo(RepoFactory::create());
        let mut config = Config::default();
        config.gateway.rate_limit.requests_per_window = 2;
        let server = ServerBuilder::new()
            .with_config(config)
            .with_source(source.clone())
            .build()
            .await
            .unwrap();
        let app = test::init_service(HttpServer::create_app(web::Data::new(
            server.state().clone(),
        )))
        .await;

        let request = || {
            test::TestRequest::get()
                .uri("/api/github?repo=octocat/Hello-World")
                .insert_header(("x-real-ip", "198.51.100.77"))
                .to_request()
        };

        for _ in 0..2 {
            let resp = test::call_service(&app, request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = test::call_service(&app, request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get("x-ratelimit-limit").unwrap(), "2");
        assert_eq!(resp.headers().get("x-ratelimit-remaining").unwrap(), "0");
        assert!(resp.headers().contains_key("x-ratelimit-reset"));

        let retry_after: u64 = resp
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap();
        assert!(retry_after > 0 && retry_after <= 60);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error.code, "RATE_LIMIT_EXCEEDED");
        assert_eq!(body.error.retry_after, Some(retry_after));

        // a different client still has budget
        let req = test::TestRequest::get()
            .uri("/api/github?repo=octocat/Hello-World")
            .insert_header(("x-real-ip", "198.51.100.78"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(source.calls(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_route_is_404() {
        let source = CountingSource::returning_repo(RepoFactory::create());
        let server = ServerBuilder::new()
            .with_config(Config::default())
            .with_source(Arc::clone(&source) as _)
            .build()
            .await
            .unwrap();
        let app = test::init_service(HttpServer::create_app(web::Data::new(
            server.state().clone(),
        )))
        .await;

        let req = test::TestRequest::get().uri("/v1/models").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
