//! GitHub client tests against a mock upstream

#[cfg(test)]
mod tests {
    use crate::common::RepoPayloadFactory;
    use repometa_gateway::config::UpstreamConfig;
    use repometa_gateway::core::github::{GitHubClient, RepoSource, RepoSummary, UpstreamError};
    use repometa_gateway::core::repo_cache::FetchOutcome;
    use repometa_gateway::core::repo_key::RepoKey;
    use std::time::Duration;
    use wiremock::matchers::{bearer_token, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
        let config = UpstreamConfig {
            api_base: server.uri(),
            token: token.map(String::from),
            timeout_secs: 1,
            ..Default::default()
        };
        GitHubClient::new(&config).unwrap()
    }

    fn key() -> RepoKey {
        RepoKey::parse("octocat/Hello-World").unwrap()
    }

    // ==================== Request Shape ====================

    #[tokio::test]
    async fn test_sends_expected_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("accept", "application/vnd.github+json"))
            .and(header("x-github-api-version", "2022-11-28"))
            .and(header("user-agent", "repometa-gateway/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RepoPayloadFactory::create("octocat/Hello-World")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let repo = client_for(&server, None).fetch_repo(&key()).await.unwrap();
        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert_eq!(repo.stargazers_count, 80);
    }

    #[tokio::test]
    async fn test_sends_bearer_token_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(bearer_token("ghp_secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RepoPayloadFactory::create("octocat/Hello-World")),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert!(
            client_for(&server, Some("ghp_secret"))
                .fetch_repo(&key())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_omits_authorization_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RepoPayloadFactory::create("octocat/Hello-World")),
            )
            .mount(&server)
            .await;

        client_for(&server, None).fetch_repo(&key()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    // ==================== Payload Handling ====================

    #[tokio::test]
    async fn test_minimal_payload_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(RepoPayloadFactory::minimal("a/b")),
            )
            .mount(&server)
            .await;

        let key = RepoKey::parse("a/b").unwrap();
        let repo = client_for(&server, None).fetch_repo(&key).await.unwrap();
        let summary = RepoSummary::from(&repo);

        assert_eq!(summary.description, "");
        assert_eq!(summary.language, "Unknown");
        assert_eq!(summary.homepage, "");
        assert!(summary.topics.is_empty());
        assert_eq!(summary.license, None);
        assert_eq!(summary.open_issues_count, 0);
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_validation_error() {
        let server = MockServer::start().await;
        let mut payload = RepoPayloadFactory::create("octocat/Hello-World");
        payload["stargazers_count"] = serde_json::json!("lots");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let err = client_for(&server, None).fetch_repo(&key()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Validation(_)));
        assert_eq!(err.outcome(), FetchOutcome::Transient);
    }

    #[tokio::test]
    async fn test_non_json_body_is_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, None).fetch_repo(&key()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Validation(_)));
    }

    // ==================== Status Mapping ====================

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, None).fetch_repo(&key()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::NotFound(_)));
        assert_eq!(err.outcome(), FetchOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_403_maps_to_rate_limited_with_reset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1700000000"),
            )
            .mount(&server)
            .await;

        match client_for(&server, None).fetch_repo(&key()).await {
            Err(UpstreamError::RateLimited { status, reset_at }) => {
                assert_eq!(status, 403);
                assert_eq!(reset_at.map(|t| t.timestamp()), Some(1_700_000_000));
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_429_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server, None).fetch_repo(&key()).await.unwrap_err();
        assert_eq!(err.outcome(), FetchOutcome::RateLimited);
    }

    #[tokio::test]
    async fn test_server_error_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        match client_for(&server, None).fetch_repo(&key()).await {
            Err(err @ UpstreamError::Status { status: 502, .. }) => {
                assert_eq!(err.outcome(), FetchOutcome::Transient)
            }
            other => panic!("expected Status(502), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(RepoPayloadFactory::create("octocat/Hello-World"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, None).fetch_repo(&key()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Network(_)));
        assert_eq!(err.outcome(), FetchOutcome::Transient);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let config = UpstreamConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = GitHubClient::new(&config).unwrap();

        let err = client.fetch_repo(&key()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Network(_)));
    }
}
