//! Configuration loading tests

#[cfg(test)]
mod tests {
    use repometa_gateway::config::LogFormat;
    use repometa_gateway::{Config, GatewayError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// The shipped example must load and validate as-is
    #[tokio::test]
    async fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/gateway.yaml.example");
        let config = Config::from_file(path).await.unwrap();

        assert_eq!(config.rate_limit().requests_per_window, 60);
        assert_eq!(config.rate_limit().window_secs, 60);
        assert_eq!(config.cache().success_ttl_secs, 3600);
        assert_eq!(config.cache().not_found_ttl_secs, 300);
        assert_eq!(config.cache().soft_capacity, 100);
        assert_eq!(config.upstream().web_host, "github.com");
    }

    #[tokio::test]
    async fn test_empty_file_uses_defaults() {
        let file = write_config("{}\n");
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.server().port, 8000);
        assert!(config.rate_limit().enabled);
        assert_eq!(config.upstream().api_base, "https://api.github.com");
        assert_eq!(config.logging().format, LogFormat::Text);
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("server: [this is not\n");
        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_zero_window_rejected() {
        let file = write_config("rate_limit:\n  window_secs: 0\n");
        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(msg)) if msg.contains("Rate limit")));
    }

    #[tokio::test]
    async fn test_bad_api_base_rejected() {
        let file = write_config("upstream:\n  api_base: \"not a url\"\n");
        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(msg)) if msg.contains("Upstream")));
    }

    #[tokio::test]
    async fn test_yaml_round_trip_preserves_sections() {
        let file = write_config(
            "cache:\n  transient_ttl_secs: 15\nupstream:\n  token: \"ghp_example\"\n",
        );
        let config = Config::from_file(file.path()).await.unwrap();
        let yaml = config.to_yaml().unwrap();

        let reloaded_file = write_config(&yaml);
        let reloaded = Config::from_file(reloaded_file.path()).await.unwrap();
        assert_eq!(reloaded.cache().transient_ttl_secs, 15);
        assert_eq!(reloaded.upstream().token, config.upstream().token);
    }
}
