use axum::http::HeaderValue;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./data/inspiration_board.db".to_string());

        let allowed_origins =
            parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let log_requests = env::var("LOG_REQUESTS")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .map_err(|_| "Invalid LOG_REQUESTS")?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            environment,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// True when any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    /// Allowed origins as header values; unparsable origins are skipped
    pub fn origin_headers(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid origin in ALLOWED_ORIGINS: {}", origin);
                    None
                }
            })
            .collect()
    }
}

/// Split a comma separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://boards.example.com ,"),
            vec!["http://localhost:3000", "https://boards.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    fn config_with_origins(origins: &[&str]) -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            database_path: "boards.db".to_string(),
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            environment: "test".to_string(),
            log_requests: false,
        }
    }

    #[test]
    fn test_server_address_and_wildcard() {
        let config = config_with_origins(&["*"]);

        assert_eq!(config.server_address(), "127.0.0.1:5000");
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_origin_headers_skip_invalid() {
        let config = config_with_origins(&[
            "http://localhost:3000",
            "bad\norigin",
            "https://boards.example.com",
        ]);

        assert!(!config.allows_any_origin());
        assert_eq!(
            config.origin_headers(),
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("https://boards.example.com"),
            ]
        );
    }

    #[test]
    fn test_wildcard_among_other_origins() {
        let config = config_with_origins(&["https://boards.example.com", "*"]);
        assert!(config.allows_any_origin());
    }
}
