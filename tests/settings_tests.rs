
use std::str::FromStr;

use portfolio_admin::settings::{AppConfig, AppEnvironment};
use test_utils::test_config;

#[test]
fn test_config_is_valid() {
    assert!(test_config().validate().is_ok());
}

#[test]
fn short_jwt_secret_is_rejected() {
    let config = AppConfig {
        jwt_secret: "too-short".into(),
        ..test_config()
    };

    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("JWT_SECRET must be at least 32 characters"));
}

#[test]
fn every_problem_is_reported_together() {
    let config = AppConfig {
        database_url: "  ".into(),
        database_max_connections: 0,
        ..test_config()
    };

    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("DATABASE_URL cannot be empty"));
    assert!(err.contains("DATABASE_MAX_CONNECTIONS must be greater than zero"));
}

#[test]
fn wildcard_cors_is_refused_in_production() {
    let config = AppConfig {
        env: AppEnvironment::Production,
        ..test_config()
    };
    assert!(config.validate().is_err());

    let config = AppConfig {
        env: AppEnvironment::Production,
        cors_allowed_origins: vec!["https://admin.example.com".into()],
        ..test_config()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn cors_origins_split_comma_lists() {
    let config = AppConfig {
        cors_allowed_origins: vec![
            "https://a.example.com, https://b.example.com".into(),
            " ".into(),
            "https://c.example.com".into(),
        ],
        ..test_config()
    };

    assert_eq!(
        config.cors_origins(),
        vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string(),
            "https://c.example.com".to_string(),
        ]
    );
}

#[test]
fn debug_output_hides_secrets() {
    let config = test_config();
    let printed = format!("{:?}", config);

    assert!(!printed.contains(&config.jwt_secret));
    assert!(!printed.contains(&config.database_url));
    assert!(printed.contains("[REDACTED]"));
}

#[test]
fn environment_names_parse_case_insensitively() {
    assert_eq!(AppEnvironment::from_str("Production").unwrap(), AppEnvironment::Production);
    assert_eq!(AppEnvironment::from_str("testing").unwrap().to_string(), "testing");
    assert!(AppEnvironment::from_str("staging").is_err());
}

#[test]
fn server_addr_joins_host_and_port() {
    let config = AppConfig {
        host: "0.0.0.0".into(),
        port: 9000,
        ..test_config()
    };
    assert_eq!(config.server_addr(), "0.0.0.0:9000");
}
