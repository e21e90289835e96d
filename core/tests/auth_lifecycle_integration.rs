//! Integration tests for the full issue, verify, refresh and logout lifecycle

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::Duration;
    use serde::{Deserialize, Serialize};

    use auth_core::carriers::{BufferedResponse, InMemorySession};
    use auth_core::services::token::{FixedClock, TokenAuthenticator, TokenServiceConfig};
    use auth_core::{DomainError, TokenError, UserIdentity};
    use auth_shared::config::{AppConfig, AuthConfig, ConfigError, SameSite};

    const NOW: i64 = 1_750_000_000;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Account {
        email: String,
        scopes: Vec<String>,
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_complete_lifecycle() {
        let clock = Arc::new(FixedClock::at_timestamp(NOW));
        let service: TokenAuthenticator<UserIdentity, _> = TokenAuthenticator::with_clock(
            TokenServiceConfig::new("integration-secret"),
            Arc::clone(&clock),
        )
        .unwrap();

        let mut session = InMemorySession::new();

        // Login
        let mut login = BufferedResponse::new();
        let token = service
            .issue(&mut session, &mut login, UserIdentity::new(42, "User"), Some("10m"))
            .unwrap();
        assert!(service.is_authenticated(&session));
        assert_eq!(service.verify(&token).unwrap().exp, NOW + 600);
        assert_eq!(login.set_cookie_headers().len(), 1);

        // Refresh shortly before expiry
        clock.advance(Duration::minutes(9));
        let mut refresh = BufferedResponse::new();
        let renewed = service
            .refresh(&mut session, &mut refresh, &token, Some("10m"))
            .unwrap();
        assert_eq!(service.verify(&renewed).unwrap().exp, NOW + 540 + 600);

        // The original token lapses on its own schedule
        clock.advance(Duration::minutes(1));
        assert!(matches!(
            service.verify(&token),
            Err(DomainError::Token(TokenError::InvalidToken))
        ));
        assert!(service.verify(&renewed).is_ok());

        // Logout
        let mut logout = BufferedResponse::new();
        service.logout(&mut session, &mut logout, Some("/login"));
        assert!(!service.is_authenticated(&session));
        assert_eq!(service.get_identity(&session), None);
        assert!(logout.last_cookie("auth_token").unwrap().is_clearing());
        assert_eq!(logout.redirect_target(), Some("/login"));

        // Logout revokes nothing: the token still verifies until it expires
        assert!(service.verify(&renewed).is_ok());
        clock.advance(Duration::minutes(9));
        assert!(service.verify(&renewed).is_err());
    }

    #[test]
    fn test_authenticator_from_shared_config() {
        let config = AuthConfig::from_lookup(&lookup_from(&[
            ("AUTH_SECRET", "from-environment"),
            ("AUTH_TOKEN_VALIDITY", "2h"),
            ("AUTH_COOKIE_SAMESITE", "strict"),
        ]))
        .unwrap();

        let service: TokenAuthenticator<UserIdentity> =
            TokenAuthenticator::from_auth_config(&config).unwrap();
        assert_eq!(service.default_validity().as_seconds(), 7200);
        assert_eq!(service.cookie_config().same_site, SameSite::Strict);

        let mut session = InMemorySession::new();
        let mut response = BufferedResponse::new();
        let token = service
            .issue(&mut session, &mut response, UserIdentity::new(7, "Admin"), None)
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.identity, UserIdentity::new(7, "Admin"));
        assert_eq!(claims.exp - claims.iat, 7200);
        assert!(response.set_cookie_headers()[0].ends_with("SameSite=Strict"));
    }

    #[test]
    fn test_file_config_cannot_weaken_cookie_attributes() {
        let config = AppConfig::from_toml_str(
            r#"
            [auth.jwt]
            secret = "from-file"

            [auth.cookie]
            same_site = "strict"
            domain = "example.com"
            "#,
        )
        .unwrap();

        let service: TokenAuthenticator<UserIdentity> =
            TokenAuthenticator::from_auth_config(&config.auth).unwrap();
        let mut session = InMemorySession::new();
        let mut response = BufferedResponse::new();
        service
            .issue(&mut session, &mut response, UserIdentity::new(3, "User"), None)
            .unwrap();

        let header = &response.set_cookie_headers()[0];
        assert!(header.ends_with("; Path=/; Domain=example.com; Secure; HttpOnly; SameSite=Strict"));

        let insecure = AppConfig::from_toml_str(
            r#"
            [auth.jwt]
            secret = "from-file"

            [auth.cookie]
            secure = false
            http_only = false
            "#,
        );
        assert!(matches!(insecure, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_malformed_configured_validity_is_rejected() {
        let config = AuthConfig::from_lookup(&lookup_from(&[
            ("AUTH_SECRET", "from-environment"),
            ("AUTH_TOKEN_VALIDITY", "forever"),
        ]));

        let config = config.unwrap();
        let result = TokenAuthenticator::<UserIdentity>::from_auth_config(&config);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_custom_identity_round_trip() {
        let clock = Arc::new(FixedClock::at_timestamp(NOW));
        let service: TokenAuthenticator<Account, _> = TokenAuthenticator::with_clock(
            TokenServiceConfig::new("integration-secret").with_default_validity("1d"),
            clock,
        )
        .unwrap();

        let account = Account {
            email: "someone@example.com".to_string(),
            scopes: vec!["read".to_string(), "write".to_string()],
        };

        let mut session = InMemorySession::new();
        let mut response = BufferedResponse::new();
        let token = service
            .issue(&mut session, &mut response, account.clone(), None)
            .unwrap();

        assert_eq!(service.verify(&token).unwrap().identity, account);
        assert_eq!(service.get_identity(&session), Some(account));
        assert_eq!(
            response.last_cookie("auth_token").unwrap().expires.timestamp(),
            NOW + 86_400
        );
    }

    #[test]
    fn test_tokens_are_not_portable_across_secrets() {
        let first: TokenAuthenticator<UserIdentity> =
            TokenAuthenticator::new(TokenServiceConfig::new("first-secret")).unwrap();
        let second: TokenAuthenticator<UserIdentity> =
            TokenAuthenticator::new(TokenServiceConfig::new("second-secret")).unwrap();

        let mut session = InMemorySession::new();
        let mut response = BufferedResponse::new();
        let token = first
            .issue(&mut session, &mut response, UserIdentity::new(1, "User"), None)
            .unwrap();

        assert!(first.verify(&token).is_ok());
        assert!(second.verify(&token).unwrap_err().is_invalid_token());
    }
}
