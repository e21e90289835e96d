//! Example walking one client through login, refresh and logout
//!
//! Run with: AUTH_SECRET=change-me cargo run --example auth_lifecycle_demo

use anyhow::Context;
use auth_core::carriers::{BufferedResponse, InMemorySession};
use auth_core::{Clock, TokenAuthenticator, UserIdentity};
use auth_shared::config::AppConfig;
use auth_shared::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("AUTH_SECRET must be set (environment or .env)")?;
    init_tracing(&config.logging)?;

    let authenticator: TokenAuthenticator<UserIdentity> =
        TokenAuthenticator::from_auth_config(&config.auth)?;
    println!(
        "Environment: {}, default validity: {}\n",
        config.environment,
        authenticator.default_validity()
    );

    let mut session = InMemorySession::new();

    // Step 1: login
    println!("Step 1: Issuing token for user 42");
    let mut response = BufferedResponse::new();
    let token = authenticator.issue(&mut session, &mut response, UserIdentity::new(42, "User"), Some("15m"))?;
    for header in response.set_cookie_headers() {
        println!("  Set-Cookie: {}", header);
    }
    println!("  Authenticated: {}\n", authenticator.is_authenticated(&session));

    // Step 2: a later request presents the cookie value
    println!("Step 2: Verifying token");
    let claims = authenticator.verify(&token)?;
    println!(
        "  ✓ user {} ({}) valid for {}s\n",
        claims.identity.id,
        claims.identity.role,
        claims.remaining_seconds(authenticator.clock().now())
    );

    // Step 3: refresh
    println!("Step 3: Refreshing token");
    let mut response = BufferedResponse::new();
    let renewed = authenticator.refresh(&mut session, &mut response, &token, Some("1h"))?;
    for header in response.set_cookie_headers() {
        println!("  Set-Cookie: {}", header);
    }
    println!("  Tokens differ: {}\n", renewed != token);

    // Step 4: tampered input
    println!("Step 4: Verifying a tampered token");
    let tampered = format!("{}x", renewed);
    match authenticator.verify(&tampered) {
        Ok(_) => println!("  ✗ Tampered token accepted\n"),
        Err(e) => println!("  ✓ Rejected: {}\n", e),
    }

    // Step 5: logout
    println!("Step 5: Logging out");
    let mut response = BufferedResponse::new();
    authenticator.logout(&mut session, &mut response, Some("/login"));
    for header in response.set_cookie_headers() {
        println!("  Set-Cookie: {}", header);
    }
    println!("  Redirect: {}", response.redirect_target().unwrap_or("-"));
    println!("  Authenticated: {}", authenticator.is_authenticated(&session));

    Ok(())
}
