//! Main token authenticator implementation

use auth_shared::config::{AuthConfig, CookieConfig};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::carriers::{ResponseCarrier, SessionStore};
use crate::domain::entities::cookie::AuthCookie;
use crate::domain::entities::token::{TokenClaims, SESSION_PAYLOAD_KEY};
use crate::domain::value_objects::{SigningSecret, TokenValidity};
use crate::errors::{DomainError, DomainResult, TokenError, ValidationError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Issues, verifies and refreshes signed tokens for identities of type `I`
///
/// The authenticator holds only immutable key material and configuration, so
/// one instance can serve any number of concurrent requests. Per-request
/// state lives in the session store and response carrier passed to each call.
pub struct TokenAuthenticator<I, C = SystemClock> {
    secret: SigningSecret,
    default_validity: TokenValidity,
    cookie: CookieConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: C,
    _identity: PhantomData<fn() -> I>,
}

impl<I> TokenAuthenticator<I, SystemClock>
where
    I: Serialize + DeserializeOwned + Clone,
{
    /// Creates an authenticator using wall-clock time
    ///
    /// # Returns
    ///
    /// * `Ok(TokenAuthenticator)` - ready to issue tokens
    /// * `Err(DomainError::Configuration)` - the secret is empty
    /// * `Err(DomainError::Validation)` - the default validity is malformed
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Creates an authenticator from the shared authentication configuration
    pub fn from_auth_config(config: &AuthConfig) -> DomainResult<Self> {
        Self::new(TokenServiceConfig::from(config))
    }
}

impl<I, C> TokenAuthenticator<I, C>
where
    I: Serialize + DeserializeOwned + Clone,
    C: Clock,
{
    /// Creates an authenticator reading time from `clock`
    pub fn with_clock(config: TokenServiceConfig, clock: C) -> DomainResult<Self> {
        let secret = SigningSecret::new(config.secret)?;
        let default_validity: TokenValidity = config.default_validity.parse()?;

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // Expiry is compared against `clock` in `verify`, not the system time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            secret,
            default_validity,
            cookie: config.cookie,
            encoding_key,
            decoding_key,
            validation,
            clock,
            _identity: PhantomData,
        })
    }

    pub fn default_validity(&self) -> TokenValidity {
        self.default_validity
    }

    pub fn cookie_config(&self) -> &CookieConfig {
        &self.cookie
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issues a token for `identity` and stores it in both carriers
    ///
    /// # Arguments
    ///
    /// * `session` - Session carrier; its claims entry is overwritten
    /// * `response` - Response carrier; receives the cookie unless headers were sent
    /// * `identity` - The authenticated subject
    /// * `validity` - Optional validity such as `10m`; defaults to the configured one
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError)` - Missing secret, malformed validity or unserializable identity
    pub fn issue<S, R>(
        &self,
        session: &mut S,
        response: &mut R,
        identity: I,
        validity: Option<&str>,
    ) -> DomainResult<String>
    where
        S: SessionStore + ?Sized,
        R: ResponseCarrier + ?Sized,
    {
        self.ensure_secret()?;
        let validity = self.resolve_validity(validity)?;

        let claims = TokenClaims::issue(identity, self.clock.now(), validity)?;
        let payload = self.session_payload(&claims)?;
        let token = self.sign(&claims)?;

        session.set(SESSION_PAYLOAD_KEY, payload);
        self.write_cookie(response, &token, &claims);

        debug!(exp = claims.exp, "Issued token");
        Ok(token)
    }

    /// Verifies a token's signature and expiry and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - The decoded claims if valid
    /// * `Err(TokenError::InvalidToken)` - Bad signature, malformed or expired
    pub fn verify(&self, token: &str) -> DomainResult<TokenClaims<I>> {
        self.ensure_secret()?;

        let token_data = decode::<TokenClaims<I>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Token rejected");
                DomainError::invalid_token()
            })?;

        if token_data.claims.is_expired_at(self.clock.now()) {
            debug!(exp = token_data.claims.exp, "Token rejected: expired");
            return Err(DomainError::invalid_token());
        }

        Ok(token_data.claims)
    }

    /// Exchanges a valid token for a new one with a recomputed expiry
    ///
    /// The identity is carried over unchanged. The session mirror and the
    /// cookie are updated; the old token stays valid until its own expiry.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new signed token
    /// * `Err(TokenError::InvalidToken)` - `token` failed verification; nothing was written
    /// * `Err(ValidationError)` - `validity` is malformed
    pub fn refresh<S, R>(
        &self,
        session: &mut S,
        response: &mut R,
        token: &str,
        validity: Option<&str>,
    ) -> DomainResult<String>
    where
        S: SessionStore + ?Sized,
        R: ResponseCarrier + ?Sized,
    {
        let current = self.verify(token)?;
        let validity = self.resolve_validity(validity)?;

        let claims = current.renewed(self.clock.now(), validity)?;
        let payload = self.session_payload(&claims)?;
        let new_token = self.sign(&claims)?;

        session.set(SESSION_PAYLOAD_KEY, payload);
        self.write_cookie(response, &new_token, &claims);

        debug!(old_exp = current.exp, exp = claims.exp, "Refreshed token");
        Ok(new_token)
    }

    /// Whether the session holds claims; the stored copy is trusted as-is
    pub fn is_authenticated<S>(&self, session: &S) -> bool
    where
        S: SessionStore + ?Sized,
    {
        session.contains(SESSION_PAYLOAD_KEY)
    }

    /// Claims mirrored in the session, if any can be decoded
    pub fn session_claims<S>(&self, session: &S) -> Option<TokenClaims<I>>
    where
        S: SessionStore + ?Sized,
    {
        let value = session.get(SESSION_PAYLOAD_KEY)?;
        match serde_json::from_value(value) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Session payload does not decode as claims");
                None
            }
        }
    }

    /// Identity mirrored in the session
    pub fn get_identity<S>(&self, session: &S) -> Option<I>
    where
        S: SessionStore + ?Sized,
    {
        self.session_claims(session).map(TokenClaims::into_identity)
    }

    /// Clears both carriers and optionally requests a redirect
    ///
    /// Never fails: a missing session or cookie counts as already logged out.
    pub fn logout<S, R>(&self, session: &mut S, response: &mut R, redirect: Option<&str>)
    where
        S: SessionStore + ?Sized,
        R: ResponseCarrier + ?Sized,
    {
        let had_session = session.remove(SESSION_PAYLOAD_KEY).is_some();

        if response.headers_sent() {
            warn!("Response headers already sent; auth cookie not cleared");
        } else {
            response.set_cookie(AuthCookie::clearing(&self.cookie, self.clock.now()));
        }

        if let Some(target) = redirect.filter(|t| !t.is_empty()) {
            response.redirect(target);
        }

        debug!(had_session, "Logged out");
    }

    fn ensure_secret(&self) -> DomainResult<()> {
        if self.secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "Secret key is required for authentication".to_string(),
            });
        }
        Ok(())
    }

    fn resolve_validity(&self, validity: Option<&str>) -> Result<TokenValidity, ValidationError> {
        match validity {
            Some(input) => input.parse(),
            None => Ok(self.default_validity),
        }
    }

    fn session_payload(&self, claims: &TokenClaims<I>) -> DomainResult<Value> {
        serde_json::to_value(claims)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn sign(&self, claims: &TokenClaims<I>) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn write_cookie<R>(&self, response: &mut R, token: &str, claims: &TokenClaims<I>)
    where
        R: ResponseCarrier + ?Sized,
    {
        if response.headers_sent() {
            warn!("Response headers already sent; auth cookie not written");
            return;
        }

        match claims.expires_at() {
            Some(expires) => response.set_cookie(AuthCookie::with_token(&self.cookie, token, expires)),
            None => warn!(exp = claims.exp, "Expiry out of range; auth cookie not written"),
        }
    }
}
