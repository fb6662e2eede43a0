//! JWT authentication middleware for protecting API endpoints.
//!
//! Tokens are issued by an external auth provider. This middleware only
//! verifies them (HS256, shared secret), takes the caller's user id from the
//! `sub` claim and injects an [`AuthContext`] into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rh_shared::AuthConfig;
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::ApiError;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Authenticated caller, available to handlers as an extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims) -> Result<Self, ApiError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;
        Ok(Self { user_id })
    }
}

/// Verifies bearer tokens against the configured secret and issuer
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthContext, ApiError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            ApiError::unauthorized("Invalid or expired token")
        })?;
        AuthContext::from_claims(&data.claims)
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<TokenVerifier>,
}

impl JwtAuth {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            verifier: Arc::new(TokenVerifier::new(config)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let verified = extract_bearer_token(&req)
                .ok_or_else(|| ApiError::unauthorized("Missing or invalid Authorization header"))
                .and_then(|token| verifier.verify(&token));

            match verified {
                Ok(auth_context) => {
                    req.extensions_mut().insert(auth_context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                // Rejected requests never reach the handler
                Err(error) => {
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("Authentication required").into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, sub: &str, iss: Option<&str>, exp_offset: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            iat: None,
            iss: iss.map(str::to_string),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_verifier_accepts_valid_token() {
        let user_id = Uuid::new_v4();
        let verifier = TokenVerifier::new(&AuthConfig::new("secret"));

        let context = verifier
            .verify(&token("secret", &user_id.to_string(), None, 600))
            .unwrap();
        assert_eq!(context.user_id, user_id);
    }

    #[test]
    fn test_verifier_rejects_bad_tokens() {
        let verifier = TokenVerifier::new(&AuthConfig::new("secret"));
        let user_id = Uuid::new_v4().to_string();

        assert!(verifier.verify(&token("other", &user_id, None, 600)).is_err());
        assert!(verifier.verify(&token("secret", &user_id, None, -3600)).is_err());
        assert!(verifier.verify(&token("secret", "not-a-uuid", None, 600)).is_err());
        assert!(verifier.verify("garbage").is_err());
    }

    #[test]
    fn test_verifier_checks_issuer() {
        let config = AuthConfig::new("secret").with_issuer("renthub-auth");
        let verifier = TokenVerifier::new(&config);
        let user_id = Uuid::new_v4().to_string();

        assert!(verifier
            .verify(&token("secret", &user_id, Some("renthub-auth"), 600))
            .is_ok());
        assert!(verifier
            .verify(&token("secret", &user_id, Some("someone-else"), 600))
            .is_err());
        assert!(verifier.verify(&token("secret", &user_id, None, 600)).is_err());
    }
}
