//! Request auth gate
//!
//! Inspects the optional `Authorization` header and annotates the request
//! with an [`AuthContext`]. The gate never rejects: a missing, malformed, or
//! unverifiable credential yields the anonymous context, and downstream
//! resolvers decide whether authentication is required.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::error::ApiError;
use crate::gateway::state::AppState;

/// Immutable per-request authentication state, valid for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub user_id: Option<i64>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            user_id: None,
        }
    }

    pub fn authenticated(user_id: i64) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(user_id),
        }
    }

    /// The common precondition for every operation except signup and login.
    pub fn require(&self) -> Result<i64, ApiError> {
        match (self.is_authenticated, self.user_id) {
            (true, Some(user_id)) => Ok(user_id),
            _ => Err(ApiError::AuthenticationRequired),
        }
    }
}

/// Derive the auth context from request headers. Verification failures are
/// indistinguishable from an absent credential.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> AuthContext {
    let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return AuthContext::anonymous();
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return AuthContext::anonymous();
    };

    match tokens.verify(token) {
        Ok(claims) => AuthContext::authenticated(claims.user_id),
        Err(_) => AuthContext::anonymous(),
    }
}

/// Axum middleware: annotate the request and continue unconditionally.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let ctx = authenticate(request.headers(), &state.tokens);
    request.extensions_mut().insert(ctx);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn tokens() -> TokenService {
        TokenService::new("gate-test-secret", 24)
    }

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_no_header_is_anonymous() {
        let ctx = authenticate(&HeaderMap::new(), &tokens());
        assert_eq!(ctx, AuthContext::anonymous());
        assert!(ctx.require().is_err());
    }

    #[test]
    fn test_missing_token_segment_is_anonymous() {
        let ctx = authenticate(&headers_with_auth("Bearer"), &tokens());
        assert_eq!(ctx, AuthContext::anonymous());
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        let ctx = authenticate(&headers_with_auth("Bearer not.a.token"), &tokens());
        assert_eq!(ctx, AuthContext::anonymous());
    }

    #[test]
    fn test_wrong_scheme_is_anonymous() {
        let ctx = authenticate(&headers_with_auth("Basic dXNlcjpwdw=="), &tokens());
        assert_eq!(ctx, AuthContext::anonymous());
    }

    #[test]
    fn test_valid_token_is_authenticated() {
        let svc = tokens();
        let token = svc.sign("user@example.com", 7).unwrap();
        let ctx = authenticate(&headers_with_auth(&format!("Bearer {token}")), &svc);
        assert_eq!(ctx, AuthContext::authenticated(7));
        assert_eq!(ctx.require().unwrap(), 7);
    }

    #[test]
    fn test_foreign_token_is_anonymous() {
        let other = TokenService::new("some-other-secret", 24);
        let token = other.sign("user@example.com", 7).unwrap();
        let ctx = authenticate(&headers_with_auth(&format!("Bearer {token}")), &tokens());
        assert_eq!(ctx, AuthContext::anonymous());
    }
}
