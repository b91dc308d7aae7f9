//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware reads the bearer credential from the Authorization header,
//! verifies it with the `TokenService` registered as application data, and
//! injects an `AuthContext` into the request extensions. It can additionally
//! restrict a route to one or more roles.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use dm_core::domain::entities::user::Role;
use dm_core::domain::value_objects::Caller;
use dm_core::errors::{AuthError, DomainError};
use dm_core::services::TokenService;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID taken from the token subject
    pub user_id: Uuid,
    /// Role recorded in the token at issue time
    pub role: Role,
}

impl AuthContext {
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id, self.role)
    }
}

impl From<Caller> for AuthContext {
    fn from(caller: Caller) -> Self {
        Self {
            user_id: caller.user_id,
            role: caller.role,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone)]
pub struct JwtAuth {
    /// Roles admitted; `None` admits any authenticated caller
    roles: Option<Rc<[Role]>>,
}

impl JwtAuth {
    /// Any caller holding a valid credential
    pub fn authenticated() -> Self {
        Self { roles: None }
    }

    /// Only callers with exactly this role
    pub fn require(role: Role) -> Self {
        Self::require_any(&[role])
    }

    /// Callers with one of these roles
    pub fn require_any(roles: &[Role]) -> Self {
        Self {
            roles: Some(Rc::from(roles)),
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
            roles: self.roles.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    roles: Option<Rc<[Role]>>,
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
        let roles = self.roles.clone();

        Box::pin(async move {
            match authorize(&req, roles.as_deref()) {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                // Answer here so the rejection never reaches the handler
                Err(error) => Ok(req.error_response(error).map_into_right_body()),
            }
        })
    }
}

fn authorize(req: &ServiceRequest, roles: Option<&[Role]>) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or(AuthError::MissingToken)?;

    let token_service = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        ApiError(DomainError::internal("Token verification not configured"))
    })?;

    let caller = token_service.authenticate(&token).map_err(|e| {
        tracing::debug!(error = %e, path = %req.path(), "Rejected credential");
        ApiError(e)
    })?;

    if let Some(roles) = roles {
        if !roles.contains(&caller.role) {
            tracing::info!(
                user_id = %caller.user_id,
                role = %caller.role,
                path = %req.path(),
                event = "access_denied",
                "Caller role not allowed on route"
            );
            return Err(AuthError::InsufficientPermissions.into());
        }
    }

    Ok(caller.into())
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for routes wrapped in `JwtAuth`
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken).into());

        ready(result)
    }
}
