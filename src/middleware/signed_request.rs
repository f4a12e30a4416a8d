use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::sync::Arc;

use crate::config::Config;
use crate::models::SignedPayload;
use crate::utils::{verify_request_with, ApiResponse};

pub const SIGNED_REQUEST_HEADER: &str = "X-Signed-Request";

/// Rejects requests without a valid signed request header. The verified payload is
/// inserted into request extensions as [`SignedPayload`].
pub struct SignedRequestMiddleware {
    config: Arc<Config>,
}

impl SignedRequestMiddleware {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SignedRequestMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SignedRequestMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SignedRequestMiddlewareService {
            service,
            config: self.config.clone(),
        })
    }
}

pub struct SignedRequestMiddlewareService<S> {
    service: S,
    config: Arc<Config>,
}

impl<S, B> Service<ServiceRequest> for SignedRequestMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get(SIGNED_REQUEST_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim);

        let message = match token {
            Some(token) => match verify_request_with(
                token,
                &self.config.request_secret,
                self.config.signature_format,
            ) {
                Ok(payload) => {
                    req.extensions_mut().insert(SignedPayload(payload));
                    let fut = self.service.call(req);
                    return Box::pin(async move {
                        let res = fut.await?;
                        Ok(res.map_into_left_body())
                    });
                }
                Err(rejection) => {
                    tracing::debug!("Rejected signed request for {}: {}", req.path(), rejection);
                    "Invalid signed request"
                }
            },
            None => "Signed request header missing",
        };

        let response = HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error_with_code("INVALID_TOKEN", message));
        Box::pin(async move {
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}
