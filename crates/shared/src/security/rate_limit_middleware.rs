use crate::models::api::ErrorResponse;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpResponse,
};
use dashmap::DashMap;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use log::warn;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client address.
///
/// The limiter is shared between all actix workers, so a single instance has
/// to be created outside the `HttpServer::new` factory and cloned in.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Arc<DashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(DashMap::new()),
        }
    }

    /// Records one request for `client` and reports whether it is allowed.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        let mut entry = self.clients.entry(client.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }

    /// Drops windows that expired, so idle clients do not accumulate.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.clients
            .retain(|_, window| now.duration_since(window.started_at) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

// Keyed by IP only, so reconnecting from a new source port does not reset the window.
fn client_key(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let addr = info.realip_remote_addr().unwrap_or("unknown");
    addr.parse::<SocketAddr>()
        .map(|socket| socket.ip().to_string())
        .unwrap_or_else(|_| addr.to_string())
}

pub struct RateLimitMiddleware {
    limiter: RateLimiter,
}

impl RateLimitMiddleware {
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = client_key(&req);

        if self.limiter.check(&client) {
            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res.map_into_left_body())
            });
        }

        warn!("Rate limit exceeded for client {client}");
        // Answered here rather than as an Err so outer middleware (CORS headers) still applies.
        let response: HttpResponse =
            ErrorResponse::new(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded", None).into();
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
