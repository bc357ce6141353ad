use crate::config::{Config, ServerConfig};
use crate::http::{HttpResponse, Request};
use crate::middleware::{Middleware, MiddlewareChain, MiddlewareRegistry};
use crate::routing::Router;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// HTTP/1 server
///
/// Each connection runs on its own task. When a client disconnects, hyper
/// drops the in-flight handler future, which cancels any query it awaits.
pub struct Server {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
    host: String,
    port: u16,
}

impl Server {
    pub fn new(router: impl Into<Router>) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }

    /// Use host and port from the registered `ServerConfig`
    pub fn from_config(router: impl Into<Router>) -> Self {
        let config = Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env);
        Self::new(router).host(&config.host).port(config.port)
    }

    /// Add middleware that runs on every matched route
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Run one request through routing, middleware and its handler
    ///
    /// Same path a socket request takes, minus the connection. Used by tests.
    pub async fn handle(&self, request: Request) -> HttpResponse {
        dispatch(&self.router, &self.middleware, request).await
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "server listening");

        let router = self.router;
        let middleware = Arc::new(self.middleware);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => accepted?,
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received; no longer accepting connections");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let router = router.clone();
            let middleware = middleware.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let router = router.clone();
                    let middleware = middleware.clone();
                    async move { Ok::<_, Infallible>(handle_request(&router, &middleware, req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(%peer, error = %err, "connection closed with error");
                }
            });
        }
    }
}

async fn handle_request(
    router: &Router,
    middleware_registry: &MiddlewareRegistry,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>> {
    dispatch(router, middleware_registry, Request::new(req))
        .await
        .into_hyper()
}

async fn dispatch(
    router: &Router,
    middleware_registry: &MiddlewareRegistry,
    request: Request,
) -> HttpResponse {
    let Some(matched) = router.match_route(request.method(), request.path()) else {
        tracing::debug!(method = %request.method(), path = request.path(), "no route");
        return HttpResponse::json(serde_json::json!({ "error": "Not Found" })).status(404);
    };

    let request = request.with_params(matched.params);

    let mut chain = MiddlewareChain::new();
    chain.extend(middleware_registry.global_middleware().iter().cloned());
    chain.extend(matched.middleware);

    // Both arms carry a renderable response.
    chain
        .execute(request, matched.handler)
        .await
        .unwrap_or_else(|e| e)
}
