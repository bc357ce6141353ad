use crate::http::{Request, Response};
use crate::middleware::{into_boxed, BoxedMiddleware, Middleware};
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type-erased route handler
pub type BoxedHandler =
    Arc<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

fn boxed<H, Fut>(handler: H) -> BoxedHandler
where
    H: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req| Box::pin(handler(req)) as Pin<Box<dyn Future<Output = Response> + Send>>)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

struct Route {
    handler: BoxedHandler,
    middleware: Vec<BoxedMiddleware>,
}

/// A matched route, ready to run
pub struct RouteMatch {
    pub handler: BoxedHandler,
    pub middleware: Vec<BoxedMiddleware>,
    pub params: HashMap<String, String>,
}

/// HTTP router backed by one matchit tree per method
///
/// ```rust,ignore
/// let router = Router::new()
///     .get("/health", controllers::health::show)
///     .group("/todos", |g| {
///         g.get("/", controllers::todo::index)
///          .get("/search", controllers::todo::search)
///     })
///     .middleware(AuthMiddleware);
/// ```
pub struct Router {
    routes: Vec<Route>,
    get_routes: MatchitRouter<usize>,
    post_routes: MatchitRouter<usize>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
        }
    }

    fn insert(&mut self, method: Method, path: &str, handler: BoxedHandler) -> usize {
        let index = self.routes.len();
        let tree = match method {
            Method::Get => &mut self.get_routes,
            Method::Post => &mut self.post_routes,
        };
        if let Err(e) = tree.insert(path, index) {
            tracing::warn!(path, ?method, error = %e, "route not registered");
        }
        self.routes.push(Route {
            handler,
            middleware: Vec::new(),
        });
        index
    }

    pub fn get<H, Fut>(mut self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let index = self.insert(Method::Get, path, boxed(handler));
        RouteBuilder {
            router: self,
            index,
        }
    }

    pub fn post<H, Fut>(mut self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let index = self.insert(Method::Post, path, boxed(handler));
        RouteBuilder {
            router: self,
            index,
        }
    }

    /// Register routes sharing a path prefix
    pub fn group(mut self, prefix: &str, define: impl FnOnce(Group) -> Group) -> GroupBuilder {
        let group = define(Group {
            prefix: prefix.trim_end_matches('/').to_string(),
            entries: Vec::new(),
        });
        let indices = group
            .entries
            .into_iter()
            .map(|(method, path, handler)| self.insert(method, &path, handler))
            .collect();
        GroupBuilder {
            router: self,
            indices,
        }
    }

    /// Find the route for `method` and `path`
    pub fn match_route(&self, method: &http::Method, path: &str) -> Option<RouteMatch> {
        let tree = match *method {
            http::Method::GET | http::Method::HEAD => &self.get_routes,
            http::Method::POST => &self.post_routes,
            _ => return None,
        };

        let matched = tree.at(path).ok()?;
        let route = &self.routes[*matched.value];
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Some(RouteMatch {
            handler: route.handler.clone(),
            middleware: route.middleware.clone(),
            params,
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Returned after registering a route, for attaching middleware
pub struct RouteBuilder {
    router: Router,
    index: usize,
}

impl RouteBuilder {
    /// Attach middleware to the route just registered
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> RouteBuilder {
        self.router.routes[self.index]
            .middleware
            .push(into_boxed(middleware));
        self
    }

    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }

    pub fn group(self, prefix: &str, define: impl FnOnce(Group) -> Group) -> GroupBuilder {
        self.router.group(prefix, define)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}

/// Routes collected inside `Router::group`
pub struct Group {
    prefix: String,
    entries: Vec<(Method, String, BoxedHandler)>,
}

impl Group {
    fn full_path(&self, path: &str) -> String {
        match path.trim_start_matches('/') {
            "" if self.prefix.is_empty() => "/".to_string(),
            "" => self.prefix.clone(),
            rest => format!("{}/{}", self.prefix, rest),
        }
    }

    pub fn get<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let full = self.full_path(path);
        self.entries.push((Method::Get, full, boxed(handler)));
        self
    }

    pub fn post<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let full = self.full_path(path);
        self.entries.push((Method::Post, full, boxed(handler)));
        self
    }
}

/// Returned by `Router::group`, for attaching middleware to every route in it
pub struct GroupBuilder {
    router: Router,
    indices: Vec<usize>,
}

impl GroupBuilder {
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        let middleware = into_boxed(middleware);
        for &index in &self.indices {
            self.router.routes[index].middleware.push(middleware.clone());
        }
        self
    }

    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    pub fn group(self, prefix: &str, define: impl FnOnce(Group) -> Group) -> GroupBuilder {
        self.router.group(prefix, define)
    }
}

impl From<GroupBuilder> for Router {
    fn from(builder: GroupBuilder) -> Self {
        builder.router
    }
}
