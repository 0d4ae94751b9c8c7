mod path;
mod route;

use async_trait::async_trait;

use getset::CopyGetters;

use log::debug;

use crate::handlers::{build_status_code_response, FastCGIRequest, HttpResponse, RequestHandler};

pub use path::{clean_request, sanitize_url};
pub use route::{MethodFilter, Route};

/// The parts of a request that take part in routing.
#[derive(Clone, Copy, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct RequestContext<'a> {
    method: &'a str,
    uri: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str, uri: &'a str) -> Self {
        Self { method, uri }
    }

    /// `None` when the web server did not pass a method or URI.
    pub fn from_request(request: &FastCGIRequest<'a>) -> Option<Self> {
        Some(Self::new(request.request_method()?, request.request_uri()?))
    }
}

#[derive(Debug)]
pub enum RouteMatch<'r> {
    Matched(&'r Route),
    NotMatched,
}

impl RouteMatch<'_> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Ordered list of routes below a common base path.
///
/// Routes are tried in registration order and the first one whose method
/// filter and normalized path agree with the request wins. Nothing after it
/// is consulted for that request.
pub struct Router {
    base_path: String,
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            routes: Vec::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn clean_request(&self, path: &str) -> String {
        clean_request(&self.base_path, path)
    }

    /// Registers `path` for `method_filter`. A route without a handler still
    /// ends routing when it matches, with an empty response.
    pub fn route(
        mut self,
        method_filter: MethodFilter,
        path: impl Into<String>,
        handler: Option<Box<dyn RequestHandler>>,
    ) -> Self {
        let path = path.into();
        let cleaned_path = self.clean_request(&path);

        debug!(
            "register route {} '{}' as '{}'",
            method_filter, path, cleaned_path
        );

        self.routes.push(Route::new(method_filter, path, cleaned_path, handler));
        self
    }

    pub fn get(self, path: impl Into<String>, handler: impl RequestHandler + 'static) -> Self {
        self.route(MethodFilter::Get, path, Some(Box::new(handler)))
    }

    pub fn post(self, path: impl Into<String>, handler: impl RequestHandler + 'static) -> Self {
        self.route(MethodFilter::Post, path, Some(Box::new(handler)))
    }

    pub fn put(self, path: impl Into<String>, handler: impl RequestHandler + 'static) -> Self {
        self.route(MethodFilter::Put, path, Some(Box::new(handler)))
    }

    pub fn del(self, path: impl Into<String>, handler: impl RequestHandler + 'static) -> Self {
        self.route(MethodFilter::Delete, path, Some(Box::new(handler)))
    }

    pub fn all(self, path: impl Into<String>, handler: impl RequestHandler + 'static) -> Self {
        self.route(MethodFilter::Any, path, Some(Box::new(handler)))
    }

    pub fn dispatch(&self, context: &RequestContext<'_>) -> RouteMatch<'_> {
        let sanitized_uri = sanitize_url(context.uri());
        if sanitized_uri.is_empty() || sanitized_uri == "0" {
            debug!("request uri '{}' is falsy after sanitizing", context.uri());
            return RouteMatch::NotMatched;
        }

        match self
            .routes
            .iter()
            .find(|route| route.matches(context.method(), &sanitized_uri))
        {
            Some(route) => RouteMatch::Matched(route),
            None => RouteMatch::NotMatched,
        }
    }
}

#[async_trait]
impl RequestHandler for Router {
    async fn handle(&self, request: FastCGIRequest<'_>) -> HttpResponse {
        let context = match RequestContext::from_request(&request) {
            None => return build_status_code_response(http::StatusCode::BAD_REQUEST),
            Some(context) => context,
        };

        let route_match = self.dispatch(&context);

        debug!(
            "{} '{}' matched = {}",
            context.method(),
            context.uri(),
            route_match.is_matched()
        );

        match route_match {
            RouteMatch::NotMatched => build_status_code_response(http::StatusCode::NOT_FOUND),
            RouteMatch::Matched(route) => {
                debug!("route = {:?}", route);
                match route.handler() {
                    Some(handler) => handler.handle(request).await,
                    None => build_status_code_response(http::StatusCode::OK),
                }
            }
        }
    }
}
