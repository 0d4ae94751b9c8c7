use std::fmt;

use getset::Getters;

use serde::{Deserialize, Serialize};

use crate::handlers::RequestHandler;

/// Request methods a route answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MethodFilter {
    Get,
    Post,
    Put,
    Delete,
    #[serde(rename = "ALL")]
    Any,
}

impl MethodFilter {
    fn method(&self) -> Option<http::Method> {
        match self {
            Self::Get => Some(http::Method::GET),
            Self::Post => Some(http::Method::POST),
            Self::Put => Some(http::Method::PUT),
            Self::Delete => Some(http::Method::DELETE),
            Self::Any => None,
        }
    }

    /// Exact, case-sensitive comparison with the request method.
    pub fn accepts(&self, request_method: &str) -> bool {
        match self.method() {
            Some(method) => method.as_str() == request_method,
            None => true,
        }
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method() {
            Some(method) => f.write_str(method.as_str()),
            None => f.write_str("ALL"),
        }
    }
}

#[derive(Getters)]
#[getset(get = "pub")]
pub struct Route {
    method_filter: MethodFilter,
    path: String,
    cleaned_path: String,
    handler: Option<Box<dyn RequestHandler>>,
}

impl Route {
    pub(super) fn new(
        method_filter: MethodFilter,
        path: String,
        cleaned_path: String,
        handler: Option<Box<dyn RequestHandler>>,
    ) -> Self {
        Self {
            method_filter,
            path,
            cleaned_path,
            handler,
        }
    }

    /// `sanitized_uri` must already have gone through `sanitize_url`.
    pub fn matches(&self, request_method: &str, sanitized_uri: &str) -> bool {
        self.method_filter.accepts(request_method) && self.cleaned_path == sanitized_uri
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method_filter", &self.method_filter)
            .field("path", &self.path)
            .field("cleaned_path", &self.cleaned_path)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_filter_is_case_sensitive() {
        assert!(MethodFilter::Get.accepts("GET"));
        assert!(!MethodFilter::Get.accepts("get"));
        assert!(!MethodFilter::Get.accepts("POST"));
        assert!(MethodFilter::Delete.accepts("DELETE"));
        assert!(!MethodFilter::Delete.accepts("DEL"));
    }

    #[test]
    fn test_method_filter_any() {
        for method in ["GET", "POST", "PATCH", "get", ""] {
            assert!(MethodFilter::Any.accepts(method));
        }
    }

    #[test]
    fn test_method_filter_display() {
        assert_eq!(MethodFilter::Put.to_string(), "PUT");
        assert_eq!(MethodFilter::Any.to_string(), "ALL");
    }

    #[test]
    fn test_route_matches() {
        let route = Route::new(
            MethodFilter::Post,
            "/users/".to_string(),
            "/users".to_string(),
            None,
        );

        assert!(route.matches("POST", "/users"));
        assert!(!route.matches("POST", "/users/"));
        assert!(!route.matches("GET", "/users"));
    }
}
