mod request_info;
mod static_text;
mod utils;

use std::sync::Arc;

use async_trait::async_trait;

use log::info;

use crate::{config::HandlerConfiguration, routing::Router};

pub use crate::{request::FastCGIRequest, response::HttpResponse};

pub use utils::{build_json_response, build_status_code_response};

#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: FastCGIRequest<'_>) -> HttpResponse;
}

/// Closures that take no arguments are handlers too.
#[async_trait]
impl<F> RequestHandler for F
where
    F: Fn() -> HttpResponse + Send + Sync,
{
    async fn handle(&self, _request: FastCGIRequest<'_>) -> HttpResponse {
        (self)()
    }
}

fn create_handler(
    handler_configuration: &HandlerConfiguration,
) -> anyhow::Result<Option<Box<dyn RequestHandler>>> {
    let handler: Option<Box<dyn RequestHandler>> = match handler_configuration {
        HandlerConfiguration::StaticText {
            status,
            content_type,
            body,
        } => Some(Box::new(static_text::StaticTextHandler::new(
            *status,
            content_type,
            body,
        )?)),
        HandlerConfiguration::RequestInfo => Some(Box::new(request_info::RequestInfoHandler::new())),
        HandlerConfiguration::Halt => None,
    };

    Ok(handler)
}

pub fn create_handlers(
    router_configuration: &crate::config::RouterConfiguration,
) -> anyhow::Result<Arc<dyn RequestHandler>> {
    let mut router = Router::new(router_configuration.base_path().clone());

    for route_configuration in router_configuration.routes() {
        let handler = create_handler(route_configuration.handler()).map_err(|err| {
            err.context(format!(
                "error creating handler for route {} '{}'",
                route_configuration.method(),
                route_configuration.path()
            ))
        })?;

        router = router.route(
            *route_configuration.method(),
            route_configuration.path().clone(),
            handler,
        );
    }

    for route in router.routes() {
        info!(
            "route {} '{}' -> '{}'",
            route.method_filter(),
            route.path(),
            route.cleaned_path()
        );
    }

    Ok(Arc::new(router))
}

#[cfg(test)]
mod tests {
    use crate::connection::{FastCGIConnectionID, FastCGIRequestID};

    use super::*;

    fn router_configuration(json: &str) -> crate::config::RouterConfiguration {
        serde_json::from_str(json).unwrap()
    }

    fn test_request<'a>(method: &'a str, uri: &'a str) -> FastCGIRequest<'a> {
        FastCGIRequest::new(
            "Responder",
            FastCGIRequestID::new(FastCGIConnectionID(1), 1),
            Some(method),
            Some(uri),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_create_handlers_from_configuration() {
        let handlers = create_handlers(&router_configuration(
            r#"{
                "base_path": "/cgi-bin//",
                "routes": [
                    {
                        "method": "GET",
                        "path": "/hello/",
                        "handler": { "type": "static_text", "body": "hello world" }
                    },
                    {
                        "method": "ALL",
                        "path": "/hello",
                        "handler": { "type": "static_text", "body": "fallback" }
                    },
                    {
                        "method": "DELETE",
                        "path": "/halt",
                        "handler": { "type": "halt" }
                    },
                    {
                        "method": "ALL",
                        "path": "/info",
                        "handler": { "type": "request_info" }
                    }
                ]
            }"#,
        ))
        .unwrap();

        let response = handlers.handle(test_request("GET", "/cgi-bin/hello")).await;
        assert_eq!(response.body().as_deref(), Some("hello world"));

        let response = handlers.handle(test_request("PUT", "/cgi-bin/hello")).await;
        assert_eq!(response.body().as_deref(), Some("fallback"));

        let response = handlers.handle(test_request("DELETE", "/cgi-bin/halt")).await;
        assert_eq!(response.status(), http::StatusCode::OK);
        assert!(response.body().is_none());

        let response = handlers.handle(test_request("GET", "/cgi-bin/halt")).await;
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);

        let response = handlers.handle(test_request("POST", "/cgi-bin/info")).await;
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_create_handlers_invalid_status() {
        let result = create_handlers(&router_configuration(
            r#"{
                "routes": [
                    {
                        "method": "GET",
                        "path": "/",
                        "handler": { "type": "static_text", "status": 7, "body": "" }
                    }
                ]
            }"#,
        ));

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let handler = || build_status_code_response(http::StatusCode::ACCEPTED);

        let response = handler.handle(test_request("GET", "/")).await;

        assert_eq!(response.status(), http::StatusCode::ACCEPTED);
    }
}
