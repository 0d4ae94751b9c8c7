use anyhow::Context;

use async_trait::async_trait;

use crate::handlers::{FastCGIRequest, HttpResponse, RequestHandler};

/// Answers every request with the same status, content type and body.
pub struct StaticTextHandler {
    status: http::StatusCode,
    content_type: http::HeaderValue,
    body: String,
}

impl StaticTextHandler {
    pub fn new(status: u16, content_type: &str, body: &str) -> anyhow::Result<Self> {
        let status = http::StatusCode::from_u16(status)
            .with_context(|| format!("invalid status code {}", status))?;

        let content_type = http::HeaderValue::from_str(content_type)
            .with_context(|| format!("invalid content type '{}'", content_type))?;

        Ok(Self {
            status,
            content_type,
            body: body.to_string(),
        })
    }
}

#[async_trait]
impl RequestHandler for StaticTextHandler {
    async fn handle(&self, _request: FastCGIRequest<'_>) -> HttpResponse {
        let mut response = http::Response::new(Some(self.body.clone()));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(http::header::CONTENT_TYPE, self.content_type.clone());
        response
    }
}

#[cfg(test)]
mod tests {
    use crate::connection::{FastCGIConnectionID, FastCGIRequestID};

    use super::*;

    #[tokio::test]
    async fn test_static_text_response() {
        let handler = StaticTextHandler::new(201, "text/html", "<p>created</p>").unwrap();

        let request = FastCGIRequest::new(
            "Responder",
            FastCGIRequestID::new(FastCGIConnectionID(1), 1),
            Some("POST"),
            Some("/"),
            Vec::new(),
        );

        let response = handler.handle(request).await;

        assert_eq!(response.status(), http::StatusCode::CREATED);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/html");
        assert_eq!(response.body().as_deref(), Some("<p>created</p>"));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(StaticTextHandler::new(42, "text/plain", "").is_err());
        assert!(StaticTextHandler::new(200, "text/plain\n", "").is_err());
    }
}
