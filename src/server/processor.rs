use std::sync::Arc;

use log::{debug, info, warn};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    task::JoinHandle,
};

use tokio_fastcgi::{Request, Requests};

use crate::{
    connection::{FastCGIConnectionID, FastCGIRequestID},
    handlers::{HttpResponse, RequestHandler},
    request::FastCGIRequest,
    response::Responder,
    routing::RequestContext,
};

fn log_route_outcome(
    request_id: FastCGIRequestID,
    context: Option<RequestContext<'_>>,
    response: &HttpResponse,
) {
    match context {
        None => warn!(
            "{:?} missing request method or uri, status {}",
            request_id,
            response.status()
        ),
        Some(context) if response.status() == http::StatusCode::NOT_FOUND => info!(
            "{:?} no route for {} '{}'",
            request_id,
            context.method(),
            context.uri()
        ),
        Some(context) => debug!(
            "{:?} routed {} '{}' status {}",
            request_id,
            context.method(),
            context.uri(),
            response.status()
        ),
    }
}

/// Reads FastCGI requests off one web server connection and routes each on
/// its own task.
pub struct ConnectionProcessor {
    router: Arc<dyn RequestHandler>,
    fastcgi_connection_configuration: crate::config::FastCGIConnectionConfiguration,
}

impl ConnectionProcessor {
    pub fn new(
        router: Arc<dyn RequestHandler>,
        fastcgi_connection_configuration: &crate::config::FastCGIConnectionConfiguration,
    ) -> Arc<Self> {
        Arc::new(Self {
            router,
            fastcgi_connection_configuration: fastcgi_connection_configuration.clone(),
        })
    }

    async fn route_request<W>(
        self: Arc<Self>,
        connection_id: FastCGIConnectionID,
        request: Request<W>,
    ) where
        W: AsyncWrite + Unpin + Send + Sync + 'static,
    {
        let result = request
            .process(|request| async move {
                let fastcgi_request = FastCGIRequest::from_fastcgi(connection_id, request.as_ref());
                let request_id = fastcgi_request.request_id();
                let context = RequestContext::from_request(&fastcgi_request);

                let http_response = self.router.handle(fastcgi_request).await;

                log_route_outcome(request_id, context, &http_response);

                Responder::new(request, http_response).respond().await
            })
            .await;

        if let Err(err) = result {
            warn!(
                "connection_id {:?} request.process failed: err = {}",
                connection_id, err
            );
        }
    }

    pub fn handle_connection<R, W>(
        self: Arc<Self>,
        connection_id: FastCGIConnectionID,
        split_socket: (R, W),
    ) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + Sync + 'static,
        W: AsyncWrite + Unpin + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            let mut requests = Requests::from_split_socket(
                split_socket,
                *self
                    .fastcgi_connection_configuration
                    .max_concurrent_connections(),
                *self
                    .fastcgi_connection_configuration
                    .max_requests_per_connection(),
            );

            loop {
                match requests.next().await {
                    Ok(Some(request)) => {
                        tokio::spawn(Arc::clone(&self).route_request(connection_id, request));
                    }
                    Ok(None) => {
                        debug!("connection_id {:?} closed", connection_id);
                        break;
                    }
                    Err(err) => {
                        warn!(
                            "connection_id {:?} requests.next failed: err = {}",
                            connection_id, err
                        );
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;

    use crate::{handlers::build_status_code_response, routing::Router};

    use super::*;

    fn test_processor() -> Arc<ConnectionProcessor> {
        let router =
            Router::default().get("/", || build_status_code_response(http::StatusCode::OK));

        let fastcgi_connection_configuration: crate::config::FastCGIConnectionConfiguration =
            serde_json::from_str(
                r#"{ "max_concurrent_connections": 1, "max_requests_per_connection": 1 }"#,
            )
            .unwrap();

        ConnectionProcessor::new(Arc::new(router), &fastcgi_connection_configuration)
    }

    #[tokio::test]
    async fn test_connection_task_ends_when_web_server_hangs_up() {
        let (client, server) = tokio::io::duplex(1024);
        drop(client);

        let handle = test_processor()
            .handle_connection(FastCGIConnectionID(1), tokio::io::split(server));

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_connection_task_ends_on_malformed_stream() {
        let (mut client, server) = tokio::io::duplex(1024);

        let handle = test_processor()
            .handle_connection(FastCGIConnectionID(2), tokio::io::split(server));

        // Truncated record header with an unknown protocol version.
        client.write_all(&[9, 1, 0]).await.unwrap();
        drop(client);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn test_log_route_outcome_accepts_every_case() {
        let request_id = FastCGIRequestID::new(FastCGIConnectionID(1), 1);

        log_route_outcome(
            request_id,
            None,
            &build_status_code_response(http::StatusCode::BAD_REQUEST),
        );
        log_route_outcome(
            request_id,
            Some(RequestContext::new("GET", "/missing")),
            &build_status_code_response(http::StatusCode::NOT_FOUND),
        );
        log_route_outcome(
            request_id,
            Some(RequestContext::new("GET", "/")),
            &build_status_code_response(http::StatusCode::OK),
        );
    }
}
