use std::collections::BTreeMap;

use async_trait::async_trait;

use chrono::prelude::Local;

use serde::Serialize;

use crate::handlers::{
    utils::build_json_response,
    {FastCGIRequest, HttpResponse, RequestHandler},
};

fn current_time_string() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.9f %z").to_string()
}

#[derive(Debug, Default, Serialize)]
struct RequestInfoResponse<'a> {
    now: String,
    fastcgi_role: &'a str,
    fastcgi_connection_id: u64,
    fastcgi_request_id: u16,
    request_method: &'a str,
    request_uri: &'a str,
    http_headers: BTreeMap<&'a str, &'a str>,
    other_params: BTreeMap<&'a str, &'a str>,
}

/// Describes the request it was routed as JSON.
pub struct RequestInfoHandler {}

impl RequestInfoHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl RequestHandler for RequestInfoHandler {
    async fn handle(&self, request: FastCGIRequest<'_>) -> HttpResponse {
        let mut response = RequestInfoResponse {
            now: current_time_string(),
            fastcgi_role: request.role(),
            fastcgi_connection_id: request.request_id().connection_id().0,
            fastcgi_request_id: request.request_id().request_id(),
            request_method: request.request_method().unwrap_or("[Unknown Method]"),
            request_uri: request.request_uri().unwrap_or("[Unknown URI]"),
            ..Default::default()
        };

        for (key, value) in request.params().iter() {
            match key.strip_prefix("http_") {
                Some(http_header_key) => {
                    response.http_headers.insert(http_header_key, *value);
                }
                None => {
                    response.other_params.insert(*key, *value);
                }
            }
        }

        build_json_response(response)
    }
}
