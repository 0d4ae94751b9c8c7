use log::warn;

use serde::Serialize;

use crate::response::HttpResponse;

pub fn build_json_response(response_dto: impl Serialize) -> HttpResponse {
    let json_result = serde_json::to_string(&response_dto);

    match json_result {
        Err(e) => {
            warn!("json serialization error {}", e);

            build_status_code_response(http::StatusCode::INTERNAL_SERVER_ERROR)
        }
        Ok(json_string) => {
            let mut response = http::Response::new(Some(json_string));
            response.headers_mut().insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
            response
        }
    }
}

pub fn build_status_code_response(status_code: http::StatusCode) -> HttpResponse {
    let mut response = http::Response::new(None);
    *response.status_mut() = status_code;
    response
}
