use getset::{CopyGetters, Getters};

use tokio::io::AsyncWrite;

use crate::connection::{FastCGIConnectionID, FastCGIRequestID};

pub type ParamKeyValue<'a> = (&'a str, &'a str);

// tokio_fastcgi stores parameter names in lower case.
const REQUEST_METHOD_PARAM: &str = "request_method";
const REQUEST_URI_PARAM: &str = "request_uri";

#[derive(Debug, Getters, CopyGetters)]
pub struct FastCGIRequest<'a> {
    #[getset(get_copy = "pub")]
    role: &'a str,

    #[getset(get_copy = "pub")]
    request_id: FastCGIRequestID,

    #[getset(get_copy = "pub")]
    request_method: Option<&'a str>,

    #[getset(get_copy = "pub")]
    request_uri: Option<&'a str>,

    #[getset(get = "pub")]
    params: Vec<ParamKeyValue<'a>>,
}

impl<'a> FastCGIRequest<'a> {
    pub fn new(
        role: &'a str,
        request_id: FastCGIRequestID,
        request_method: Option<&'a str>,
        request_uri: Option<&'a str>,
        params: Vec<ParamKeyValue<'a>>,
    ) -> Self {
        Self {
            role,
            request_id,
            request_method,
            request_uri,
            params,
        }
    }

    pub fn from_fastcgi<W: AsyncWrite + Unpin>(
        connection_id: FastCGIConnectionID,
        request: &'a tokio_fastcgi::Request<W>,
    ) -> Self {
        let role = match request.role {
            tokio_fastcgi::Role::Authorizer => "Authorizer",
            tokio_fastcgi::Role::Filter => "Filter",
            tokio_fastcgi::Role::Responder => "Responder",
        };

        let params: Vec<ParamKeyValue> = match request.str_params_iter() {
            Some(iter) => iter
                .filter(|v| v.0 != REQUEST_METHOD_PARAM && v.0 != REQUEST_URI_PARAM)
                .map(|v| (v.0, v.1.unwrap_or("[Invalid UTF8]")))
                .collect(),
            None => Vec::new(),
        };

        Self::new(
            role,
            FastCGIRequestID::new(connection_id, request.get_request_id()),
            request.get_str_param(REQUEST_METHOD_PARAM),
            request.get_str_param(REQUEST_URI_PARAM),
            params,
        )
    }
}
