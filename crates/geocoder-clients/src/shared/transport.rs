use std::future::Future;

use super::{Request, RequestResult, ResponseError};

/**
    Something that can send a [`Request`] and return the raw response body.

    Implementations must map non-2xx responses to [`RequestError::Response`]
    so that callers can classify them as client or server errors.

    [`RequestError::Response`]: super::RequestError::Response
*/
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(&self, request: &Request) -> impl Future<Output = RequestResult<Vec<u8>>> + Send;
}

/**
    The default transport, backed by a shared `reqwest` client.
*/
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> RequestResult<Vec<u8>> {
        let mut builder = self.client.get(request.url()).query(request.query());
        for (key, value) in request.headers() {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ResponseError::new(status.as_u16(), body).into());
        }

        Ok(bytes.to_vec())
    }
}
