//! JSON-over-HTTP transport for the backend services.
//!
//! Unary:  `POST {base}/{Method}` with a JSON body, answered with one JSON document.
//! Stream: `POST {base}/{Method}` answered with newline-delimited JSON, one item per line.

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use url::Url;

use reqwest::StatusCode;
use tracing::warn;

use super::traits::{BackendError, BackendStream, StreamFault};

/// Client for one backend service
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    base_url: Url,
    service: &'static str,
}

impl RpcClient {
    pub fn new(service: &'static str, base_url: &str, http: reqwest::Client) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid {} service URL: {}", service, e))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            service,
        })
    }

    pub async fn unary<Req, Res>(&self, method: &str, request: &Req) -> Result<Res, BackendError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let response = self.send(method, request).await?;

        response.json::<Res>().await.map_err(|e| BackendError::CallFailed {
            service: self.service,
            message: format!("undecodable {} response: {}", method, e.without_url()),
        })
    }

    /// Unary call whose answer carries nothing; any body, including none, is ignored
    pub async fn unary_ack<Req>(&self, method: &str, request: &Req) -> Result<(), BackendError>
    where
        Req: Serialize + ?Sized,
    {
        let response = self.send(method, request).await?;

        response
            .bytes()
            .await
            .map(|_| ())
            .map_err(|e| self.transport_error(e))
    }

    pub async fn server_stream<Req, Res>(
        &self,
        method: &str,
        request: &Req,
    ) -> Result<BackendStream<Res>, BackendError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned + Send + 'static,
    {
        let response = self.send(method, request).await?;
        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| e.without_url().to_string()));

        Ok(Box::pin(NdjsonStream::new(bytes)))
    }

    async fn send<Req>(&self, method: &str, request: &Req) -> Result<reqwest::Response, BackendError>
    where
        Req: Serialize + ?Sized,
    {
        let url = self.base_url.join(method).map_err(|e| BackendError::CallFailed {
            service: self.service,
            message: format!("invalid method {}: {}", method, e),
        })?;

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(self.service, method, status, &body));
        }

        Ok(response)
    }

    fn transport_error(&self, err: reqwest::Error) -> BackendError {
        let unavailable = err.is_connect() || err.is_timeout();
        let message = err.without_url().to_string();
        if unavailable {
            BackendError::Unavailable {
                service: self.service,
                message,
            }
        } else {
            BackendError::CallFailed {
                service: self.service,
                message,
            }
        }
    }
}

/// Error for a non-success answer. The body may name internal hosts or
/// tables, so it is only logged; callers see the status alone.
fn status_error(
    service: &'static str,
    method: &str,
    status: StatusCode,
    body: &str,
) -> BackendError {
    warn!(service, method, status = %status, body = %body.trim(), "Backend answered with an error status");

    let message = match status {
        StatusCode::NOT_FOUND => "not found".to_string(),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => "request rejected".to_string(),
        _ => format!("backend answered {}", status),
    };

    if status == StatusCode::SERVICE_UNAVAILABLE {
        BackendError::Unavailable { service, message }
    } else {
        BackendError::CallFailed { service, message }
    }
}

/// Stream adapter that turns a byte stream of newline-delimited JSON into items.
///
/// A line that fails to decode is an item fault; a failed chunk read is a
/// transport fault and ends the stream.
pub struct NdjsonStream<T> {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, String>> + Send>>,
    buffer: Vec<u8>,
    finished: bool,
    _item: PhantomData<fn() -> T>,
}

impl<T> NdjsonStream<T> {
    pub fn new(bytes: impl Stream<Item = Result<Bytes, String>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(bytes),
            buffer: Vec::new(),
            finished: false,
            _item: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Stream for NdjsonStream<T> {
    type Item = Result<T, StreamFault>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(line) = take_line(&mut this.buffer) {
                return Poll::Ready(Some(decode_line(&line)));
            }

            if this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(message))) => {
                    this.finished = true;
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(StreamFault::Transport(message))));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    // Final line without a trailing newline
                    let rest = std::mem::take(&mut this.buffer);
                    if !rest.trim_ascii().is_empty() {
                        return Poll::Ready(Some(decode_line(rest.trim_ascii())));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Pop the next non-blank line from the buffer
fn take_line(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    loop {
        let newline = buffer.iter().position(|b| *b == b'\n')?;
        let line: Vec<u8> = buffer.drain(..=newline).collect();
        let line = line.trim_ascii();
        if !line.is_empty() {
            return Some(line.to_vec());
        }
    }
}

fn decode_line<T: DeserializeOwned>(line: &[u8]) -> Result<T, StreamFault> {
    serde_json::from_slice(line).map_err(|e| StreamFault::Item(e.to_string()))
}
