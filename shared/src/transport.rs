use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self { method, path: path.to_string(), body: None, bearer: None }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post<T: Serialize>(path: &str, data: &T) -> Result<Self, ApiError> {
        Self::new(Method::Post, path).json(data)
    }

    pub fn put<T: Serialize>(path: &str, data: &T) -> Result<Self, ApiError> {
        Self::new(Method::Put, path).json(data)
    }

    fn json<T: Serialize>(mut self, data: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(data).map_err(|err| ApiError::Network(err.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange. Implementations only fail on transport errors;
/// non-2xx statuses come back as responses.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>>;
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
        (**self).send(request)
    }
}

async fn exchange<T: Transport + ?Sized>(transport: &T, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    log::debug!("{} {}", request.method, request.path);
    let response = transport.send(request).await?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(response.status, &response.body))
    }
}

pub async fn fetch_json<R, T>(transport: &T, request: HttpRequest) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        T: Transport + ?Sized,
{
    let response = exchange(transport, request).await?;
    serde_json::from_str::<R>(&response.body).map_err(|err| {
        log::error!("fetch_json: {:?}", err);
        ApiError::Network("Unexpected response from server".to_string())
    })
}

/// For calls where any 2xx (including 204) is the whole answer.
pub async fn fetch_empty<T: Transport + ?Sized>(transport: &T, request: HttpRequest) -> Result<(), ApiError> {
    exchange(transport, request).await.map(|_| ())
}

#[cfg(test)]
pub(crate) mod stub {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use futures::channel::oneshot;
    use futures::future::{self, LocalBoxFuture};
    use futures::FutureExt;

    use super::*;

    /// Replays scripted replies in order and records every request.
    #[derive(Default)]
    pub struct StubTransport {
        replies: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        pub requests: RefCell<Vec<HttpRequest>>,
        gate: RefCell<Option<(Method, oneshot::Receiver<()>)>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        pub fn fail(self, err: ApiError) -> Self {
            self.replies.borrow_mut().push_back(Err(err));
            self
        }

        /// The next `method` request waits until the returned sender fires.
        pub fn hold(self, method: Method) -> (Self, oneshot::Sender<()>) {
            let (release, gate) = oneshot::channel();
            *self.gate.borrow_mut() = Some((method, gate));
            (self, release)
        }

        pub fn calls(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn count(&self, method: Method, path: &str) -> usize {
            self.requests.borrow().iter().filter(|r| r.method == method && r.path == path).count()
        }

        pub fn last(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    impl Transport for StubTransport {
        fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
            let method = request.method;
            self.requests.borrow_mut().push(request);
            let reply = self.replies.borrow_mut().pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())));
            let held = self.gate.borrow().as_ref().map_or(false, |(m, _)| *m == method);
            let gate = if held { self.gate.borrow_mut().take() } else { None };
            match gate {
                Some((_, gate)) => async move {
                    let _ = gate.await;
                    reply
                }.boxed_local(),
                None => future::ready(reply).boxed_local(),
            }
        }
    }
}
