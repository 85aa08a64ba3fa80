use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use shared::constants::{ApiProfile, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, META_API_BASE};
use shared::error::ApiError;
use shared::transport::{HttpRequest, HttpResponse, Transport};

use crate::utils::{get_window, meta_content};

/// `fetch` against the API base of one application.
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    /// The host page may point the client elsewhere with `<meta name="api-base">`.
    pub fn new(profile: &ApiProfile) -> Self {
        let base_url = meta_content(META_API_BASE).unwrap_or_else(|| profile.base_url.to_string());
        log::info!("api base: {:?}", base_url);
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }
}

impl Transport for FetchTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
        let url = format!("{}{}", self.base_url, request.path);
        Box::pin(async move {
            send(&url, &request).await.map_err(|err| {
                log::error!("connect_fetch {} {}: {:?}", request.method, url, err);
                ApiError::Network("Network error occurred".to_string())
            })
        })
    }
}

async fn send(url: &str, data: &HttpRequest) -> Result<HttpResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(data.method.as_str());
    if let Some(body) = &data.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)?;
    if data.body.is_some() {
        request.headers().set(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)?;
    }
    if let Some(token) = &data.bearer {
        request.headers().set(HEADER_AUTHORIZATION, &format!("Bearer {token}"))?;
    }

    let window = get_window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let body = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();

    Ok(HttpResponse::new(status, body))
}
