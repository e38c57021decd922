//====================================================================

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::{
    jobs::JobPromise,
    transport::{HttpRequest, HttpResponse, Transport, TransportError, TransportResult},
};

//====================================================================

/// Browser `fetch`, resolved on the page's microtask queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn send(&self, request: HttpRequest) -> JobPromise<TransportResult> {
        let promise = JobPromise::new();
        let task_promise = promise.clone();

        wasm_bindgen_futures::spawn_local(async move {
            log::trace!("{} {}", request.method, request.url);

            let url = request.url.clone();
            let result = execute(request).await.map_err(|err| TransportError {
                url,
                message: format!("{:?}", err),
            });

            task_promise.set_value(result);
        });

        promise
    }
}

async fn execute(request: HttpRequest) -> Result<HttpResponse, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;

    let init = RequestInit::new();
    init.set_method(request.method.as_str());

    if let Some(body) = &request.body {
        init.set_body(&JsValue::from_str(body));
    }

    let js_request = Request::new_with_str_and_init(&request.url, &init)?;
    js_request.headers().set("Accept", "application/json")?;
    if request.body.is_some() {
        js_request
            .headers()
            .set("Content-Type", "application/json")?;
    }

    let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
        .await?
        .dyn_into()?;

    let status = response.status();
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok(HttpResponse { status, body })
}

//====================================================================
