//====================================================================

use super::{
    jobs::JobPromise,
    transport::{HttpRequest, HttpResponse, Transport, TransportError, TransportResult},
};

//====================================================================

/// Blocking `ureq` calls, one worker thread per request.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> JobPromise<TransportResult> {
        let promise = JobPromise::new();
        let thread_promise = promise.clone();
        let agent = self.agent.clone();

        std::thread::spawn(move || {
            log::trace!("{} {}", request.method, request.url);
            thread_promise.set_value(execute(&agent, request));
        });

        promise
    }
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> TransportResult {
    let call = agent
        .request(request.method.as_str(), &request.url)
        .set("Accept", "application/json");

    let result = match request.body {
        Some(body) => call
            .set("Content-Type", "application/json")
            .send_string(&body),
        None => call.call(),
    };

    let response = match result {
        Ok(response) => response,
        // Non-2xx answers still carry a body worth reading
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => {
            return Err(TransportError {
                url: request.url,
                message: err.to_string(),
            })
        }
    };

    let status = response.status();
    let body = response.into_string().map_err(|err| TransportError {
        url: request.url.clone(),
        message: err.to_string(),
    })?;

    Ok(HttpResponse { status, body })
}

//====================================================================
