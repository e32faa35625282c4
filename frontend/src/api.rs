use chopsticks_web::api::{endpoint, OPPONENT_MOVE_PATH, MOVE_PATH, RESET_PATH, STATE_PATH};
use chopsticks_web::{ApiError, GameApi};
use common::{MoveCommand, StateResponse};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use reqwasm::http::{Request, Response};
use tracing::debug;

pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpApi {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

fn network_error(path: &'static str, err: reqwasm::Error) -> ApiError {
    ApiError::Network {
        path,
        reason: err.to_string(),
    }
}

fn check_status(path: &'static str, response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status {
            path,
            status: response.status(),
        })
    }
}

async fn send(path: &'static str, request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|err| network_error(path, err))?;
    check_status(path, &response)?;
    debug!("{} answered {}", path, response.status());
    Ok(response)
}

impl GameApi for HttpApi {
    fn fetch_state(&self) -> LocalBoxFuture<'_, Result<StateResponse, ApiError>> {
        let url = self.url(STATE_PATH);
        async move {
            let response = send(STATE_PATH, Request::get(&url)).await?;
            let body = response.text().await.map_err(|err| ApiError::Body {
                path: STATE_PATH,
                reason: err.to_string(),
            })?;
            serde_json::from_str::<StateResponse>(&body).map_err(|err| ApiError::Body {
                path: STATE_PATH,
                reason: err.to_string(),
            })
        }
        .boxed_local()
    }

    fn submit_move(&self, command: MoveCommand) -> LocalBoxFuture<'_, Result<(), ApiError>> {
        let url = self.url(MOVE_PATH);
        async move {
            let request = Request::post(&url)
                .header("Content-Type", "text/plain")
                .body(command.to_wire());
            send(MOVE_PATH, request).await.map(|_| ())
        }
        .boxed_local()
    }

    fn request_opponent_move(&self) -> LocalBoxFuture<'_, Result<(), ApiError>> {
        let url = self.url(OPPONENT_MOVE_PATH);
        async move {
            send(OPPONENT_MOVE_PATH, Request::post(&url))
                .await
                .map(|_| ())
        }
        .boxed_local()
    }

    fn reset(&self) -> LocalBoxFuture<'_, Result<(), ApiError>> {
        let url = self.url(RESET_PATH);
        async move { send(RESET_PATH, Request::get(&url)).await.map(|_| ()) }.boxed_local()
    }
}
