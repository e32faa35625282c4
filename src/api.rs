use common::{MoveCommand, StateResponse};
use futures::future::LocalBoxFuture;
use thiserror::Error;

pub const STATE_PATH: &str = "/state";
pub const MOVE_PATH: &str = "/move";
pub const OPPONENT_MOVE_PATH: &str = "/botMove";
pub const RESET_PATH: &str = "/reset";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request to {path} failed: {reason}")]
    Network { path: &'static str, reason: String },
    #[error("Request to {path} returned status {status}")]
    Status { path: &'static str, status: u16 },
    #[error("Response from {path} could not be read: {reason}")]
    Body { path: &'static str, reason: String },
}

// The server's HTTP contract. Futures are not Send because everything runs on
// the browser's single thread.
pub trait GameApi {
    // GET /state
    fn fetch_state(&self) -> LocalBoxFuture<'_, Result<StateResponse, ApiError>>;

    // POST /move with the wire string as the raw body
    fn submit_move(&self, command: MoveCommand) -> LocalBoxFuture<'_, Result<(), ApiError>>;

    // POST /botMove
    fn request_opponent_move(&self) -> LocalBoxFuture<'_, Result<(), ApiError>>;

    // GET /reset
    fn reset(&self) -> LocalBoxFuture<'_, Result<(), ApiError>>;
}

// Joins a configured base URL and an endpoint path without doubling the slash
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use futures::FutureExt;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        FetchState,
        SubmitMove(String),
        OpponentMove,
        Reset,
    }

    // Answers come from queues filled by the test; an empty queue means success
    // with the last state pushed.
    #[derive(Default)]
    pub struct MockApi {
        pub calls: RefCell<Vec<Call>>,
        pub states: RefCell<VecDeque<Result<StateResponse, ApiError>>>,
        pub move_results: RefCell<VecDeque<Result<(), ApiError>>>,
        pub opponent_results: RefCell<VecDeque<Result<(), ApiError>>>,
        pub reset_results: RefCell<VecDeque<Result<(), ApiError>>>,
        // How many times the opponent request yields before it answers
        pub opponent_yields: Cell<usize>,
        last_state: RefCell<Option<StateResponse>>,
    }

    impl MockApi {
        pub fn push_state(&self, state: Result<StateResponse, ApiError>) {
            self.states.borrow_mut().push_back(state);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    pub fn state_response(human: (u8, u8), opponent: (u8, u8), last_move: Option<&str>) -> StateResponse {
        let hands = |(l, r): (u8, u8)| {
            serde_json::json!({ "_hands": [{ "alive_fingers": l }, { "alive_fingers": r }] })
        };
        StateResponse {
            state: serde_json::json!({ "_players": [hands(human), hands(opponent)] }).to_string(),
            last_move: last_move.map(|m| serde_json::Value::from(m).to_string()),
        }
    }

    pub fn network_error(path: &'static str) -> ApiError {
        ApiError::Network {
            path,
            reason: "connection refused".to_string(),
        }
    }

    impl GameApi for MockApi {
        fn fetch_state(&self) -> LocalBoxFuture<'_, Result<StateResponse, ApiError>> {
            self.calls.borrow_mut().push(Call::FetchState);
            let result = match self.states.borrow_mut().pop_front() {
                Some(result) => result,
                None => self
                    .last_state
                    .borrow()
                    .clone()
                    .ok_or_else(|| network_error(STATE_PATH)),
            };
            if let Ok(state) = &result {
                *self.last_state.borrow_mut() = Some(state.clone());
            }
            async move { result }.boxed_local()
        }

        fn submit_move(&self, command: MoveCommand) -> LocalBoxFuture<'_, Result<(), ApiError>> {
            self.calls.borrow_mut().push(Call::SubmitMove(command.to_wire()));
            let result = self.move_results.borrow_mut().pop_front().unwrap_or(Ok(()));
            async move { result }.boxed_local()
        }

        fn request_opponent_move(&self) -> LocalBoxFuture<'_, Result<(), ApiError>> {
            self.calls.borrow_mut().push(Call::OpponentMove);
            let result = self
                .opponent_results
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(()));
            let yields = self.opponent_yields.get();
            async move {
                for _ in 0..yields {
                    tokio::task::yield_now().await;
                }
                result
            }
            .boxed_local()
        }

        fn reset(&self) -> LocalBoxFuture<'_, Result<(), ApiError>> {
            self.calls.borrow_mut().push(Call::Reset);
            let result = self.reset_results.borrow_mut().pop_front().unwrap_or(Ok(()));
            async move { result }.boxed_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint("", STATE_PATH), "/state");
        assert_eq!(endpoint("http://localhost:5000/", MOVE_PATH), "http://localhost:5000/move");
        assert_eq!(endpoint("http://localhost:5000", OPPONENT_MOVE_PATH), "http://localhost:5000/botMove");
    }
}
