use crate::api::{ApiError, GameApi};
use futures::future::{abortable, AbortHandle, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

// Source of the pacing delay. The browser uses a JS timeout, tests use tokio's clock.
pub trait Pacer {
    fn pause(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingOpponent,
}

#[derive(Error, Debug)]
#[error("Opponent move failed: {0}")]
pub struct OpponentMoveError(#[from] pub ApiError);

#[derive(Error, Debug)]
pub enum OpponentTurnError {
    #[error("Opponent turn was cancelled")]
    Cancelled,
    #[error("Opponent turn was not armed")]
    NotArmed,
    #[error(transparent)]
    Request(#[from] OpponentMoveError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArmError {
    #[error("Opponent turn is already pending")]
    AlreadyArmed,
    #[error("Scheduler was torn down")]
    Cancelled,
}

pub struct TurnScheduler {
    delay: Duration,
    state: Cell<TurnState>,
    pending: RefCell<Option<AbortHandle>>,
    cancelled: Cell<bool>,
}

impl TurnScheduler {
    pub fn new(delay: Duration) -> Self {
        TurnScheduler {
            delay,
            state: Cell::new(TurnState::Idle),
            pending: RefCell::new(None),
            cancelled: Cell::new(false),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state.get()
    }

    // Idle -> AwaitingOpponent, once per accepted human move
    pub fn arm(&self) -> Result<(), ArmError> {
        if self.cancelled.get() {
            return Err(ArmError::Cancelled);
        }
        match self.state.get() {
            TurnState::Idle => {
                self.state.set(TurnState::AwaitingOpponent);
                debug!("opponent turn armed");
                Ok(())
            }
            TurnState::AwaitingOpponent => Err(ArmError::AlreadyArmed),
        }
    }

    // Waits out the delay, then asks the server to play the opponent's move.
    // Leaves the state alone; the caller settles it after resyncing.
    pub async fn run<A: GameApi, P: Pacer>(
        &self,
        api: &A,
        pacer: &P,
    ) -> Result<(), OpponentTurnError> {
        if self.state.get() != TurnState::AwaitingOpponent {
            return Err(OpponentTurnError::NotArmed);
        }
        if self.cancelled.get() {
            return Err(OpponentTurnError::Cancelled);
        }

        let (pause, handle) = abortable(pacer.pause(self.delay));
        self.pending.replace(Some(handle));
        let waited = pause.await;
        self.pending.replace(None);
        if waited.is_err() || self.cancelled.get() {
            info!("opponent turn cancelled during delay");
            return Err(OpponentTurnError::Cancelled);
        }

        info!("requesting opponent move");
        api.request_opponent_move().await.map_err(|err| {
            warn!("opponent move request failed: {}", err);
            OpponentMoveError(err)
        })?;
        Ok(())
    }

    // AwaitingOpponent -> Idle, whether or not the turn went well
    pub fn settle(&self) {
        self.state.set(TurnState::Idle);
    }

    // Teardown. Any pending delay is dropped and nothing is requested afterwards.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.abort();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::pacers::{StuckPacer, TokioPacer};
    use super::*;
    use crate::api::mock::{network_error, Call, MockApi};
    use crate::api::OPPONENT_MOVE_PATH;

    #[test]
    fn test_arm_once() {
        let scheduler = TurnScheduler::new(Duration::from_millis(10));
        assert_eq!(scheduler.state(), TurnState::Idle);
        scheduler.arm().unwrap();
        assert_eq!(scheduler.state(), TurnState::AwaitingOpponent);
        assert_eq!(scheduler.arm(), Err(ArmError::AlreadyArmed));
        scheduler.settle();
        assert_eq!(scheduler.state(), TurnState::Idle);
        assert!(scheduler.arm().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_for_delay() {
        let api = MockApi::default();
        let scheduler = TurnScheduler::new(Duration::from_millis(1500));
        scheduler.arm().unwrap();
        let start = tokio::time::Instant::now();
        scheduler.run(&api, &TokioPacer).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(api.calls(), vec![Call::OpponentMove]);
        assert_eq!(scheduler.state(), TurnState::AwaitingOpponent);
    }

    #[tokio::test]
    async fn test_run_requires_arming() {
        let api = MockApi::default();
        let scheduler = TurnScheduler::new(Duration::ZERO);
        assert!(matches!(
            scheduler.run(&api, &TokioPacer).await,
            Err(OpponentTurnError::NotArmed)
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_during_delay() {
        let api = MockApi::default();
        let scheduler = TurnScheduler::new(Duration::from_secs(1));
        scheduler.arm().unwrap();
        let (result, _) = futures::join!(scheduler.run(&api, &StuckPacer), async {
            scheduler.cancel();
        });
        assert!(matches!(result, Err(OpponentTurnError::Cancelled)));
        assert!(api.calls().is_empty());
        assert_eq!(scheduler.arm(), Err(ArmError::Cancelled));
    }

    #[tokio::test]
    async fn test_request_failure() {
        let api = MockApi::default();
        api.opponent_results
            .borrow_mut()
            .push_back(Err(network_error(OPPONENT_MOVE_PATH)));
        let scheduler = TurnScheduler::new(Duration::ZERO);
        scheduler.arm().unwrap();
        assert!(matches!(
            scheduler.run(&api, &TokioPacer).await,
            Err(OpponentTurnError::Request(_))
        ));
        assert_eq!(api.calls(), vec![Call::OpponentMove]);
    }
}
