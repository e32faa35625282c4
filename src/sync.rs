use crate::api::{ApiError, GameApi};
use common::{DecodeError, GameState, LastMove, StateResponse};
use std::cell::RefCell;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Could not fetch game state: {0}")]
    Transport(#[from] ApiError),
    #[error("Could not decode game state: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    pub last_move: Option<LastMove>,
}

// Holds the most recent snapshot the server handed out. Each resync swaps the
// whole snapshot; nothing edits it in place.
#[derive(Default)]
pub struct StateSync {
    snapshot: RefCell<Option<Snapshot>>,
}

impl StateSync {
    pub fn new() -> Self {
        StateSync::default()
    }

    // Reads the server's state without touching the container
    pub async fn fetch_state<A: GameApi>(api: &A) -> Result<Snapshot, SyncError> {
        let response = api.fetch_state().await?;
        decode_snapshot(&response)
    }

    pub async fn resync<A: GameApi>(&self, api: &A) -> Result<Snapshot, SyncError> {
        let snapshot = StateSync::fetch_state(api).await?;
        debug!("resynced state: {:?}", snapshot.state);
        self.snapshot.replace(Some(snapshot.clone()));
        Ok(snapshot)
    }

    pub fn current(&self) -> Option<Snapshot> {
        self.snapshot.borrow().clone()
    }
}

pub fn decode_snapshot(response: &StateResponse) -> Result<Snapshot, SyncError> {
    let state = response.decode_state()?;
    // A broken last move must not cost us the board
    let last_move = match response.decode_last_move() {
        Ok(last_move) => last_move,
        Err(err) => {
            warn!("Falling back to raw last move text: {}", err);
            response.last_move.clone().map(LastMove)
        }
    };
    Ok(Snapshot { state, last_move })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{network_error, state_response, Call, MockApi};
    use crate::api::STATE_PATH;
    use common::{HandPos, PlayerNum};

    #[tokio::test]
    async fn test_fetch_state_has_no_side_effects() {
        let api = MockApi::default();
        api.push_state(Ok(state_response((2, 3), (1, 1), None)));
        let sync = StateSync::new();
        let snapshot = StateSync::fetch_state(&api).await.unwrap();
        assert_eq!(snapshot.state.player(PlayerNum::Human).total_fingers(), 5);
        assert_eq!(snapshot.last_move, None);
        assert_eq!(sync.current(), None);
        assert_eq!(api.calls(), vec![Call::FetchState]);
    }

    #[tokio::test]
    async fn test_resync_replaces_snapshot() {
        let api = MockApi::default();
        api.push_state(Ok(state_response((1, 1), (1, 1), None)));
        api.push_state(Ok(state_response((1, 1), (1, 2), Some("h,2,1,2"))));
        let sync = StateSync::new();
        sync.resync(&api).await.unwrap();
        assert_eq!(sync.current().unwrap().last_move, None);
        sync.resync(&api).await.unwrap();
        let current = sync.current().unwrap();
        assert_eq!(current.last_move, Some(LastMove::new("h,2,1,2")));
        assert_eq!(
            current.state.player(PlayerNum::Opponent)[HandPos::Right].alive_fingers,
            2
        );
    }

    #[tokio::test]
    async fn test_failed_resync_keeps_last_good_snapshot() {
        let api = MockApi::default();
        api.push_state(Ok(state_response((3, 1), (1, 1), None)));
        api.push_state(Err(network_error(STATE_PATH)));
        let sync = StateSync::new();
        let good = sync.resync(&api).await.unwrap();
        assert!(matches!(
            sync.resync(&api).await,
            Err(SyncError::Transport(_))
        ));
        assert_eq!(sync.current(), Some(good));
    }

    #[tokio::test]
    async fn test_malformed_state_is_sync_error() {
        let api = MockApi::default();
        api.push_state(Ok(StateResponse {
            state: "{".to_string(),
            last_move: None,
        }));
        let sync = StateSync::new();
        assert!(matches!(sync.resync(&api).await, Err(SyncError::Decode(_))));
        assert_eq!(sync.current(), None);
    }

    #[test]
    fn test_malformed_last_move_keeps_state() {
        let mut response = state_response((2, 2), (1, 1), None);
        response.last_move = Some("( 'h' 2 1 2 )".to_string());
        let snapshot = decode_snapshot(&response).unwrap();
        assert_eq!(snapshot.state.player(PlayerNum::Human).total_fingers(), 4);
        assert_eq!(snapshot.last_move, Some(LastMove::new("( 'h' 2 1 2 )")));
    }
}
