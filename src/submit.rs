use crate::api::{ApiError, GameApi};
use common::MoveCommand;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
#[error("Move {command} was rejected: {source}")]
pub struct MoveRejected {
    pub command: MoveCommand,
    #[source]
    pub source: ApiError,
}

pub struct MoveSubmitter;

impl MoveSubmitter {
    // Posts the command and nothing else. The caller decides what follows.
    pub async fn submit_move<A: GameApi>(api: &A, command: MoveCommand) -> Result<(), MoveRejected> {
        info!("submitting move {}", command);
        match api.submit_move(command).await {
            Ok(()) => {
                info!("move {} accepted", command);
                Ok(())
            }
            Err(source) => {
                warn!("move {} rejected: {}", command, source);
                Err(MoveRejected { command, source })
            }
        }
    }
}
