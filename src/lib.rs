pub mod api;
pub mod config;
pub mod scheduler;
pub mod session;
pub mod submit;
pub mod sync;

pub use api::{endpoint, ApiError, GameApi};
pub use config::ClientConfig;
pub use scheduler::{OpponentMoveError, OpponentTurnError, Pacer, TurnScheduler, TurnState};
pub use session::{Indicator, Session, TurnError, View};
pub use submit::{MoveRejected, MoveSubmitter};
pub use sync::{Snapshot, StateSync, SyncError};
