use crate::api::{ApiError, GameApi};
use crate::config::ClientConfig;
use crate::scheduler::{ArmError, OpponentTurnError, Pacer, TurnScheduler, TurnState};
use crate::submit::{MoveRejected, MoveSubmitter};
use crate::sync::{Snapshot, StateSync, SyncError};
use common::{project_with, AffordanceLayout, DisplayModel, Gesture};
use std::cell::{Cell, RefCell};
use thiserror::Error;
use tracing::{error, info, warn};

// Whatever draws the page. Only ever called with a complete model.
pub trait View {
    fn render(&self, model: &DisplayModel);
    fn indicate(&self, indicator: &Indicator);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indicator {
    Clear,
    WaitingForOpponent,
    Error(String),
}

#[derive(Error, Debug)]
pub enum TurnError {
    #[error("A move is already in progress")]
    Busy,
    #[error("No game state has been loaded yet")]
    NotSynced,
    #[error("Session was torn down")]
    TornDown,
    #[error(transparent)]
    Rejected(#[from] MoveRejected),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Opponent(#[from] OpponentTurnError),
    #[error("Could not reset the game: {0}")]
    Reset(ApiError),
}

// One page's worth of game. Every method takes &self so the page can tear the
// session down while a turn is still suspended.
pub struct Session<A: GameApi, P: Pacer, V: View> {
    api: A,
    pacer: P,
    view: V,
    layout: AffordanceLayout,
    sync: StateSync,
    scheduler: TurnScheduler,
    submitting: Cell<bool>,
    model: RefCell<Option<DisplayModel>>,
    torn_down: Cell<bool>,
}

impl<A: GameApi, P: Pacer, V: View> Session<A, P, V> {
    pub fn new(api: A, pacer: P, view: V, config: &ClientConfig) -> Self {
        Session {
            api,
            pacer,
            view,
            layout: AffordanceLayout::standard(),
            sync: StateSync::new(),
            scheduler: TurnScheduler::new(config.opponent_delay()),
            submitting: Cell::new(false),
            model: RefCell::new(None),
            torn_down: Cell::new(false),
        }
    }

    pub fn turn_state(&self) -> TurnState {
        self.scheduler.state()
    }

    pub fn is_busy(&self) -> bool {
        self.submitting.get() || self.scheduler.state() == TurnState::AwaitingOpponent
    }

    pub fn display(&self) -> Option<DisplayModel> {
        self.model.borrow().clone()
    }

    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<(), TurnError> {
        let snapshot = self.resync().await?;
        self.ensure_alive()?;
        self.show(&snapshot);
        Ok(())
    }

    // Runs a whole human turn: submit, resync, pause, opponent move, resync.
    // Each step starts only after the previous one finished.
    #[tracing::instrument(skip(self))]
    pub async fn play(&self, gesture: Gesture) -> Result<(), TurnError> {
        self.ensure_alive()?;
        if self.is_busy() {
            warn!("ignoring {:?}, a turn is already in progress", gesture);
            return Err(TurnError::Busy);
        }
        let snapshot = self.sync.current().ok_or(TurnError::NotSynced)?;
        // Built from the snapshot in hand, never from a stored command
        let command = gesture.encode(&snapshot.state);

        self.submitting.set(true);
        self.redraw();
        let submitted = MoveSubmitter::submit_move(&self.api, command).await;
        if let Err(rejected) = submitted {
            self.submitting.set(false);
            self.ensure_alive()?;
            self.indicate(Indicator::Error(rejected.to_string()));
            self.redraw();
            return Err(rejected.into());
        }

        self.ensure_alive()?;
        self.indicate(Indicator::WaitingForOpponent);
        // A failed resync here is already reported; the opponent still gets its turn
        match self.resync().await {
            Ok(snapshot) => {
                self.ensure_alive()?;
                self.show(&snapshot);
            }
            Err(_) => {
                self.ensure_alive()?;
                self.indicate(Indicator::WaitingForOpponent);
            }
        }
        self.ensure_alive()?;

        let armed = self.scheduler.arm();
        self.submitting.set(false);
        match armed {
            Ok(()) => {}
            Err(ArmError::Cancelled) => return Err(TurnError::TornDown),
            Err(ArmError::AlreadyArmed) => return Err(TurnError::Busy),
        }

        match self.scheduler.run(&self.api, &self.pacer).await {
            Ok(()) => {}
            Err(OpponentTurnError::Cancelled) => return Err(TurnError::TornDown),
            Err(err) => {
                self.scheduler.settle();
                self.ensure_alive()?;
                self.indicate(Indicator::Error(err.to_string()));
                self.redraw();
                return Err(err.into());
            }
        }

        self.ensure_alive()?;
        let synced = self.resync().await;
        self.scheduler.settle();
        self.ensure_alive()?;
        match synced {
            Ok(snapshot) => {
                self.indicate(Indicator::Clear);
                self.show(&snapshot);
                info!("turn complete");
                Ok(())
            }
            Err(err) => {
                self.redraw();
                Err(err.into())
            }
        }
    }

    // Starts a fresh game on the server, then reloads
    #[tracing::instrument(skip(self))]
    pub async fn restart(&self) -> Result<(), TurnError> {
        self.ensure_alive()?;
        if self.is_busy() {
            return Err(TurnError::Busy);
        }
        self.submitting.set(true);
        let reset = self.api.reset().await;
        if let Err(err) = reset {
            self.submitting.set(false);
            self.ensure_alive()?;
            error!("reset failed: {}", err);
            self.indicate(Indicator::Error(err.to_string()));
            return Err(TurnError::Reset(err));
        }
        let synced = self.resync().await;
        self.submitting.set(false);
        self.ensure_alive()?;
        let snapshot = synced?;
        self.indicate(Indicator::Clear);
        self.show(&snapshot);
        Ok(())
    }

    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        info!("tearing down session");
        self.scheduler.cancel();
    }

    fn ensure_alive(&self) -> Result<(), TurnError> {
        if self.torn_down.get() {
            Err(TurnError::TornDown)
        } else {
            Ok(())
        }
    }

    async fn resync(&self) -> Result<Snapshot, SyncError> {
        self.sync.resync(&self.api).await.map_err(|err| {
            error!("resync failed: {}", err);
            if !self.torn_down.get() {
                self.indicate(Indicator::Error(err.to_string()));
            }
            err
        })
    }

    fn show(&self, snapshot: &Snapshot) {
        let model = project_with(&self.layout, &snapshot.state, snapshot.last_move.as_ref())
            .with_moves_enabled(!self.is_busy());
        self.view.render(&model);
        self.model.replace(Some(model));
    }

    // Same model as last time with the affordances matching the current phase
    fn redraw(&self) {
        let model = self
            .model
            .borrow()
            .clone()
            .map(|model| model.with_moves_enabled(!self.is_busy()));
        if let Some(model) = model {
            self.view.render(&model);
            self.model.replace(Some(model));
        }
    }

    fn indicate(&self, indicator: Indicator) {
        self.view.indicate(&indicator);
    }
}
