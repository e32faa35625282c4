mod display;
mod game_state;
pub mod messages;
mod moves;

pub use display::{
    project, project_with, status_line, Affordance, AffordanceLayout, DisplayModel, PlayerView,
    FIRST_MOVE_PROMPT,
};
pub use game_state::{GameState, Hand, HandPos, Player, PlayerNum, StateError, MAX_FINGERS};
pub use messages::{DecodeError, LastMove, StateResponse};
pub use moves::{encode_hit, encode_split, Gesture, MoveCommand, HIT_TAG, SPLIT_TAG};
