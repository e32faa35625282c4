use crate::game_state::{GameState, HandPos, Player, PlayerNum};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HIT_TAG: &str = "h";
// A split always moves fingers between hand 1 and hand 2, followed by the new left count
pub const SPLIT_TAG: &str = "s,1,2,";

// A move ready to be posted to the server. The wire string is its Display output.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveCommand {
    Hit {
        target_player: u8,
        source_hand: u8,
        target_hand: u8,
    },
    Split {
        left: u8,
        // Can be negative when left exceeds the total; the server rejects it
        right: i16,
    },
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCommand::Hit {
                target_player,
                source_hand,
                target_hand,
            } => write!(
                f,
                "{},{},{},{}",
                HIT_TAG, target_player, source_hand, target_hand
            ),
            MoveCommand::Split { left, right } => write!(f, "{}{},{}", SPLIT_TAG, left, right),
        }
    }
}

impl MoveCommand {
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

pub fn encode_hit(target_player: u8, source_hand: u8, target_hand: u8) -> MoveCommand {
    MoveCommand::Hit {
        target_player,
        source_hand,
        target_hand,
    }
}

pub fn encode_split(human: &Player, left: u8) -> MoveCommand {
    let total = i16::from(human.total_fingers());
    MoveCommand::Split {
        left,
        right: total - i16::from(left),
    }
}

// What a move button carries. Read when the button is clicked and encoded
// against whatever state is current at that moment.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Hit {
        target: PlayerNum,
        source_hand: HandPos,
        target_hand: HandPos,
    },
    Split {
        left: u8,
    },
}

impl Gesture {
    pub fn encode(&self, state: &GameState) -> MoveCommand {
        match *self {
            Gesture::Hit {
                target,
                source_hand,
                target_hand,
            } => encode_hit(target.id(), source_hand.id(), target_hand.id()),
            Gesture::Split { left } => encode_split(state.player(PlayerNum::Human), left),
        }
    }
}
