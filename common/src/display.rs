use crate::game_state::{GameState, HandPos, PlayerNum};
use crate::messages::LastMove;
use crate::moves::{Gesture, MoveCommand};

pub const FIRST_MOVE_PROMPT: &str = "Your turn. Make the first move!";
pub const MAX_SPLIT_LEFT: u8 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub player: PlayerNum,
    pub label: &'static str,
    // Finger count per hand, left then right. Dead hands show 0.
    pub hands: [u8; 2],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affordance {
    pub label: String,
    pub gesture: Gesture,
    pub command: MoveCommand,
}

// Which move buttons the page offers. Pure data, independent of any state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffordanceLayout {
    gestures: Vec<Gesture>,
}

impl AffordanceLayout {
    pub fn new(gestures: Vec<Gesture>) -> Self {
        AffordanceLayout { gestures }
    }

    // Every human hand against every opponent hand, then each split option
    pub fn standard() -> Self {
        let hands = [HandPos::Left, HandPos::Right];
        let hits = hands.iter().flat_map(|&source_hand| {
            hands.iter().map(move |&target_hand| Gesture::Hit {
                target: PlayerNum::Opponent,
                source_hand,
                target_hand,
            })
        });
        let splits = (0..=MAX_SPLIT_LEFT).map(|left| Gesture::Split { left });
        AffordanceLayout {
            gestures: hits.chain(splits).collect(),
        }
    }

    pub fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }
}

impl Default for AffordanceLayout {
    fn default() -> Self {
        AffordanceLayout::standard()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayModel {
    pub players: [PlayerView; 2],
    pub status: String,
    pub affordances: Vec<Affordance>,
    pub moves_enabled: bool,
}

impl DisplayModel {
    pub fn with_moves_enabled(mut self, moves_enabled: bool) -> Self {
        self.moves_enabled = moves_enabled;
        self
    }

    pub fn player(&self, player_num: PlayerNum) -> &PlayerView {
        match player_num {
            PlayerNum::Human => &self.players[0],
            PlayerNum::Opponent => &self.players[1],
        }
    }
}

pub fn project(state: &GameState, last_move: Option<&LastMove>) -> DisplayModel {
    project_with(&AffordanceLayout::standard(), state, last_move)
}

pub fn project_with(
    layout: &AffordanceLayout,
    state: &GameState,
    last_move: Option<&LastMove>,
) -> DisplayModel {
    DisplayModel {
        players: [
            player_view(state, PlayerNum::Human),
            player_view(state, PlayerNum::Opponent),
        ],
        status: status_line(last_move),
        affordances: layout
            .gestures()
            .iter()
            .map(|gesture| {
                let command = gesture.encode(state);
                Affordance {
                    label: affordance_label(gesture, &command),
                    gesture: *gesture,
                    command,
                }
            })
            .collect(),
        moves_enabled: true,
    }
}

pub fn status_line(last_move: Option<&LastMove>) -> String {
    match last_move {
        None => FIRST_MOVE_PROMPT.to_string(),
        Some(last_move) => format!("Last move: {}", last_move),
    }
}

fn player_view(state: &GameState, player_num: PlayerNum) -> PlayerView {
    let player = state.player(player_num);
    PlayerView {
        player: player_num,
        label: player_num.label(),
        hands: [
            player[HandPos::Left].alive_fingers,
            player[HandPos::Right].alive_fingers,
        ],
    }
}

fn affordance_label(gesture: &Gesture, command: &MoveCommand) -> String {
    match (gesture, command) {
        (
            Gesture::Hit {
                source_hand,
                target_hand,
                ..
            },
            _,
        ) => format!("Hit {} with {}", hand_name(*target_hand), hand_name(*source_hand)),
        (_, MoveCommand::Split { left, right }) => format!("Split {} / {}", left, right),
        (Gesture::Split { left }, _) => format!("Split {}", left),
    }
}

fn hand_name(pos: HandPos) -> &'static str {
    match pos {
        HandPos::Left => "left",
        HandPos::Right => "right",
    }
}
