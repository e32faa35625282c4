use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use thiserror::Error;

pub const MAX_FINGERS: u8 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    #[error("Hand {hand} of player {player} has {fingers} fingers. Maximum: 5")]
    TooManyFingers {
        player: PlayerNum,
        hand: HandPos,
        fingers: u8,
    },
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerNum {
    Human,
    Opponent,
}

impl PlayerNum {
    // 1-based id the server uses to address a player
    pub fn id(self) -> u8 {
        match self {
            PlayerNum::Human => 1,
            PlayerNum::Opponent => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerNum::Human => "You",
            PlayerNum::Opponent => "Bot",
        }
    }
}

impl fmt::Display for PlayerNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandPos {
    Left,
    Right,
}

impl HandPos {
    // 1-based position used in move commands
    pub fn id(self) -> u8 {
        match self {
            HandPos::Left => 1,
            HandPos::Right => 2,
        }
    }
}

impl fmt::Display for HandPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    pub alive_fingers: u8,
}

impl Hand {
    pub fn new(alive_fingers: u8) -> Self {
        Hand { alive_fingers }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    #[serde(rename = "_hands")]
    hands: [Hand; 2],
}

impl Player {
    pub fn new(left: u8, right: u8) -> Self {
        Player {
            hands: [Hand::new(left), Hand::new(right)],
        }
    }

    pub fn total_fingers(&self) -> u8 {
        self.hands.iter().map(|h| h.alive_fingers).sum()
    }
}

impl Index<HandPos> for Player {
    type Output = Hand;

    fn index(&self, pos: HandPos) -> &Self::Output {
        match pos {
            HandPos::Left => &self.hands[0],
            HandPos::Right => &self.hands[1],
        }
    }
}

// Snapshot of the server's game. Never patched locally, only replaced by a newer one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    #[serde(rename = "_players")]
    players: [Player; 2],
}

impl GameState {
    pub fn new(human: Player, opponent: Player) -> Result<Self, StateError> {
        let state = GameState {
            players: [human, opponent],
        };
        state.validate()?;
        Ok(state)
    }

    pub fn player(&self, player_num: PlayerNum) -> &Player {
        match player_num {
            PlayerNum::Human => &self.players[0],
            PlayerNum::Opponent => &self.players[1],
        }
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerNum, &Player)> {
        [PlayerNum::Human, PlayerNum::Opponent]
            .into_iter()
            .zip(self.players.iter())
    }

    // Decoding only checks the shape, so finger counts are checked here
    pub fn validate(&self) -> Result<(), StateError> {
        for (player_num, player) in self.players() {
            for pos in [HandPos::Left, HandPos::Right] {
                let fingers = player[pos].alive_fingers;
                if fingers > MAX_FINGERS {
                    return Err(StateError::TooManyFingers {
                        player: player_num,
                        hand: pos,
                        fingers,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            players: [Player::new(1, 1), Player::new(1, 1)],
        }
    }
}
