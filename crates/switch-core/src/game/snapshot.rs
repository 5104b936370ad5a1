use crate::game::state::GameState;
use crate::model::card::Card;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only projection of a game for display layers. Valid at the instant
/// of capture; the engine never retains one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub current_player: String,
    pub current_hand: Vec<Card>,
    pub top_card: Card,
    pub hand_sizes: BTreeMap<String, usize>,
    pub has_winner: bool,
    pub winner: Option<String>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let current = state.current_player();
        let hand_sizes = state
            .players()
            .iter()
            .map(|p| (p.name().to_string(), p.hand().len()))
            .collect();

        GameSnapshot {
            current_player: current.name().to_string(),
            current_hand: current.hand().cards().to_vec(),
            top_card: state.top_card(),
            hand_sizes,
            has_winner: state.has_winner(),
            winner: state.winner().map(|p| p.name().to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
