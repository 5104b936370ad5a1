use crate::model::hand::Hand;
use serde::{Deserialize, Serialize};

/// Cumulative win/loss counters. The engine only ever increments these;
/// resetting or persisting them is a collaborator's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerKind {
    Human(WinRecord),
    Automated,
}

/// A seat at the table. Shared behavior (holding a hand, playing, drawing)
/// is kind-agnostic; the selection policy for automated players and the
/// win/loss record for humans live with their variant.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    hand: Hand,
    kind: PlayerKind,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            kind: PlayerKind::Human(WinRecord::default()),
        }
    }

    pub fn automated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            kind: PlayerKind::Automated,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    pub fn is_automated(&self) -> bool {
        matches!(self.kind, PlayerKind::Automated)
    }

    pub fn record(&self) -> Option<&WinRecord> {
        match &self.kind {
            PlayerKind::Human(record) => Some(record),
            PlayerKind::Automated => None,
        }
    }

    /// No-op for automated players; only humans keep counters.
    pub fn record_win(&mut self) {
        if let PlayerKind::Human(record) = &mut self.kind {
            record.wins += 1;
        }
    }

    pub fn record_loss(&mut self) {
        if let PlayerKind::Human(record) = &mut self.kind {
            record.losses += 1;
        }
    }
}
