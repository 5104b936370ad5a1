use crate::model::card::Card;
use crate::model::hand::Hand;
use tracing::{Level, event};

/// Card selection for automated players. The engine consults the policy
/// whenever an automated seat must act.
pub trait SelectionPolicy {
    /// Picks a card from `hand` that may be played on `top`, or `None` when
    /// the hand holds no playable card.
    fn choose(&mut self, hand: &Hand, top: Card) -> Option<Card>;
}

/// The shipped policy: scan the hand in its fixed order and take the first
/// card that matches the top card. Deterministic, not strategic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl SelectionPolicy for FirstFit {
    fn choose(&mut self, hand: &Hand, top: Card) -> Option<Card> {
        let pick = hand.iter().copied().find(|card| card.matches(top));
        match pick {
            Some(card) => {
                event!(Level::DEBUG, top = %top, card = %card, "first-fit selected a card");
            }
            None => {
                event!(Level::DEBUG, top = %top, hand_size = hand.len(), "no playable card");
            }
        }
        pick
    }
}
