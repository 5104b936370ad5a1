use crate::game::observer::{ObserverHandle, ObserverRegistry};
use crate::game::policy::{FirstFit, SelectionPolicy};
use crate::game::snapshot::GameSnapshot;
use crate::game::state::GameState;
use crate::model::card::Card;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Play,
    Draw,
    Skip,
    Start,
}

/// A single user intent against the game.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    pub player: Option<String>,
    pub card: Option<Card>,
    pub action: TurnAction,
}

impl TurnRequest {
    pub fn start() -> Self {
        Self {
            player: None,
            card: None,
            action: TurnAction::Start,
        }
    }

    pub fn play(player: impl Into<String>, card: Card) -> Self {
        Self {
            player: Some(player.into()),
            card: Some(card),
            action: TurnAction::Play,
        }
    }

    pub fn draw(player: impl Into<String>) -> Self {
        Self {
            player: Some(player.into()),
            card: None,
            action: TurnAction::Draw,
        }
    }

    pub fn skip(player: impl Into<String>) -> Self {
        Self {
            player: Some(player.into()),
            card: None,
            action: TurnAction::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownPlayer,
    OutOfTurn,
    MissingCard,
    CardNotInHand,
    CardDoesNotMatch,
    AlreadyDrawn,
    MustDrawFirst,
    HoldsPlayableCard,
    GameOver,
}

/// Every request resolves to one of these. A rejection guarantees no state
/// changed and no observer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Applied,
    Rejected(RejectReason),
}

impl TurnOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, TurnOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnResponse {
    pub outcome: TurnOutcome,
    pub snapshot: GameSnapshot,
}

/// Orchestrates turns: validates one intent, applies it, notifies observers,
/// then resolves automated seats until a human's turn begins or the game
/// ends. One request is fully resolved before `handle` returns.
pub struct GameEngine {
    game: GameState,
    observers: ObserverRegistry,
    policy: Box<dyn SelectionPolicy>,
}

impl GameEngine {
    pub fn new(game: GameState) -> Self {
        Self::with_policy(game, Box::new(FirstFit))
    }

    pub fn with_policy(game: GameState, policy: Box<dyn SelectionPolicy>) -> Self {
        Self {
            game,
            observers: ObserverRegistry::new(),
            policy,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn register_observer(&mut self, callback: impl FnMut() + 'static) -> ObserverHandle {
        self.observers.register(callback)
    }

    pub fn deregister_observer(&mut self, handle: ObserverHandle) -> bool {
        self.observers.deregister(handle)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.game)
    }

    pub fn handle(&mut self, request: &TurnRequest) -> TurnResponse {
        let outcome = self.apply(request);
        event!(Level::DEBUG, action = ?request.action, outcome = ?outcome, "handled request");
        if outcome.is_applied() {
            self.run_automated_turns();
        }
        TurnResponse {
            outcome,
            snapshot: self.snapshot(),
        }
    }

    fn apply(&mut self, request: &TurnRequest) -> TurnOutcome {
        match request.action {
            TurnAction::Start => {
                // Populates the very first view; turn state is untouched.
                self.observers.notify_all();
                TurnOutcome::Applied
            }
            TurnAction::Play => {
                self.in_turn(request, |engine, index| engine.apply_play(index, request.card))
            }
            TurnAction::Draw => self.in_turn(request, Self::apply_draw),
            TurnAction::Skip => self.in_turn(request, Self::apply_skip),
        }
    }

    /// Gates a player action: the game must still be live and the acting
    /// player must resolve to the current turn.
    fn in_turn(
        &mut self,
        request: &TurnRequest,
        act: impl FnOnce(&mut Self, usize) -> TurnOutcome,
    ) -> TurnOutcome {
        if self.game.has_winner() {
            return TurnOutcome::Rejected(RejectReason::GameOver);
        }
        match self.resolve_actor(request) {
            Ok(index) => act(self, index),
            Err(reason) => TurnOutcome::Rejected(reason),
        }
    }

    /// The acting player must both exist and be the current player; a stale
    /// client cannot act out of turn.
    fn resolve_actor(&self, request: &TurnRequest) -> Result<usize, RejectReason> {
        let name = request
            .player
            .as_deref()
            .ok_or(RejectReason::UnknownPlayer)?;
        let index = self
            .game
            .player_index_by_name(name)
            .ok_or(RejectReason::UnknownPlayer)?;
        if index != self.game.current_index() {
            return Err(RejectReason::OutOfTurn);
        }
        Ok(index)
    }

    fn apply_play(&mut self, index: usize, card: Option<Card>) -> TurnOutcome {
        let Some(card) = card else {
            return TurnOutcome::Rejected(RejectReason::MissingCard);
        };
        if !self.game.player(index).hand().contains(card) {
            return TurnOutcome::Rejected(RejectReason::CardNotInHand);
        }
        if !self.game.is_valid_card(card) {
            return TurnOutcome::Rejected(RejectReason::CardDoesNotMatch);
        }
        self.play_for(index, card);
        TurnOutcome::Applied
    }

    fn apply_draw(&mut self, index: usize) -> TurnOutcome {
        if self.game.has_drawn() {
            return TurnOutcome::Rejected(RejectReason::AlreadyDrawn);
        }
        let drawn = self.game.draw_into(index);
        event!(
            Level::DEBUG,
            player = self.game.player(index).name(),
            drew = drawn.is_some(),
            "draw"
        );
        // The turn does not advance: after drawing the player may still
        // play or skip.
        self.observers.notify_all();
        TurnOutcome::Applied
    }

    fn apply_skip(&mut self, index: usize) -> TurnOutcome {
        if !self.game.has_drawn() {
            return TurnOutcome::Rejected(RejectReason::MustDrawFirst);
        }
        if self.game.any_valid_card(index) {
            return TurnOutcome::Rejected(RejectReason::HoldsPlayableCard);
        }
        self.game.advance_turn();
        self.observers.notify_all();
        TurnOutcome::Applied
    }

    /// Applies a pre-validated play, resolving the win when the hand
    /// empties and advancing the turn otherwise.
    fn play_for(&mut self, index: usize, card: Card) {
        self.game.play_from_hand(index, card);
        if self.game.player(index).hand().is_empty() {
            self.resolve_win(index);
        } else {
            self.game.advance_turn();
            self.observers.notify_all();
        }
    }

    fn resolve_win(&mut self, index: usize) {
        self.game.set_winner(index);
        self.game.player_mut(index).record_win();
        for other in 0..self.game.players().len() {
            if other != index {
                self.game.player_mut(other).record_loss();
            }
        }
        event!(
            Level::INFO,
            winner = self.game.player(index).name(),
            "game over"
        );
        self.observers.notify_all();
    }

    /// Resolves automated seats until a human's turn begins or the game
    /// ends. The loop is bounded by the player count: one sub-turn per
    /// automated seat per handled request, so it terminates even if every
    /// remaining seat is automated.
    fn run_automated_turns(&mut self) {
        for _ in 0..self.game.players().len() {
            if self.game.has_winner() || !self.game.current_player().is_automated() {
                return;
            }
            self.automated_turn();
        }
    }

    /// One full automated sub-turn: play the first fit, or draw once and
    /// retry, or skip.
    fn automated_turn(&mut self) {
        let index = self.game.current_index();
        let top = self.game.top_card();
        if let Some(card) = self.policy.choose(self.game.player(index).hand(), top) {
            self.play_for(index, card);
            return;
        }
        self.game.draw_into(index);
        if let Some(card) = self.policy.choose(self.game.player(index).hand(), top) {
            self.play_for(index, card);
        } else {
            // Drew and still cannot go; the seat forfeits the turn.
            self.game.advance_turn();
            self.observers.notify_all();
        }
    }
}
