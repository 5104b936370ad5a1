use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::Player;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Cards dealt to each player before the first top card is flipped.
    pub starting_hand_size: usize,
    /// When the draw pile runs out, reshuffle everything under the top card
    /// back into it. Off by default: the observed game is finite and an
    /// exhausted pile simply stays empty.
    pub recycle_discards: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_hand_size: 5,
            recycle_discards: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    TooFewPlayers { found: usize },
    DuplicateName(String),
    NotEnoughCards { required: usize, available: usize },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::TooFewPlayers { found } => {
                write!(f, "a game needs at least 2 players, got {found}")
            }
            SetupError::DuplicateName(name) => {
                write!(f, "player name is not unique: {name}")
            }
            SetupError::NotEnoughCards {
                required,
                available,
            } => {
                write!(
                    f,
                    "deck too small for this table: need {required} cards, have {available}"
                )
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// The game in progress: seats in turn order, the draw pile, the discard
/// pile (top card last), and the per-turn draw flag.
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<Player>,
    current: usize,
    draw_pile: Deck,
    discards: Vec<Card>,
    has_drawn: bool,
    winner: Option<usize>,
    config: GameConfig,
    rng: StdRng,
    seed: u64,
}

impl GameState {
    /// Deals a fresh game from a shuffled standard deck.
    pub fn new(players: Vec<Player>, config: GameConfig) -> Result<Self, SetupError> {
        let seed: u64 = rand::random();
        Self::with_seed(players, config, seed)
    }

    pub fn with_seed(
        players: Vec<Player>,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::validate_players(&players)?;

        let required = players
            .len()
            .saturating_mul(config.starting_hand_size)
            .saturating_add(1);
        if required > 52 {
            return Err(SetupError::NotEnoughCards {
                required,
                available: 52,
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut draw_pile = Deck::shuffled(&mut rng);

        let mut players = players;
        for _ in 0..config.starting_hand_size {
            for player in players.iter_mut() {
                if let Some(card) = draw_pile.draw() {
                    player.hand_mut().add(card);
                }
            }
        }
        let top = draw_pile
            .draw()
            .expect("deck size was validated against the table");

        Ok(Self {
            players,
            current: 0,
            draw_pile,
            discards: vec![top],
            has_drawn: false,
            winner: None,
            config,
            rng,
            seed,
        })
    }

    /// Builds a game from explicit parts; scenario tests and embedders use
    /// this to reach states a fresh deal cannot.
    pub fn from_parts(
        players: Vec<Player>,
        draw_pile: Deck,
        top_card: Card,
        config: GameConfig,
    ) -> Result<Self, SetupError> {
        Self::validate_players(&players)?;
        Ok(Self {
            players,
            current: 0,
            draw_pile,
            discards: vec![top_card],
            has_drawn: false,
            winner: None,
            config,
            rng: StdRng::seed_from_u64(0),
            seed: 0,
        })
    }

    fn validate_players(players: &[Player]) -> Result<(), SetupError> {
        if players.len() < 2 {
            return Err(SetupError::TooFewPlayers {
                found: players.len(),
            });
        }
        let mut seen = HashSet::new();
        for player in players {
            if !seen.insert(player.name()) {
                return Err(SetupError::DuplicateName(player.name().to_string()));
            }
        }
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    pub fn player_mut(&mut self, index: usize) -> &mut Player {
        &mut self.players[index]
    }

    /// First match wins; setup enforces uniqueness so later duplicates
    /// cannot occur through the public constructors.
    pub fn player_index_by_name(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name() == name)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn top_card(&self) -> Card {
        *self
            .discards
            .last()
            .expect("discard pile always holds the top card")
    }

    pub fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_valid_card(&self, card: Card) -> bool {
        card.matches(self.top_card())
    }

    /// Moves the turn pointer to the next seat, circularly, and restores the
    /// right to draw. Never checks for a winner; callers decide that.
    pub fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
        self.has_drawn = false;
    }

    /// Records the first winner; later calls are ignored so the winner can
    /// never change once set.
    pub fn set_winner(&mut self, index: usize) {
        if self.winner.is_none() {
            self.winner = Some(index);
        }
    }

    /// Removes `card` from the seat's hand and makes it the top card.
    /// Validation is the caller's job; returns false if the card was absent.
    pub fn play_from_hand(&mut self, index: usize, card: Card) -> bool {
        if !self.players[index].hand_mut().remove(card) {
            return false;
        }
        self.discards.push(card);
        true
    }

    /// Draws one card into the seat's hand. The attempt consumes the turn's
    /// draw right even when the pile is empty.
    pub fn draw_into(&mut self, index: usize) -> Option<Card> {
        let card = self.next_from_pile();
        if let Some(card) = card {
            self.players[index].hand_mut().add(card);
        }
        self.has_drawn = true;
        card
    }

    fn next_from_pile(&mut self) -> Option<Card> {
        if let Some(card) = self.draw_pile.draw() {
            return Some(card);
        }
        if !self.config.recycle_discards || self.discards.len() < 2 {
            return None;
        }
        // Keep the top card exposed and shuffle the buried discards back in.
        let top = self.discards.pop()?;
        for card in self.discards.drain(..) {
            self.draw_pile.insert(card);
        }
        self.discards.push(top);
        self.draw_pile.shuffle_in_place(&mut self.rng);
        self.draw_pile.draw()
    }

    pub fn any_valid_card(&self, index: usize) -> bool {
        let top = self.top_card();
        self.players[index].hand().iter().any(|c| c.matches(top))
    }

    pub fn first_valid_card(&self, index: usize) -> Option<Card> {
        let top = self.top_card();
        self.players[index]
            .hand()
            .iter()
            .copied()
            .find(|c| c.matches(top))
    }
}
