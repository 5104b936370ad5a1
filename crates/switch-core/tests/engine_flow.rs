use switch_core::game::engine::{GameEngine, RejectReason, TurnOutcome, TurnRequest};
use switch_core::game::state::{GameConfig, GameState};
use switch_core::model::card::Card;
use switch_core::model::deck::Deck;
use switch_core::model::player::Player;
use switch_core::model::rank::Rank;
use switch_core::model::suit::Suit;

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn player_with(name: &str, cards: &[Card], automated: bool) -> Player {
    let mut player = if automated {
        Player::automated(name)
    } else {
        Player::human(name)
    };
    for &c in cards {
        player.hand_mut().add(c);
    }
    player
}

fn engine(players: Vec<Player>, pile: Vec<Card>, top: Card) -> GameEngine {
    let game =
        GameState::from_parts(players, Deck::with_cards(pile), top, GameConfig::default())
            .unwrap();
    GameEngine::new(game)
}

#[test]
fn winning_play_on_rank_match_with_empty_pile() {
    // Deck empty, top 7H, hand exactly [7S]: the rank match wins the game.
    let dana = player_with("Dana", &[card(Rank::Seven, Suit::Spades)], false);
    let robin = player_with("Robin", &[card(Rank::Four, Suit::Clubs)], false);
    let mut engine = engine(vec![dana, robin], vec![], card(Rank::Seven, Suit::Hearts));

    let response = engine.handle(&TurnRequest::play("Dana", card(Rank::Seven, Suit::Spades)));

    assert_eq!(response.outcome, TurnOutcome::Applied);
    assert!(response.snapshot.has_winner);
    assert_eq!(response.snapshot.winner.as_deref(), Some("Dana"));
    assert_eq!(response.snapshot.hand_sizes.get("Dana"), Some(&0));

    let game = engine.game();
    assert_eq!(game.player(0).record().unwrap().wins, 1);
    assert_eq!(game.player(0).record().unwrap().losses, 0);
    assert_eq!(game.player(1).record().unwrap().losses, 1);
    assert_eq!(game.current_index(), 0, "the turn stops advancing on a win");
}

#[test]
fn skip_before_drawing_is_rejected() {
    let dana = player_with("Dana", &[card(Rank::Three, Suit::Clubs)], false);
    let robin = player_with("Robin", &[card(Rank::Four, Suit::Clubs)], false);
    let mut engine = engine(vec![dana, robin], vec![], card(Rank::Seven, Suit::Hearts));

    let before = engine.snapshot();
    let response = engine.handle(&TurnRequest::skip("Dana"));
    assert_eq!(
        response.outcome,
        TurnOutcome::Rejected(RejectReason::MustDrawFirst)
    );
    assert_eq!(response.snapshot, before);
}

#[test]
fn skip_while_holding_a_playable_card_is_rejected() {
    let dana = player_with("Dana", &[card(Rank::Two, Suit::Hearts)], false);
    let robin = player_with("Robin", &[card(Rank::Four, Suit::Clubs)], false);
    let mut engine = engine(
        vec![dana, robin],
        vec![card(Rank::Nine, Suit::Diamonds)],
        card(Rank::Seven, Suit::Hearts),
    );

    engine.handle(&TurnRequest::draw("Dana"));
    let response = engine.handle(&TurnRequest::skip("Dana"));
    assert_eq!(
        response.outcome,
        TurnOutcome::Rejected(RejectReason::HoldsPlayableCard)
    );
    assert_eq!(engine.game().current_index(), 0);
}

#[test]
fn skip_after_fruitless_draw_advances_the_turn() {
    let dana = player_with("Dana", &[card(Rank::Three, Suit::Clubs)], false);
    let robin = player_with("Robin", &[card(Rank::Four, Suit::Clubs)], false);
    // The drawn card cannot match either.
    let mut engine = engine(
        vec![dana, robin],
        vec![card(Rank::Nine, Suit::Diamonds)],
        card(Rank::Seven, Suit::Hearts),
    );

    assert!(engine.handle(&TurnRequest::draw("Dana")).outcome.is_applied());
    let response = engine.handle(&TurnRequest::skip("Dana"));
    assert_eq!(response.outcome, TurnOutcome::Applied);
    assert_eq!(response.snapshot.current_player, "Robin");
    assert!(!engine.game().has_drawn());
}

#[test]
fn draw_never_advances_and_second_draw_changes_nothing() {
    let dana = player_with("Dana", &[card(Rank::Three, Suit::Clubs)], false);
    let robin = player_with("Robin", &[card(Rank::Four, Suit::Clubs)], false);
    let mut engine = engine(
        vec![dana, robin],
        vec![card(Rank::Nine, Suit::Diamonds), card(Rank::Ten, Suit::Spades)],
        card(Rank::Seven, Suit::Hearts),
    );

    let first = engine.handle(&TurnRequest::draw("Dana"));
    assert_eq!(first.outcome, TurnOutcome::Applied);
    assert_eq!(first.snapshot.current_player, "Dana");
    assert_eq!(first.snapshot.hand_sizes.get("Dana"), Some(&2));

    let second = engine.handle(&TurnRequest::draw("Dana"));
    assert_eq!(
        second.outcome,
        TurnOutcome::Rejected(RejectReason::AlreadyDrawn)
    );
    assert_eq!(second.snapshot, first.snapshot);
}

#[test]
fn successful_play_resets_the_draw_flag_for_the_next_player() {
    let dana = player_with(
        "Dana",
        &[card(Rank::Two, Suit::Hearts), card(Rank::Nine, Suit::Clubs)],
        false,
    );
    let robin = player_with("Robin", &[card(Rank::Four, Suit::Clubs)], false);
    let mut engine = engine(
        vec![dana, robin],
        vec![card(Rank::Ten, Suit::Diamonds)],
        card(Rank::Seven, Suit::Hearts),
    );

    engine.handle(&TurnRequest::draw("Dana"));
    assert!(engine.game().has_drawn());
    let response = engine.handle(&TurnRequest::play("Dana", card(Rank::Two, Suit::Hearts)));
    assert_eq!(response.outcome, TurnOutcome::Applied);
    assert_eq!(response.snapshot.current_player, "Robin");
    assert!(!engine.game().has_drawn());
}

#[test]
fn automated_player_plays_its_first_fit_after_a_human_turn() {
    let dana = player_with(
        "Dana",
        &[card(Rank::Two, Suit::Hearts), card(Rank::Nine, Suit::Clubs)],
        false,
    );
    // 2C matches the 2H Dana is about to play.
    let bot = player_with(
        "Bot 1",
        &[card(Rank::Two, Suit::Clubs), card(Rank::King, Suit::Diamonds)],
        true,
    );
    let mut engine = engine(vec![dana, bot], vec![], card(Rank::Seven, Suit::Hearts));

    let response = engine.handle(&TurnRequest::play("Dana", card(Rank::Two, Suit::Hearts)));
    assert_eq!(response.outcome, TurnOutcome::Applied);
    // The cascade resolved the bot's whole turn before returning.
    assert_eq!(response.snapshot.current_player, "Dana");
    assert_eq!(response.snapshot.top_card, card(Rank::Two, Suit::Clubs));
    assert_eq!(response.snapshot.hand_sizes.get("Bot 1"), Some(&1));
}

#[test]
fn automated_player_with_no_match_and_empty_pile_skips_exactly_once() {
    let dana = player_with(
        "Dana",
        &[card(Rank::Two, Suit::Hearts), card(Rank::Nine, Suit::Clubs)],
        false,
    );
    let bot = player_with("Bot 1", &[card(Rank::Nine, Suit::Diamonds)], true);
    let mut engine = engine(vec![dana, bot], vec![], card(Rank::Seven, Suit::Hearts));

    let response = engine.handle(&TurnRequest::play("Dana", card(Rank::Two, Suit::Hearts)));
    assert_eq!(response.outcome, TurnOutcome::Applied);
    // One failed draw, then the bot's turn was forfeited back to Dana.
    assert_eq!(response.snapshot.current_player, "Dana");
    assert_eq!(response.snapshot.hand_sizes.get("Bot 1"), Some(&1));
    assert!(!engine.game().has_drawn());
}

#[test]
fn automated_player_draws_and_plays_the_drawn_card() {
    let dana = player_with(
        "Dana",
        &[card(Rank::Two, Suit::Hearts), card(Rank::Nine, Suit::Clubs)],
        false,
    );
    let bot = player_with("Bot 1", &[card(Rank::Nine, Suit::Diamonds)], true);
    // The pile's top card matches the 2H Dana plays.
    let mut engine = engine(
        vec![dana, bot],
        vec![card(Rank::Two, Suit::Spades)],
        card(Rank::Seven, Suit::Hearts),
    );

    let response = engine.handle(&TurnRequest::play("Dana", card(Rank::Two, Suit::Hearts)));
    assert_eq!(response.outcome, TurnOutcome::Applied);
    assert_eq!(response.snapshot.top_card, card(Rank::Two, Suit::Spades));
    assert_eq!(response.snapshot.hand_sizes.get("Bot 1"), Some(&1));
    assert_eq!(response.snapshot.current_player, "Dana");
}

#[test]
fn automated_win_resolves_inside_the_cascade() {
    let dana = player_with(
        "Dana",
        &[card(Rank::Two, Suit::Hearts), card(Rank::Nine, Suit::Clubs)],
        false,
    );
    let bot = player_with("Bot 1", &[card(Rank::Two, Suit::Clubs)], true);
    let mut engine = engine(vec![dana, bot], vec![], card(Rank::Seven, Suit::Hearts));

    let response = engine.handle(&TurnRequest::play("Dana", card(Rank::Two, Suit::Hearts)));
    assert!(response.snapshot.has_winner);
    assert_eq!(response.snapshot.winner.as_deref(), Some("Bot 1"));
    // The human loss is recorded; the bot keeps no counters.
    assert_eq!(engine.game().player(0).record().unwrap().losses, 1);
    assert!(engine.game().player(1).record().is_none());
}

#[test]
fn all_automated_table_terminates_within_one_pass_per_seat() {
    // Nobody can ever play: no matches and an empty pile. The cascade must
    // still return after one sub-turn per seat.
    let bots: Vec<Player> = (0..3)
        .map(|i| player_with(&format!("Bot {i}"), &[card(Rank::Three, Suit::Clubs)], true))
        .collect();
    let mut engine = engine(bots, vec![], card(Rank::Seven, Suit::Hearts));

    let response = engine.handle(&TurnRequest::start());
    assert_eq!(response.outcome, TurnOutcome::Applied);
    assert!(!response.snapshot.has_winner);
    for i in 0..3 {
        assert_eq!(response.snapshot.hand_sizes.get(&format!("Bot {i}")), Some(&1));
    }
    // Three forfeits bring the turn pointer back to the first seat.
    assert_eq!(engine.game().current_index(), 0);
}

#[test]
fn winner_never_changes_once_set() {
    let dana = player_with("Dana", &[card(Rank::Seven, Suit::Spades)], false);
    let robin = player_with(
        "Robin",
        &[card(Rank::Seven, Suit::Clubs)],
        false,
    );
    let mut engine = engine(vec![dana, robin], vec![], card(Rank::Seven, Suit::Hearts));

    engine.handle(&TurnRequest::play("Dana", card(Rank::Seven, Suit::Spades)));
    assert_eq!(engine.game().winner_index(), Some(0));

    // Robin could match the top card, but the game is over.
    let response = engine.handle(&TurnRequest::play("Robin", card(Rank::Seven, Suit::Clubs)));
    assert_eq!(
        response.outcome,
        TurnOutcome::Rejected(RejectReason::GameOver)
    );
    assert_eq!(engine.game().winner_index(), Some(0));
    assert_eq!(engine.game().player(0).record().unwrap().wins, 1);
}

#[test]
fn start_resolves_a_leading_automated_seat() {
    let bot = player_with("Bot 1", &[card(Rank::Two, Suit::Hearts)], true);
    let dana = player_with("Dana", &[card(Rank::Nine, Suit::Clubs)], false);
    let mut engine = engine(vec![bot, dana], vec![], card(Rank::Seven, Suit::Hearts));

    let response = engine.handle(&TurnRequest::start());
    assert!(response.snapshot.has_winner, "the bot's only card matched");
    assert_eq!(response.snapshot.winner.as_deref(), Some("Bot 1"));
}

#[test]
fn seeded_bot_game_reaches_a_winner_under_recycle() {
    let players = vec![Player::automated("Bot 0"), Player::automated("Bot 1")];
    let config = GameConfig {
        starting_hand_size: 1,
        recycle_discards: true,
    };
    let game = GameState::with_seed(players, config, 2024).unwrap();
    let mut engine = GameEngine::new(game);

    let mut last = engine.handle(&TurnRequest::start());
    let mut rounds = 0;
    while !last.snapshot.has_winner && rounds < 1000 {
        last = engine.handle(&TurnRequest::start());
        rounds += 1;
    }
    assert!(last.snapshot.has_winner, "two bots never finished the game");
    let winner = last.snapshot.winner.clone();

    // Further prodding cannot disturb the result.
    let after = engine.handle(&TurnRequest::start());
    assert_eq!(after.snapshot.winner, winner);
}
