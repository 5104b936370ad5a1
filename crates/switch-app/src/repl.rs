use std::io::{self, BufRead, Write};
use switch_core::game::engine::{GameEngine, RejectReason, TurnOutcome, TurnRequest};
use switch_core::game::snapshot::GameSnapshot;
use switch_core::model::card::Card;
use switch_core::model::rank::Rank;
use switch_core::model::suit::Suit;

/// Drives one game on stdin/stdout. Returns when the game ends or the
/// player quits.
pub fn run(engine: &mut GameEngine, name: &str) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    let response = engine.handle(&TurnRequest::start());
    render(&mut out, &response.snapshot, name)?;
    if response.snapshot.has_winner {
        return announce(&mut out, &response.snapshot);
    }
    writeln!(out, "commands: play <card>  draw  skip  quit   (cards like 7H, 10D, QS)")?;

    for line in stdin.lock().lines() {
        let line = line?;
        let request = match parse_command(line.trim(), name) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(()),
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        let response = engine.handle(&request);
        match response.outcome {
            TurnOutcome::Applied => render(&mut out, &response.snapshot, name)?,
            TurnOutcome::Rejected(reason) => writeln!(out, "rejected: {}", describe(reason))?,
        }
        if response.snapshot.has_winner {
            return announce(&mut out, &response.snapshot);
        }
    }
    Ok(())
}

fn render(out: &mut impl Write, snapshot: &GameSnapshot, name: &str) -> io::Result<()> {
    writeln!(out, "top card: {}", snapshot.top_card)?;
    for (player, count) in &snapshot.hand_sizes {
        writeln!(out, "  {player}: {count} cards")?;
    }
    if snapshot.current_player == name {
        let hand: Vec<String> = snapshot.current_hand.iter().map(Card::to_string).collect();
        writeln!(out, "your hand: {}", hand.join(" "))?;
    } else {
        writeln!(out, "waiting on {}", snapshot.current_player)?;
    }
    Ok(())
}

fn announce(out: &mut impl Write, snapshot: &GameSnapshot) -> io::Result<()> {
    match &snapshot.winner {
        Some(winner) => writeln!(out, "{winner} wins!"),
        None => writeln!(out, "game over"),
    }
}

fn parse_command(line: &str, name: &str) -> Result<Option<TurnRequest>, String> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("play") => {
            let spelling = words
                .next()
                .ok_or_else(|| "usage: play <card>, e.g. play 10H".to_string())?;
            let card = parse_card(spelling)
                .ok_or_else(|| format!("not a card: {spelling}"))?;
            Ok(Some(TurnRequest::play(name, card)))
        }
        Some("draw") => Ok(Some(TurnRequest::draw(name))),
        Some("skip") => Ok(Some(TurnRequest::skip(name))),
        Some("quit") | Some("exit") => Ok(None),
        Some(other) => Err(format!("unknown command: {other}")),
        None => Err("commands: play <card>  draw  skip  quit".to_string()),
    }
}

/// Parses the engine's own card spelling: rank symbol then suit letter,
/// e.g. "7H", "10D", "QS". Case-insensitive.
fn parse_card(spelling: &str) -> Option<Card> {
    let upper = spelling.to_ascii_uppercase();
    // Split on the last character, not the last byte; the input may hold
    // multi-byte characters like suit symbols.
    let (suit_at, suit_char) = upper.char_indices().last()?;
    let rank_text = &upper[..suit_at];
    let suit = match suit_char {
        'C' => Suit::Clubs,
        'D' => Suit::Diamonds,
        'S' => Suit::Spades,
        'H' => Suit::Hearts,
        _ => return None,
    };
    let rank = match rank_text {
        "A" => Rank::Ace,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        digits => {
            let value: u8 = digits.parse().ok()?;
            // A/J/Q/K have letter spellings only; digits cover 2 through 10.
            if !(2..=10).contains(&value) {
                return None;
            }
            Rank::from_value(value)?
        }
    };
    Some(Card::new(rank, suit))
}

fn describe(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::UnknownPlayer => "no such player in this game",
        RejectReason::OutOfTurn => "it is not your turn",
        RejectReason::MissingCard => "say which card to play",
        RejectReason::CardNotInHand => "that card is not in your hand",
        RejectReason::CardDoesNotMatch => "that card matches neither suit nor rank",
        RejectReason::AlreadyDrawn => "you have already drawn this turn",
        RejectReason::MustDrawFirst => "draw before skipping",
        RejectReason::HoldsPlayableCard => "you hold a playable card",
        RejectReason::GameOver => "the game is over",
    }
}
