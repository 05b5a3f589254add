use std::collections::{HashMap, HashSet};

use log::warn;

use crate::engine::state::GameSession;
use crate::game::{Card, Difficulty, FreecellGame, GameStatus, Suit, DECK_SIZE};

/// Serializes the full session for the persistence collaborator: counters
/// and status as `key=value` lines, the board and every history snapshot as
/// compact pile strings.
pub fn encode_persisted_session(session: &GameSession) -> String {
    let history = if session.history().is_empty() {
        "-".to_string()
    } else {
        session
            .history()
            .iter()
            .map(encode_board)
            .collect::<Vec<_>>()
            .join("|")
    };

    format!(
        "v=1\ndifficulty={}\nmoves={}\nelapsed={}\nhints={}\nstatus={}\nboard={}\nhistory={}",
        session.difficulty().id(),
        session.moves(),
        session.elapsed_seconds(),
        session.hints_remaining(),
        session.status().id(),
        encode_board(session.game()),
        history,
    )
}

/// Rebuilds a session from a persisted snapshot. Any structural problem,
/// including a bad card census, yields `None`. A snapshot saved in the won
/// state resumes on the difficulty chooser instead of the win screen.
pub fn decode_persisted_session(raw: &str) -> Option<GameSession> {
    let mut fields = HashMap::<&str, &str>::new();
    for line in raw.lines() {
        let (key, value) = line.split_once('=')?;
        fields.insert(key.trim(), value.trim());
    }

    if *fields.get("v")? != "1" {
        return None;
    }
    let difficulty = Difficulty::from_id(fields.get("difficulty")?)?;
    let moves = fields.get("moves")?.parse::<u32>().ok()?;
    let elapsed = fields.get("elapsed")?.parse::<u32>().ok()?;
    let hints = fields.get("hints")?.parse::<u8>().ok()?;
    let status = GameStatus::from_id(fields.get("status")?)?;

    let board = decode_board(difficulty, fields.get("board")?)?;
    if !has_full_census(&board) {
        return None;
    }

    let history_raw = *fields.get("history")?;
    let history: Vec<FreecellGame> = if history_raw == "-" || history_raw.is_empty() {
        Vec::new()
    } else {
        let snapshots = history_raw
            .split('|')
            .map(|part| decode_board(difficulty, part))
            .collect::<Option<Vec<_>>>()?;
        if !snapshots.iter().all(has_full_census) {
            return None;
        }
        snapshots
    };

    // Never resume straight into a terminal win screen.
    let status = if status == GameStatus::Won {
        GameStatus::Selecting
    } else {
        status
    };

    Some(GameSession::from_restored(
        board, history, moves, elapsed, hints, status,
    ))
}

/// Restore helper for session start: a missing or malformed snapshot falls
/// back to a fresh default session rather than surfacing an error.
pub fn restore_or_default(raw: Option<&str>) -> GameSession {
    match raw {
        Some(raw) => decode_persisted_session(raw).unwrap_or_else(|| {
            warn!("discarding malformed session snapshot");
            GameSession::default()
        }),
        None => GameSession::default(),
    }
}

fn encode_board(game: &FreecellGame) -> String {
    let mut parts = Vec::with_capacity(16);
    for (idx, slot) in game.freecells().iter().enumerate() {
        parts.push(format!("x{idx}={}", encode_slot(*slot)));
    }
    for (idx, pile) in game.foundations().iter().enumerate() {
        parts.push(format!("f{idx}={}", encode_pile(pile)));
    }
    for (idx, pile) in game.cascades().iter().enumerate() {
        parts.push(format!("c{idx}={}", encode_pile(pile)));
    }
    parts.join(";")
}

fn decode_board(difficulty: Difficulty, data: &str) -> Option<FreecellGame> {
    let mut fields = HashMap::<&str, &str>::new();
    for part in data.split(';') {
        let (key, value) = part.split_once('=')?;
        fields.insert(key, value);
    }

    let freecells = [
        decode_slot(fields.get("x0")?)?,
        decode_slot(fields.get("x1")?)?,
        decode_slot(fields.get("x2")?)?,
        decode_slot(fields.get("x3")?)?,
    ];
    let foundations = [
        decode_pile(fields.get("f0")?)?,
        decode_pile(fields.get("f1")?)?,
        decode_pile(fields.get("f2")?)?,
        decode_pile(fields.get("f3")?)?,
    ];
    let cascades = [
        decode_pile(fields.get("c0")?)?,
        decode_pile(fields.get("c1")?)?,
        decode_pile(fields.get("c2")?)?,
        decode_pile(fields.get("c3")?)?,
        decode_pile(fields.get("c4")?)?,
        decode_pile(fields.get("c5")?)?,
        decode_pile(fields.get("c6")?)?,
        decode_pile(fields.get("c7")?)?,
    ];

    Some(FreecellGame::from_parts_unchecked(
        difficulty,
        foundations,
        freecells,
        cascades,
    ))
}

/// Every (suit, rank) pair present exactly once across all zones.
fn has_full_census(game: &FreecellGame) -> bool {
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    let mut total = 0usize;

    let mut track = |card: Card| {
        total += 1;
        seen.insert((card.suit, card.rank));
    };

    for slot in game.freecells().iter().flatten() {
        track(*slot);
    }
    for card in game.foundations().iter().flatten() {
        track(*card);
    }
    for card in game.cascades().iter().flatten() {
        track(*card);
    }

    total == DECK_SIZE && seen.len() == DECK_SIZE
}

fn encode_slot(card: Option<Card>) -> String {
    match card {
        Some(card) => encode_card(card),
        None => "-".to_string(),
    }
}

fn decode_slot(encoded: &str) -> Option<Option<Card>> {
    if encoded == "-" {
        return Some(None);
    }
    decode_card(encoded).map(Some)
}

fn encode_pile(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(|card| encode_card(*card))
        .collect::<Vec<_>>()
        .join(".")
}

fn decode_pile(encoded: &str) -> Option<Vec<Card>> {
    if encoded == "-" {
        return Some(Vec::new());
    }
    encoded.split('.').map(decode_card).collect()
}

fn encode_card(card: Card) -> String {
    format!("{}{}", card.suit.short(), card.rank)
}

fn decode_card(token: &str) -> Option<Card> {
    if token.len() < 2 {
        return None;
    }
    let mut chars = token.chars();
    let suit = match chars.next()? {
        'C' => Suit::Clubs,
        'D' => Suit::Diamonds,
        'H' => Suit::Hearts,
        'S' => Suit::Spades,
        _ => return None,
    };
    let rank = token[1..].parse::<u8>().ok()?;
    if !(1..=13).contains(&rank) {
        return None;
    }
    Some(Card { suit, rank })
}
