use rand::seq::SliceRandom;
use rand::Rng;

use super::{Card, Difficulty, Suit, DECK_SIZE};

/// Builds the ordered deck a new board is dealt from. The deal order is a
/// pure function of the RNG state and the difficulty, so seeded games are
/// reproducible.
///
/// Cards are dealt round-robin into the cascades, so cards late in the deck
/// end up near the cascade tops.
pub fn difficulty_deck(difficulty: Difficulty, rng: &mut impl Rng) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);

    match difficulty {
        Difficulty::Easy => bias_easy(deck, rng),
        Difficulty::Medium => bias_medium(deck, rng),
        Difficulty::Hard => deck,
    }
}

fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in 1..=13 {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Easy deal: high cards (10+) sink toward the cascade bottoms, aces and twos
/// float to the tops. A handful of extra swaps among the mid/high cards keeps
/// the layout from feeling canned; aces, twos and threes never move in that
/// pass, so the accessible low cards stay accessible.
fn bias_easy(deck: Vec<Card>, rng: &mut impl Rng) -> Vec<Card> {
    let mut high: Vec<Card> = deck.iter().copied().filter(|c| c.rank >= 10).collect();
    let mut mid: Vec<Card> = deck
        .iter()
        .copied()
        .filter(|c| c.rank > 2 && c.rank < 10)
        .collect();
    let mut low: Vec<Card> = deck.iter().copied().filter(|c| c.rank <= 2).collect();

    high.shuffle(rng);
    mid.shuffle(rng);
    low.shuffle(rng);

    let mut result = high;
    result.extend(mid);
    result.extend(low);

    for _ in 0..15 {
        let a = rng.gen_range(0..result.len());
        let b = rng.gen_range(0..result.len());
        if result[a].rank > 3 && result[b].rank > 3 {
            result.swap(a, b);
        }
    }
    result
}

/// Classic deal: a plain shuffle except aces are reinserted within the last
/// thirty deck positions, keeping them out of the deepest cascade layers.
fn bias_medium(deck: Vec<Card>, rng: &mut impl Rng) -> Vec<Card> {
    let aces: Vec<Card> = deck.iter().copied().filter(|c| c.rank == 1).collect();
    let mut rest: Vec<Card> = deck.into_iter().filter(|c| c.rank != 1).collect();

    for ace in aces {
        let pos = rest.len() - rng.gen_range(0..30);
        rest.insert(pos, ace);
    }
    rest
}
