use rand::rngs::StdRng;
use rand::SeedableRng;

mod dealer;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }

    /// The two suits of the opposite color, used by the safe-automove check.
    pub fn opposite_color_suits(self) -> [Suit; 2] {
        if self.is_red() {
            [Suit::Clubs, Suit::Spades]
        } else {
            [Suit::Diamonds, Suit::Hearts]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    pub fn label(&self) -> String {
        format!("{}{}", rank_label(self.rank), self.suit.short())
    }

    pub fn color_red(&self) -> bool {
        self.suit.is_red()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Relaxed",
            Self::Medium => "Classic",
            Self::Hard => "Expert",
        }
    }

    /// Relaxed play ignores the supermove capacity formula and the
    /// safe-automove restriction.
    pub fn unrestricted_moves(self) -> bool {
        matches!(self, Self::Easy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Selecting,
    Playing,
    Won,
}

impl GameStatus {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "selecting" => Some(Self::Selecting),
            "playing" => Some(Self::Playing),
            "won" => Some(Self::Won),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Playing => "playing",
            Self::Won => "won",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileKind {
    Cascade,
    Freecell,
    Foundation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub kind: PileKind,
    pub index: usize,
}

impl Location {
    pub const fn cascade(index: usize) -> Self {
        Self {
            kind: PileKind::Cascade,
            index,
        }
    }

    pub const fn freecell(index: usize) -> Self {
        Self {
            kind: PileKind::Freecell,
            index,
        }
    }

    pub const fn foundation(index: usize) -> Self {
        Self {
            kind: PileKind::Foundation,
            index,
        }
    }
}

pub const CASCADE_COUNT: usize = 8;
pub const FREECELL_COUNT: usize = 4;
pub const FOUNDATION_COUNT: usize = 4;
pub const DECK_SIZE: usize = 52;

/// A card may land on an empty cascade, or on a top card of the opposite
/// color exactly one rank higher.
pub fn can_place_on_cascade(moving: Card, target_top: Option<Card>) -> bool {
    match target_top {
        None => true,
        Some(top) => top.rank == moving.rank + 1 && top.color_red() != moving.color_red(),
    }
}

/// Foundations start at the ace and climb one rank at a time within a suit.
pub fn can_place_on_foundation(moving: Card, pile: &[Card]) -> bool {
    match pile.last() {
        None => moving.rank == 1,
        Some(top) => top.suit == moving.suit && top.rank + 1 == moving.rank,
    }
}

/// True when the slice reads as a descending alternating-color run, i.e.
/// each card could legally sit on the one before it. Empty and single-card
/// slices are trivially ordered.
pub fn is_ordered_run(cards: &[Card]) -> bool {
    cards
        .windows(2)
        .all(|pair| can_place_on_cascade(pair[1], Some(pair[0])))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FreecellGame {
    difficulty: Difficulty,
    foundations: [Vec<Card>; 4],
    freecells: [Option<Card>; 4],
    cascades: [Vec<Card>; 8],
}

impl FreecellGame {
    /// Deals a fresh board: a difficulty-biased shuffle, then cards dropped
    /// round-robin across the eight cascades.
    pub fn new_with_seed(seed: u64, difficulty: Difficulty) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = dealer::difficulty_deck(difficulty, &mut rng);

        let mut game = Self::empty(difficulty);
        for (idx, card) in deck.into_iter().enumerate() {
            game.cascades[idx % CASCADE_COUNT].push(card);
        }
        game
    }

    pub fn empty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            foundations: std::array::from_fn(|_| Vec::new()),
            freecells: [None; 4],
            cascades: std::array::from_fn(|_| Vec::new()),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn foundations(&self) -> &[Vec<Card>; 4] {
        &self.foundations
    }

    pub fn freecells(&self) -> &[Option<Card>; 4] {
        &self.freecells
    }

    pub fn cascades(&self) -> &[Vec<Card>; 8] {
        &self.cascades
    }

    pub fn cascade_top(&self, col: usize) -> Option<Card> {
        self.cascades.get(col).and_then(|pile| pile.last().copied())
    }

    pub fn cascade_len(&self, col: usize) -> usize {
        self.cascades.get(col).map(Vec::len).unwrap_or(0)
    }

    pub fn freecell_card(&self, cell: usize) -> Option<Card> {
        self.freecells.get(cell).and_then(|slot| *slot)
    }

    pub fn foundation_top(&self, idx: usize) -> Option<Card> {
        self.foundations
            .get(idx)
            .and_then(|pile| pile.last().copied())
    }

    /// The single card exposed at a location: a cascade top, a freecell
    /// occupant, or a foundation top.
    pub fn exposed_card(&self, location: Location) -> Option<Card> {
        match location.kind {
            PileKind::Cascade => self.cascade_top(location.index),
            PileKind::Freecell => self.freecell_card(location.index),
            PileKind::Foundation => self.foundation_top(location.index),
        }
    }

    pub fn empty_freecell_count(&self) -> usize {
        self.freecells.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn empty_cascade_count(&self) -> usize {
        self.cascades.iter().filter(|pile| pile.is_empty()).count()
    }

    /// Supermove capacity toward cascade `dst`: each empty freecell adds one
    /// card linearly, each empty cascade doubles the total. The destination
    /// cannot stage its own incoming run, so it is excluded from the doubling
    /// when empty. Relaxed difficulty lifts the limit entirely.
    pub fn max_movable_cards(&self, dst: usize) -> usize {
        if self.difficulty.unrestricted_moves() {
            return DECK_SIZE;
        }
        let free_empty = self.empty_freecell_count();
        let mut empty_cascades = self.empty_cascade_count();
        if self.cascades.get(dst).is_some_and(|pile| pile.is_empty()) {
            empty_cascades = empty_cascades.saturating_sub(1);
        }
        (free_empty + 1) << empty_cascades
    }

    /// First foundation that accepts `card`. Foundations are claimed by the
    /// first card placed on them rather than being suit-indexed.
    pub fn foundation_index_for(&self, card: Card) -> Option<usize> {
        self.foundations
            .iter()
            .position(|pile| can_place_on_foundation(card, pile))
    }

    /// Rank reached by `suit` on its foundation, 0 when the suit has not
    /// started. Piles are looked up by the suit of their bottom card since
    /// pile order depends on play order.
    pub fn foundation_rank_for_suit(&self, suit: Suit) -> u8 {
        self.foundations
            .iter()
            .find(|pile| pile.first().is_some_and(|card| card.suit == suit))
            .map(|pile| pile.len() as u8)
            .unwrap_or(0)
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(|pile| pile.len() == 13)
    }

    pub fn can_move_cascade_run_to_cascade(&self, src: usize, start: usize, dst: usize) -> bool {
        if src == dst || src >= self.cascades.len() || dst >= self.cascades.len() {
            return false;
        }
        let source = &self.cascades[src];
        if start >= source.len() {
            return false;
        }

        let run = &source[start..];
        if run.is_empty() || !is_ordered_run(run) {
            return false;
        }

        if !can_place_on_cascade(run[0], self.cascade_top(dst)) {
            return false;
        }

        run.len() <= self.max_movable_cards(dst)
    }

    pub fn move_cascade_run_to_cascade(&mut self, src: usize, start: usize, dst: usize) -> bool {
        if !self.can_move_cascade_run_to_cascade(src, start, dst) {
            return false;
        }
        let moved = self.cascades[src].split_off(start);
        self.cascades[dst].extend(moved);
        true
    }

    pub fn can_move_cascade_top_to_freecell(&self, src: usize, cell: usize) -> bool {
        if cell >= self.freecells.len() || src >= self.cascades.len() {
            return false;
        }
        self.freecells[cell].is_none() && !self.cascades[src].is_empty()
    }

    pub fn move_cascade_top_to_freecell(&mut self, src: usize, cell: usize) -> bool {
        if !self.can_move_cascade_top_to_freecell(src, cell) {
            return false;
        }
        let Some(card) = self.cascades[src].pop() else {
            return false;
        };
        self.freecells[cell] = Some(card);
        true
    }

    pub fn can_move_freecell_to_cascade(&self, cell: usize, dst: usize) -> bool {
        if dst >= self.cascades.len() {
            return false;
        }
        let Some(card) = self.freecell_card(cell) else {
            return false;
        };
        can_place_on_cascade(card, self.cascade_top(dst))
    }

    pub fn move_freecell_to_cascade(&mut self, cell: usize, dst: usize) -> bool {
        if !self.can_move_freecell_to_cascade(cell, dst) {
            return false;
        }
        let Some(card) = self.freecells[cell].take() else {
            return false;
        };
        self.cascades[dst].push(card);
        true
    }

    pub fn can_move_cascade_top_to_foundation(&self, src: usize) -> bool {
        self.cascade_top(src)
            .and_then(|card| self.foundation_index_for(card))
            .is_some()
    }

    pub fn move_cascade_top_to_foundation(&mut self, src: usize) -> bool {
        let Some(idx) = self
            .cascade_top(src)
            .and_then(|card| self.foundation_index_for(card))
        else {
            return false;
        };
        let Some(card) = self.cascades[src].pop() else {
            return false;
        };
        self.foundations[idx].push(card);
        true
    }

    pub fn can_move_freecell_to_foundation(&self, cell: usize) -> bool {
        self.freecell_card(cell)
            .and_then(|card| self.foundation_index_for(card))
            .is_some()
    }

    pub fn move_freecell_to_foundation(&mut self, cell: usize) -> bool {
        let Some(idx) = self
            .freecell_card(cell)
            .and_then(|card| self.foundation_index_for(card))
        else {
            return false;
        };
        let Some(card) = self.freecells[cell].take() else {
            return false;
        };
        self.foundations[idx].push(card);
        true
    }

    pub fn can_move_foundation_top_to_cascade(&self, foundation_idx: usize, dst: usize) -> bool {
        if dst >= self.cascades.len() {
            return false;
        }
        let Some(card) = self.foundation_top(foundation_idx) else {
            return false;
        };
        can_place_on_cascade(card, self.cascade_top(dst))
    }

    pub fn move_foundation_top_to_cascade(&mut self, foundation_idx: usize, dst: usize) -> bool {
        if !self.can_move_foundation_top_to_cascade(foundation_idx, dst) {
            return false;
        }
        let Some(card) = self.foundations[foundation_idx].pop() else {
            return false;
        };
        self.cascades[dst].push(card);
        true
    }

    pub fn has_legal_moves(&self) -> bool {
        if self.is_won() {
            return false;
        }

        for cell in 0..FREECELL_COUNT {
            if self.can_move_freecell_to_foundation(cell) {
                return true;
            }
            for dst in 0..CASCADE_COUNT {
                if self.can_move_freecell_to_cascade(cell, dst) {
                    return true;
                }
            }
        }

        for src in 0..CASCADE_COUNT {
            if self.can_move_cascade_top_to_foundation(src) {
                return true;
            }
            for cell in 0..FREECELL_COUNT {
                if self.can_move_cascade_top_to_freecell(src, cell) {
                    return true;
                }
            }
            for start in 0..self.cascade_len(src) {
                for dst in 0..CASCADE_COUNT {
                    if self.can_move_cascade_run_to_cascade(src, start, dst) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn is_stuck(&self) -> bool {
        !self.is_won() && !self.has_legal_moves()
    }

    /// Unchecked relocation of the trailing `count` cards from one zone to
    /// another. Legality is the caller's responsibility; this only moves
    /// cards, so the 52-card census is preserved by construction.
    pub(crate) fn relocate(&mut self, from: Location, to: Location, count: usize) {
        let cards: Vec<Card> = match from.kind {
            PileKind::Cascade => {
                let pile = &mut self.cascades[from.index];
                let at = pile.len().saturating_sub(count);
                pile.split_off(at)
            }
            PileKind::Freecell => self.freecells[from.index].take().into_iter().collect(),
            PileKind::Foundation => self.foundations[from.index].pop().into_iter().collect(),
        };

        match to.kind {
            PileKind::Cascade => self.cascades[to.index].extend(cards),
            PileKind::Freecell => self.freecells[to.index] = cards.into_iter().next(),
            PileKind::Foundation => self.foundations[to.index].extend(cards),
        }
    }

    pub(crate) fn from_parts_unchecked(
        difficulty: Difficulty,
        foundations: [Vec<Card>; 4],
        freecells: [Option<Card>; 4],
        cascades: [Vec<Card>; 8],
    ) -> Self {
        Self {
            difficulty,
            foundations,
            freecells,
            cascades,
        }
    }
}

#[cfg(test)]
impl FreecellGame {
    pub(crate) fn debug_new(
        difficulty: Difficulty,
        foundations: [Vec<Card>; 4],
        freecells: [Option<Card>; 4],
        cascades: [Vec<Card>; 8],
    ) -> Self {
        Self {
            difficulty,
            foundations,
            freecells,
            cascades,
        }
    }
}

pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}
