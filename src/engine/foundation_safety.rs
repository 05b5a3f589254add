use crate::game::{Card, FreecellGame};

pub fn can_auto_promote_freecell(game: &FreecellGame, cell: usize, relaxed: bool) -> bool {
    let Some(card) = game.freecell_card(cell) else {
        return false;
    };
    game.foundation_index_for(card).is_some() && (relaxed || is_safe_auto_foundation(game, card))
}

pub fn can_auto_promote_cascade(game: &FreecellGame, src: usize, relaxed: bool) -> bool {
    let Some(card) = game.cascade_top(src) else {
        return false;
    };
    game.foundation_index_for(card).is_some() && (relaxed || is_safe_auto_foundation(game, card))
}

/// A promotion is safe when no lower opposite-color card can still need this
/// card as a cascade landing spot: aces and twos always qualify, anything
/// higher only once both opposite-color foundations have reached one rank
/// below it.
pub fn is_safe_auto_foundation(game: &FreecellGame, card: Card) -> bool {
    if card.rank <= 2 {
        return true;
    }

    let [first, second] = card.suit.opposite_color_suits();
    game.foundation_rank_for_suit(first) >= card.rank - 1
        && game.foundation_rank_for_suit(second) >= card.rank - 1
}
