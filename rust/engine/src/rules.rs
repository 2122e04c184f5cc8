use crate::board::Board;
use crate::cards::{Card, STACKS};

/// A card may go to its foundation when the foundation holds its immediate
/// predecessor of the same suit.
///
/// # Examples
///
/// ```
/// use saa_engine::cards::{Card, Suit};
/// use saa_engine::rules::can_move_to_foundation;
///
/// let ace = Card::new(1, Suit::Clubs).unwrap();
/// assert!(can_move_to_foundation(ace, Card::sentinel(Suit::Clubs)));
/// assert!(!can_move_to_foundation(ace, Card::sentinel(Suit::Hearts)));
/// ```
pub fn can_move_to_foundation(card: Card, foundation: Card) -> bool {
    foundation.suit() == card.suit() && foundation.successor() == Some(card)
}

/// A card may go onto a stack that is empty or whose top card is exactly
/// one rank higher, regardless of suit.
pub fn can_move_to_stack(card: Card, destination_top: Option<Card>) -> bool {
    match destination_top {
        None => true,
        Some(top) => top.rank() == card.rank() + 1,
    }
}

/// A stack is done when every card is covered only by cards of lesser rank,
/// i.e. ranks strictly increase from the top down. Empty stacks are done.
pub fn is_stack_done<I>(top_to_bottom: I) -> bool
where
    I: IntoIterator<Item = Card>,
{
    let mut cards = top_to_bottom.into_iter();
    let Some(mut above) = cards.next() else {
        return true;
    };
    for below in cards {
        if above.rank() >= below.rank() {
            return false;
        }
        above = below;
    }
    true
}

impl Board {
    /// The game is won when every stack is done. Foundations do not matter:
    /// an empty stack counts as done, so clearing everything to the
    /// foundations is one way to win.
    pub fn is_done(&self) -> bool {
        (0..STACKS).all(|i| is_stack_done(self.stack_iter(i)))
    }
}
