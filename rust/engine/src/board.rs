use std::fmt;

use crate::cards::{all_suits, full_deck, Card, Ranks, Suit, STACKS, SUITS};
use crate::errors::{LayoutError, PoolError};
use crate::pool::{CardPool, CellId, Chain};

#[derive(Debug, Clone, Copy, Default)]
struct Pile {
    top: Option<CellId>,
    len: usize,
}

/// The authoritative game state: eight stacks, four foundations, and the
/// cell pool the stacks are built from.
///
/// Every card of the active deck is either in exactly one stack or has been
/// consumed by its suit's foundation. A foundation holds the highest card of
/// its suit moved there so far, or that suit's sentinel.
///
/// Outside this crate a board only changes through the moves, a deal, or
/// [`Board::from_layout`], so cards cannot be added or dropped directly:
///
/// ```compile_fail
/// use saa_engine::board::Board;
/// use saa_engine::cards::Ranks;
///
/// let mut board = Board::new(Ranks::FULL);
/// board.pop_card(0);
/// ```
///
/// Stack indices run from 0 to 7. The accessors taking a stack index panic
/// past that, except [`Board::top_card`], which returns `None`.
#[derive(Clone)]
pub struct Board {
    ranks: Ranks,
    pool: CardPool,
    stacks: [Pile; STACKS],
    foundations: [Card; SUITS],
}

impl Board {
    /// An empty board with sentinel foundations.
    pub fn new(ranks: Ranks) -> Self {
        Self {
            ranks,
            pool: CardPool::new(),
            stacks: [Pile::default(); STACKS],
            foundations: all_suits().map(Card::sentinel),
        }
    }

    /// Rebuilds a board from stacks listed bottom-to-top and foundation values,
    /// checking every board invariant.
    pub fn from_layout(
        ranks: Ranks,
        stacks: &[Vec<Card>; STACKS],
        foundations: [Card; SUITS],
    ) -> Result<Self, LayoutError> {
        let mut board = Board::new(ranks);
        for (suit, card) in all_suits().into_iter().zip(foundations) {
            board.set_foundation(suit, card);
        }
        for (i, cards) in stacks.iter().enumerate() {
            if cards.len() > ranks.card_count() {
                return Err(LayoutError::StackTooLong {
                    stack: i,
                    len: cards.len() as i64,
                    max: ranks.card_count(),
                });
            }
            for card in cards {
                if !ranks.contains(*card) {
                    return Err(LayoutError::CardOutOfRange {
                        value: card.encoded(),
                        ranks: ranks.count(),
                    });
                }
                board.push_card(i, *card)?;
            }
        }
        board.verify()?;
        Ok(board)
    }

    /// Empties every stack, resets the pool, and puts sentinels on the foundations.
    pub fn reset(&mut self, ranks: Ranks) {
        self.ranks = ranks;
        self.pool.reset();
        self.stacks = [Pile::default(); STACKS];
        self.foundations = all_suits().map(Card::sentinel);
    }

    pub fn ranks(&self) -> Ranks {
        self.ranks
    }

    pub(crate) fn push_card(&mut self, stack: usize, card: Card) -> Result<(), PoolError> {
        let pile = &mut self.stacks[stack];
        pile.top = Some(self.pool.acquire(card, pile.top)?);
        pile.len += 1;
        Ok(())
    }

    pub(crate) fn pop_card(&mut self, stack: usize) -> Option<Card> {
        let pile = &mut self.stacks[stack];
        let id = pile.top?;
        let card = self.pool.card(id);
        pile.top = self.pool.successor(id);
        pile.len -= 1;
        self.pool.release(id);
        Some(card)
    }

    /// Moves the top cell of `from` onto `to`, handing the cell over rather
    /// than releasing and reacquiring it.
    pub(crate) fn transfer_top(&mut self, from: usize, to: usize) -> Option<Card> {
        let id = self.stacks[from].top?;
        let below = self.pool.successor(id);
        self.pool.relink(id, self.stacks[to].top);
        self.stacks[from].top = below;
        self.stacks[from].len -= 1;
        self.stacks[to].top = Some(id);
        self.stacks[to].len += 1;
        Some(self.pool.card(id))
    }

    /// `None` for an empty stack or an index past the last stack.
    pub fn top_card(&self, stack: usize) -> Option<Card> {
        self.stacks.get(stack)?.top.map(|id| self.pool.card(id))
    }

    /// # Panics
    ///
    /// If `stack` is not below [`STACKS`].
    pub fn stack_len(&self, stack: usize) -> usize {
        self.stacks[stack].len
    }

    /// # Panics
    ///
    /// If `stack` is not below [`STACKS`].
    pub fn is_empty(&self, stack: usize) -> bool {
        self.stacks[stack].top.is_none()
    }

    /// Cards of a stack from the top down.
    ///
    /// # Panics
    ///
    /// If `stack` is not below [`STACKS`].
    pub fn stack_iter(&self, stack: usize) -> Chain<'_> {
        Chain::new(&self.pool, self.stacks[stack].top)
    }

    /// Cards of a stack from the bottom up, the order they are shown and saved in.
    ///
    /// # Panics
    ///
    /// If `stack` is not below [`STACKS`].
    pub fn stack_cards(&self, stack: usize) -> Vec<Card> {
        let mut cards: Vec<Card> = self.stack_iter(stack).collect();
        cards.reverse();
        cards
    }

    pub fn foundation(&self, suit: Suit) -> Card {
        self.foundations[suit.index()]
    }

    pub fn foundations(&self) -> [Card; SUITS] {
        self.foundations
    }

    pub(crate) fn set_foundation(&mut self, suit: Suit, card: Card) {
        self.foundations[suit.index()] = card;
    }

    /// Number of cards still in the stacks.
    pub fn cards_on_stacks(&self) -> usize {
        self.stacks.iter().map(|p| p.len).sum()
    }

    /// Number of cards consumed by the foundations.
    pub fn cards_on_foundations(&self) -> usize {
        self.foundations.iter().map(|c| usize::from(c.rank())).sum()
    }

    pub fn cells_in_use(&self) -> usize {
        self.pool.in_use()
    }

    /// Checks that stacks plus foundation advances account for the active deck exactly once.
    pub fn verify(&self) -> Result<(), LayoutError> {
        let ranks = self.ranks;
        let mut seen = [false; Card::MAX_ENCODED as usize + 1];
        let mut mark = |card: Card| -> Result<(), LayoutError> {
            if !ranks.contains(card) {
                return Err(LayoutError::CardOutOfRange {
                    value: card.encoded(),
                    ranks: ranks.count(),
                });
            }
            let slot = &mut seen[card.encoded() as usize];
            if *slot {
                return Err(LayoutError::DuplicateCard(card));
            }
            *slot = true;
            Ok(())
        };

        for suit in all_suits() {
            let top = self.foundation(suit);
            if top.suit() != suit {
                return Err(LayoutError::FoundationSuit { suit, card: top });
            }
            if top.rank() > ranks.count() {
                return Err(LayoutError::FoundationOutOfRange { suit });
            }
            for rank in 1..=top.rank() {
                if let Some(card) = Card::new(rank, suit) {
                    mark(card)?;
                }
            }
        }
        for stack in 0..STACKS {
            for card in self.stack_iter(stack) {
                mark(card)?;
            }
        }
        match full_deck(ranks)
            .into_iter()
            .find(|c| !seen[c.encoded() as usize])
        {
            Some(missing) => Err(LayoutError::MissingCard(missing)),
            None => Ok(()),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.ranks == other.ranks
            && self.foundations == other.foundations
            && (0..STACKS).all(|i| self.stack_iter(i).eq(other.stack_iter(i)))
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stacks: Vec<Vec<Card>> = (0..STACKS).map(|i| self.stack_cards(i)).collect();
        f.debug_struct("Board")
            .field("ranks", &self.ranks)
            .field("foundations", &self.foundations)
            .field("stacks", &stacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit).unwrap()
    }

    fn ranks5() -> Ranks {
        Ranks::new(5).unwrap()
    }

    #[test]
    fn new_board_is_empty_with_sentinels() {
        let b = Board::new(ranks5());
        for s in 0..STACKS {
            assert!(b.is_empty(s));
        }
        for suit in all_suits() {
            assert_eq!(b.foundation(suit), Card::sentinel(suit));
        }
        assert_eq!(b.cells_in_use(), 0);
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut b = Board::new(ranks5());
        b.push_card(2, c(1, Suit::Clubs)).unwrap();
        b.push_card(2, c(2, Suit::Clubs)).unwrap();
        assert_eq!(b.top_card(2), Some(c(2, Suit::Clubs)));
        assert_eq!(b.stack_cards(2), vec![c(1, Suit::Clubs), c(2, Suit::Clubs)]);
        assert_eq!(b.pop_card(2), Some(c(2, Suit::Clubs)));
        assert_eq!(b.pop_card(2), Some(c(1, Suit::Clubs)));
        assert_eq!(b.pop_card(2), None);
        assert_eq!(b.cells_in_use(), 0);
    }

    #[test]
    fn transfer_keeps_cell_count() {
        let mut b = Board::new(ranks5());
        b.push_card(0, c(3, Suit::Hearts)).unwrap();
        b.push_card(1, c(4, Suit::Spades)).unwrap();
        assert_eq!(b.transfer_top(0, 1), Some(c(3, Suit::Hearts)));
        assert_eq!(b.cells_in_use(), 2);
        assert_eq!(b.stack_len(1), 2);
        assert!(b.is_empty(0));
    }

    #[test]
    fn top_card_past_the_last_stack_is_none() {
        let mut b = Board::new(ranks5());
        b.push_card(STACKS - 1, c(1, Suit::Clubs)).unwrap();
        assert_eq!(b.top_card(STACKS - 1), Some(c(1, Suit::Clubs)));
        assert_eq!(b.top_card(STACKS), None);
        assert_eq!(b.top_card(usize::MAX), None);
    }

    #[test]
    #[should_panic]
    fn stack_len_past_the_last_stack_panics() {
        Board::new(ranks5()).stack_len(STACKS);
    }

    #[test]
    fn verify_reports_missing_cards() {
        let b = Board::new(ranks5());
        assert!(matches!(b.verify(), Err(LayoutError::MissingCard(_))));
    }

    #[test]
    fn from_layout_rejects_duplicates() {
        let ranks = ranks5();
        let mut stacks: [Vec<Card>; STACKS] = Default::default();
        for (i, card) in full_deck(ranks).into_iter().enumerate() {
            stacks[i % STACKS].push(card);
        }
        stacks[0].push(c(1, Suit::Clubs));
        let err = Board::from_layout(ranks, &stacks, all_suits().map(Card::sentinel)).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateCard(c(1, Suit::Clubs)));
    }

    #[test]
    fn foundation_advances_count_as_consumed_cards() {
        let ranks = ranks5();
        let mut stacks: [Vec<Card>; STACKS] = Default::default();
        for (i, card) in full_deck(ranks)
            .into_iter()
            .filter(|card| !(card.suit() == Suit::Spades && card.rank() <= 2))
            .enumerate()
        {
            stacks[i % STACKS].push(card);
        }
        let mut foundations = all_suits().map(Card::sentinel);
        foundations[Suit::Spades.index()] = c(2, Suit::Spades);
        let b = Board::from_layout(ranks, &stacks, foundations).unwrap();
        assert_eq!(b.cards_on_foundations(), 2);
        assert_eq!(b.cards_on_stacks(), 18);
    }

    #[test]
    fn foundation_of_wrong_suit_is_rejected() {
        let ranks = ranks5();
        let mut stacks: [Vec<Card>; STACKS] = Default::default();
        for (i, card) in full_deck(ranks).into_iter().enumerate() {
            stacks[i % STACKS].push(card);
        }
        let mut foundations = all_suits().map(Card::sentinel);
        foundations[0] = Card::sentinel(Suit::Hearts);
        let err = Board::from_layout(ranks, &stacks, foundations).unwrap_err();
        assert!(matches!(err, LayoutError::FoundationSuit { .. }));
    }
}
