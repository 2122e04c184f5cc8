#![allow(dead_code)]

use saa_engine::board::Board;
use saa_engine::cards::{all_suits, full_deck, Card, Ranks, Suit, STACKS};

pub fn card(rank: u8, suit: Suit) -> Card {
    Card::new(rank, suit).expect("valid card")
}

pub fn ranks(n: u8) -> Ranks {
    Ranks::new(n).expect("valid rank count")
}

/// Builds a valid board: `foundations` says how far each suit has advanced,
/// `tops` pins cards on top of given stacks (in order), and every other card
/// of the deck is spread round-robin underneath.
pub fn arrange(ranks: Ranks, foundations: [u8; 4], tops: &[(usize, Card)]) -> Board {
    let pinned: Vec<Card> = tops.iter().map(|(_, c)| *c).collect();
    let mut stacks: [Vec<Card>; STACKS] = Default::default();
    let rest = full_deck(ranks)
        .into_iter()
        .filter(|c| c.rank() > foundations[c.suit().index()])
        .filter(|c| !pinned.contains(c));
    for (i, c) in rest.enumerate() {
        stacks[i % STACKS].push(c);
    }
    for (stack, c) in tops {
        stacks[*stack].push(*c);
    }
    let founds = all_suits().map(|s| {
        Card::new(foundations[s.index()], s).unwrap_or(Card::sentinel(s))
    });
    Board::from_layout(ranks, &stacks, founds).expect("arranged board is valid")
}

/// Builds a valid board from explicit stacks (bottom to top) with sentinel foundations.
pub fn layout(ranks: Ranks, stacks: [Vec<Card>; STACKS]) -> Board {
    Board::from_layout(ranks, &stacks, all_suits().map(Card::sentinel))
        .expect("layout is a full deck")
}

/// Multiset check: stacks plus consumed foundation cards equal the deck.
pub fn assert_accounts_for_deck(board: &Board) {
    let mut cards: Vec<Card> = (0..STACKS).flat_map(|i| board.stack_cards(i)).collect();
    for s in all_suits() {
        for r in 1..=board.foundation(s).rank() {
            cards.push(card(r, s));
        }
    }
    cards.sort();
    assert_eq!(cards, full_deck(board.ranks()));
    assert_eq!(board.cells_in_use(), board.cards_on_stacks());
}
