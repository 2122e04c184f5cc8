//! Fixed-capacity cell arena backing every pile on the board.
//!
//! Each pile is a singly linked list of cells addressed by [`CellId`]. Unused
//! cells are threaded on a free list, so acquiring and releasing a cell are
//! both O(1) and the arena never grows past [`MAX_CARDS`] cells.

use crate::cards::{Card, MAX_CARDS};
use crate::errors::PoolError;

/// Index of a cell in a [`CardPool`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CellId(u8);

impl CellId {
    fn index(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    card: Card,
    next: Option<CellId>,
    bound: bool,
}

#[derive(Debug, Clone)]
pub struct CardPool {
    cells: Vec<Cell>,
    free: Option<CellId>,
    in_use: usize,
}

impl CardPool {
    pub const CAPACITY: usize = MAX_CARDS;

    pub fn new() -> Self {
        let mut pool = Self {
            cells: Vec::with_capacity(Self::CAPACITY),
            free: None,
            in_use: 0,
        };
        pool.reset();
        pool
    }

    /// Returns every cell to the free list. Handles held by callers become invalid.
    pub fn reset(&mut self) {
        self.cells.clear();
        for i in 0..Self::CAPACITY {
            let next = (i + 1 < Self::CAPACITY).then(|| CellId((i + 1) as u8));
            self.cells.push(Cell {
                card: Card::sentinel(crate::cards::Suit::Clubs),
                next,
                bound: false,
            });
        }
        self.free = Some(CellId(0));
        self.in_use = 0;
    }

    /// Takes the head of the free list and binds it to `card` followed by `successor`.
    pub fn acquire(&mut self, card: Card, successor: Option<CellId>) -> Result<CellId, PoolError> {
        let Some(id) = self.free else {
            tracing::error!(capacity = Self::CAPACITY, "card pool exhausted");
            return Err(PoolError::Exhausted {
                capacity: Self::CAPACITY,
            });
        };
        let cell = &mut self.cells[id.index()];
        self.free = cell.next;
        *cell = Cell {
            card,
            next: successor,
            bound: true,
        };
        self.in_use += 1;
        Ok(id)
    }

    /// Pushes `id` back onto the free list.
    pub fn release(&mut self, id: CellId) {
        let cell = &mut self.cells[id.index()];
        debug_assert!(cell.bound, "released a free cell");
        cell.bound = false;
        cell.next = self.free;
        self.free = Some(id);
        self.in_use -= 1;
    }

    /// Points a bound cell at a new successor, moving it between piles
    /// without going through the free list.
    pub fn relink(&mut self, id: CellId, successor: Option<CellId>) {
        let cell = &mut self.cells[id.index()];
        debug_assert!(cell.bound, "relinked a free cell");
        cell.next = successor;
    }

    pub fn card(&self, id: CellId) -> Card {
        self.cells[id.index()].card
    }

    pub fn successor(&self, id: CellId) -> Option<CellId> {
        self.cells[id.index()].next
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    pub fn available(&self) -> usize {
        Self::CAPACITY - self.in_use
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a chain of cells from `start` to the end of the list.
pub struct Chain<'a> {
    pool: &'a CardPool,
    cursor: Option<CellId>,
}

impl<'a> Chain<'a> {
    pub fn new(pool: &'a CardPool, start: Option<CellId>) -> Self {
        Self {
            pool,
            cursor: start,
        }
    }
}

impl Iterator for Chain<'_> {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        let id = self.cursor?;
        self.cursor = self.pool.successor(id);
        Some(self.pool.card(id))
    }
}
