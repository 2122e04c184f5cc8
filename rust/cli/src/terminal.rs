//! Line-oriented [`GameDisplay`] over any reader and writer.
//!
//! Every redraw prints the whole board; status and prompt lines are printed
//! as they change. Keys are read with [`read_key`].

use std::io::{self, BufRead, Write};

use saa_engine::board::Board;
use saa_engine::cards::{Card, STACKS, Suit, all_suits};

use crate::display::GameDisplay;
use crate::io_utils::read_key;

pub const HELP: &str = "\
There are eight stacks of cards and a foundation for each suit.  A
card may be moved from the top of a stack to its foundation or to
the top of another stack.  The object of the game is to order the
cards in each stack so that each card is covered only by cards of
lesser rank.  The ace has the smallest rank and the king has the
greatest rank.

A card may be moved to its foundation when the card's predecessor of
the same suit is there.  A card may be moved to a stack when the top
card of the stack has rank one greater than the card being moved.  A
card can always be moved to an empty stack.

Commands:                              Command Aliases:

  0    Select a foundation.              <space> = 0,
  1-8  Select a stack.                   j = 1, k = 2, l = 3, ; = 4,
  q    Quit the game.                    u = 5, i = 6, o = 7, p = 8.
  r    Restore a game from a file.
  s    Save a game in a file.
  ?    Print this help and then refresh screen.
";

pub const ABOUT: &str = "\
The program normally uses 52 cards or 13 ranks.  A full sized game is
quite difficult, so beginners should play smaller games.  The number
of ranks used in a game can be selected by quitting out of the current
game and typing r at the restart game prompt.  Alternatively, the
program can be given a command line argument specifying the number of
ranks to be used.
";

pub struct TextDisplay<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
    prompt_open: bool,
}

impl<'a> TextDisplay<'a> {
    pub fn new(input: &'a mut dyn BufRead, out: &'a mut dyn Write) -> Self {
        Self {
            input,
            out,
            prompt_open: false,
        }
    }

    /// Ends a pending prompt line so the next output starts on its own line.
    fn end_prompt(&mut self) -> io::Result<()> {
        if self.prompt_open {
            self.prompt_open = false;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl GameDisplay for TextDisplay<'_> {
    fn render_card(&mut self, card: Card) -> io::Result<()> {
        write!(self.out, "{}", card)
    }

    fn render_stack(&mut self, index: usize, cards: &[Card]) -> io::Result<()> {
        self.end_prompt()?;
        write!(self.out, "{:>4}:", index + 1)?;
        for card in cards {
            write!(self.out, " ")?;
            self.render_card(*card)?;
        }
        writeln!(self.out)
    }

    fn render_foundation(&mut self, _suit: Suit, card: Card) -> io::Result<()> {
        write!(self.out, " ")?;
        self.render_card(card)
    }

    fn clear_status_line(&mut self) -> io::Result<()> {
        self.end_prompt()
    }

    fn clear_prompt_line(&mut self) -> io::Result<()> {
        self.end_prompt()
    }

    fn write_status(&mut self, text: &str) -> io::Result<()> {
        self.end_prompt()?;
        writeln!(self.out, "Status: {}", text)
    }

    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        self.end_prompt()?;
        write!(self.out, "Prompt: {}", text)?;
        self.out.flush()?;
        self.prompt_open = true;
        Ok(())
    }

    fn read_raw_key(&mut self) -> io::Result<Option<char>> {
        read_key(&mut *self.input)
    }

    fn show_help(&mut self) -> io::Result<()> {
        self.end_prompt()?;
        writeln!(self.out, "\n       Streets and Alleys\n")?;
        write!(self.out, "{}", HELP)?;
        self.write_prompt("Type space for more about the program. ")?;
        if self.read_raw_key()? == Some(' ') {
            writeln!(self.out)?;
            write!(self.out, "{}", ABOUT)?;
            self.write_prompt("Type any character to continue the game. ")?;
            self.read_raw_key()?;
        }
        Ok(())
    }

    fn show_board(&mut self, board: &Board) -> io::Result<()> {
        self.end_prompt()?;
        writeln!(self.out, "\n       Streets and Alleys\n")?;
        write!(self.out, "   0:")?;
        for suit in all_suits() {
            self.render_foundation(suit, board.foundation(suit))?;
        }
        writeln!(self.out)?;
        for i in 0..STACKS {
            self.render_stack(i, &board.stack_cards(i))?;
        }
        writeln!(self.out, "Commands: 0-8, q, r, s, or ?.")
    }
}
