//! Reading single keys from a buffered reader.
//!
//! The game is driven one character at a time. Line terminators are skipped so
//! that keys can be typed on a line-buffered terminal or piped in from a file.

use std::io::{self, BufRead, ErrorKind};

fn next_byte(input: &mut dyn BufRead) -> io::Result<Option<u8>> {
    loop {
        match input.fill_buf() {
            Ok(buf) => {
                let Some(&b) = buf.first() else {
                    return Ok(None);
                };
                input.consume(1);
                return Ok(Some(b));
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Reads the next key, blocking until one is available.
///
/// Returns `Ok(None)` at end of input. Invalid UTF-8 reads as
/// [`char::REPLACEMENT_CHARACTER`].
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use saa_cli::io_utils::read_key;
///
/// let mut input = Cursor::new("1\n2");
/// assert_eq!(read_key(&mut input).unwrap(), Some('1'));
/// assert_eq!(read_key(&mut input).unwrap(), Some('2'));
/// assert_eq!(read_key(&mut input).unwrap(), None);
/// ```
pub fn read_key(input: &mut dyn BufRead) -> io::Result<Option<char>> {
    loop {
        let Some(first) = next_byte(input)? else {
            return Ok(None);
        };
        if first == b'\n' || first == b'\r' {
            continue;
        }
        let width = match first {
            0x00..=0x7F => return Ok(Some(char::from(first))),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        };
        let mut bytes = vec![first];
        for _ in 1..width {
            match next_byte(input)? {
                Some(b) => bytes.push(b),
                None => break,
            }
        }
        let key = std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return Ok(Some(key));
    }
}
