//! Home-row aliases for the command keys, for keyboards without a keypad.

/// `(alias, command)` pairs.
pub const ALIASES: [(char, char); 9] = [
    (' ', '0'),
    ('j', '1'),
    ('k', '2'),
    ('l', '3'),
    (';', '4'),
    ('u', '5'),
    ('i', '6'),
    ('o', '7'),
    ('p', '8'),
];

/// Maps an alias to its command key; every other key passes through.
pub fn translate(key: char) -> char {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, command)| *command)
}
