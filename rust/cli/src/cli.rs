use clap::Parser;

/// Streets and Alleys, a solitaire card game.
#[derive(Parser, Debug)]
#[command(name = "saa", version)]
pub struct SaaCli {
    /// Number of ranks per suit, 5 to 13 (default from configuration, else 13)
    #[arg(value_parser = clap::value_parser!(u8).range(5..=13))]
    pub ranks: Option<u8>,
}
