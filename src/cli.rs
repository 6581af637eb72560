use crate::error::Error;
use crate::surface::Rgb;
use clap::Parser;
use std::path::PathBuf;

/// Fireworks in the terminal.
///
/// Press 'q', ESC, or Ctrl+C to exit.
#[derive(Debug, Parser)]
#[command(name = "fireworks", version, about)]
pub struct Cli {
    /// Background colour as hex (e.g. --bg-color 1a1b26)
    #[arg(long, value_name = "RRGGBB", value_parser = parse_hex_color)]
    pub bg_color: Option<Rgb>,

    /// Seed the random source for a reproducible show
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse_hex_color(hex: &str) -> Result<Rgb, Error> {
    let digits = hex.trim_start_matches('#');
    let invalid = || Error::InvalidColor(hex.to_string());
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}
