use std::path::PathBuf;

use clap::Parser;

use emu8_core::{CLOCK_SPEED, TIMER_RATE};

/// Runs a Chip-8 ROM.
///
/// Controls: the left four columns of the keyboard (1234/QWER/ASDF/ZXCV) are the
/// hex keypad, hold Space to fast-forward, hold Backspace to rewind, Escape quits.
#[derive(Parser, Debug)]
#[command(name = "emu8", version)]
pub struct Config {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock_speed: u32,

    /// How many times per second the delay and sound timers count down
    #[arg(long, default_value_t = TIMER_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    pub timer_rate: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't play any sound
    #[arg(long)]
    pub mute: bool,

    /// Print every instruction as it's executed
    #[arg(long)]
    pub trace: bool,
}
