pub use audio::{Beeper, Mute, Speaker};
pub use display::Display;

mod audio;
mod display;
