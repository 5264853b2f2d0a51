use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// Something that can make the Chip-8's one and only sound.
pub trait Beeper {
    /// Start the tone; does nothing if it's already playing
    fn beep(&mut self);

    /// Stop the tone; does nothing if it's already stopped
    fn stop(&mut self);
}

const PITCH: f32 = 440.0;
const VOLUME: f32 = 0.1;

/// A square wave, generated one sample at a time as SDL asks for them.
pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Plays a square wave through the default audio device.
pub struct Speaker {
    device: AudioDevice<SquareWave>,
}

impl Speaker {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: PITCH / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        })?;
        Ok(Speaker { device })
    }
}

impl Beeper for Speaker {
    fn beep(&mut self) {
        self.device.resume();
    }

    fn stop(&mut self) {
        self.device.pause();
    }
}

/// For when there shouldn't be any sound at all.
pub struct Mute;

impl Beeper for Mute {
    fn beep(&mut self) {}

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_alternates() {
        let mut wave = SquareWave {
            phase_inc: 0.25,
            phase: 0.0,
            volume: 0.5,
        };
        let mut out = [0.0; 8];
        wave.callback(&mut out);
        assert_eq!(out, [0.5, 0.5, 0.5, -0.5, 0.5, 0.5, 0.5, -0.5]);
    }
}
