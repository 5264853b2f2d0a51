use std::error::Error;
use std::time::{Duration, Instant};

use sdl2::event::Event;

use emu8_core::Chip8;
use emu8_display::{Beeper, Display, Mute, Speaker};

use crate::config::Config;
use crate::keymap::{keymap, Input};

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM; nothing runs unless all of it made it into memory
    let loaded = chip8.load_rom_file(&config.rom)?;
    println!(
        "loaded {} byte ROM from {}",
        loaded,
        config.rom.display()
    );

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, config.scale as usize)?;
    let mut beeper: Box<dyn Beeper> = if config.mute {
        Box::new(Mute)
    } else {
        Box::new(Speaker::new(&sdl)?)
    };
    let mut events = sdl.event_pump()?;

    // The CPU and the timers run on separate clocks
    let cycle_time = Duration::from_secs(1) / config.clock_speed;
    let timer_time = Duration::from_secs(1) / config.timer_rate;
    let mut last_timer: Instant = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward: bool = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind: bool = false;
    // Set once the program faults; the window stays up so the last frame can be seen
    let mut halted: bool = false;
    let mut cycles: u64 = 0;

    display.render(chip8.frame_buffer())?;

    'event: loop {
        let cycle_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(Input::Key(kc)) => chip8.key_press(kc),
                    Some(Input::FastForward) => fast_forward = true,
                    Some(Input::Rewind) => rewind = true,
                    Some(Input::Quit) => break 'event,
                    None => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(Input::Key(kc)) => chip8.key_release(kc),
                    Some(Input::FastForward) => fast_forward = false,
                    Some(Input::Rewind) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            chip8.reverse_cpu();
            halted = false;
            last_timer = Instant::now();
            display.render(chip8.frame_buffer())?;
        } else if !halted {
            let pc = chip8.state().pc;
            match chip8.advance_cpu() {
                Ok(instruction) => {
                    cycles += 1;
                    if config.trace {
                        eprintln!("{:04X} {:04X} {}", pc, chip8.state().opcode, instruction);
                    }
                }
                Err(e) => {
                    eprintln!("halted after {} cycles at {:04X}: {}", cycles, pc, e);
                    halted = true;
                }
            }

            while last_timer.elapsed() >= timer_time {
                chip8.advance_timers();
                last_timer += timer_time;
            }
        } else {
            last_timer = Instant::now();
        }

        if chip8.sound_active() && !halted {
            beeper.beep();
        } else {
            beeper.stop();
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.get_frame() {
            display.render(frame)?;
        }

        // Handle timing
        let elapsed_cycle_time = cycle_start.elapsed();
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
    }

    beeper.stop();
    println!("exiting after {} cycles", cycles);
    Ok(())
}
