use std::io::{self, BufRead};
use std::sync::{Arc, RwLock};
use std::thread;

use anyhow::{Context, Result};
use log::warn;

use crate::audio;
use crate::core::control::ControlState;
use crate::core::oscillator::Waveform;
use crate::core::pitch::key_to_note;
use crate::error::SynthError;
use crate::messaging::MessageBus;

/// A parsed control-surface command.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Octave(i32),
    Attack(f32),
    Decay(f32),
    Sustain(f32),
    Release(f32),
    Waveform(Waveform),
}

/// Terminal front end: reads lines from stdin, applies control commands to
/// the shared state, and forwards trigger keys to the audio worker.
pub struct SynthApp {
    controls: Arc<RwLock<ControlState>>,
    bus: MessageBus,
    worker: Option<thread::JoinHandle<Result<(), SynthError>>>,
}

impl SynthApp {
    pub fn new() -> Result<Self> {
        let controls = Arc::new(RwLock::new(ControlState::default()));
        let (bus, triggers) = MessageBus::channel();

        let worker_controls = Arc::clone(&controls);
        let worker = thread::Builder::new()
            .name("audio-worker".into())
            .spawn(move || audio::run_worker(triggers, worker_controls))
            .context("failed to spawn audio worker")?;

        Ok(SynthApp {
            controls,
            bus,
            worker: Some(worker),
        })
    }

    /// Main input loop. Returns when stdin closes or on `quit`.
    pub fn run(&mut self) -> Result<()> {
        print_help();

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read from stdin")?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == "quit" {
                break;
            }
            if let Some(command) = parse_command(input) {
                self.apply_command(command)?;
                continue;
            }
            for key in input.chars() {
                self.handle_key(key);
            }
        }

        self.bus.shutdown();
        if let Some(worker) = self.worker.take() {
            match worker.join() {
                Ok(result) => result.context("audio worker failed")?,
                Err(_) => anyhow::bail!("audio worker panicked"),
            }
        }
        Ok(())
    }

    fn apply_command(&self, command: Command) -> Result<()> {
        let mut controls = self
            .controls
            .write()
            .map_err(|_| anyhow::anyhow!("control state lock poisoned"))?;
        match command {
            Command::Octave(octave) => controls.octave = octave,
            Command::Attack(value) => controls.attack = value,
            Command::Decay(value) => controls.decay = value,
            Command::Sustain(value) => controls.sustain = value,
            Command::Release(value) => controls.release = value,
            Command::Waveform(waveform) => controls.waveform = waveform,
        }
        Ok(())
    }

    fn handle_key(&self, key: char) {
        let Some(note_index) = key_to_note(key) else {
            warn!("key '{key}' is not bound to a note");
            return;
        };
        match self.bus.trigger_note(note_index) {
            Ok(()) => {}
            Err(SynthError::Busy) => warn!("trigger queue full, note {note_index} dropped"),
            Err(err) => warn!("note {note_index} failed: {err}"),
        }
    }
}

/// Parse a whole input line as a control command. Lines that are not
/// commands are treated as sequences of trigger keys by the caller.
fn parse_command(input: &str) -> Option<Command> {
    match input {
        "sine" => return Some(Command::Waveform(Waveform::Sine)),
        "saw" | "sawtooth" => return Some(Command::Waveform(Waveform::Sawtooth)),
        "square" => return Some(Command::Waveform(Waveform::Square)),
        _ => {}
    }

    let (name, value) = input.split_once(char::is_whitespace)?;
    match name {
        "octave" => {
            let octave: i32 = value.trim().parse().ok()?;
            Some(Command::Octave(octave.clamp(0, 8)))
        }
        "attack" | "decay" | "sustain" | "release" => {
            let value: f32 = value.trim().parse().ok()?;
            let value = value.clamp(0.0, 1.0);
            Some(match name {
                "attack" => Command::Attack(value),
                "decay" => Command::Decay(value),
                "sustain" => Command::Sustain(value),
                _ => Command::Release(value),
            })
        }
        _ => None,
    }
}

fn print_help() {
    println!("keys a w s e d f t g y h u j play one octave of notes");
    println!("commands: sine | saw | square");
    println!("          octave <0-8>");
    println!("          attack|decay|sustain|release <0.0-1.0>");
    println!("          quit");
}
