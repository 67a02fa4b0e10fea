use std::{
    fs,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use chip8vm_core::{ChannelBeeper, Chip8Config, Chip8Interpreter, StackPolicy};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Headless runner: executes a program image and prints the final screen.
#[derive(Debug, Parser)]
#[command(about = "Run a CHIP-8 program image without a window")]
struct Args {
    /// Program image (raw bytes, loaded at 0x200).
    rom: PathBuf,

    /// Cycles per second. Timers tick once per cycle.
    #[arg(long, default_value_t = 120)]
    clock_speed: u32,

    /// Stop after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Hex key codes held down for the whole run, e.g. `5a`.
    #[arg(long, default_value = "")]
    keys: String,

    /// Wrap the stack pointer instead of failing on call overflow / return underflow.
    #[arg(long)]
    wrapping_stack: bool,

    /// Log every executed instruction.
    #[arg(long)]
    trace: bool,
}

struct Timer {
    interval: Duration,
    last_tick: Instant,
}

impl Timer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }

    fn tick(&mut self) -> bool {
        if self.last_tick.elapsed() >= self.interval {
            self.last_tick += self.interval;
            true
        } else {
            false
        }
    }

    fn wait(&mut self) {
        while !self.tick() {
            thread::sleep(self.interval.saturating_sub(self.last_tick.elapsed()));
        }
    }
}

fn parse_keys(keys: &str) -> Result<[bool; 16]> {
    let mut held = [false; 16];
    for c in keys.chars() {
        let Some(key) = c.to_digit(16) else {
            bail!("invalid key {c:?}, expected a hex digit");
        };
        held[key as usize] = true;
    }
    Ok(held)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.trace {
        filter = filter.add_directive("chip8vm_core=trace".parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.clock_speed == 0 {
        bail!("clock speed must be at least 1");
    }
    let held_keys = parse_keys(&args.keys)?;

    let program =
        fs::read(&args.rom).with_context(|| format!("reading {}", args.rom.display()))?;

    let config = Chip8Config {
        stack_policy: if args.wrapping_stack {
            StackPolicy::Wrapping
        } else {
            StackPolicy::Strict
        },
        trace_instructions: args.trace,
    };
    let (beeper, tones) = ChannelBeeper::channel(1);
    let mut chip8 = Chip8Interpreter::with_config(StdRng::from_entropy(), beeper, config);
    chip8
        .load_program(&program)
        .with_context(|| format!("loading {}", args.rom.display()))?;

    thread::spawn(move || {
        for () in tones {
            tracing::debug!("tone");
        }
    });

    let mut timer = Timer::new(Duration::from_secs_f64(1. / args.clock_speed as f64));
    let mut cycles = 0u64;
    let outcome = loop {
        if args.max_cycles.is_some_and(|max| cycles >= max) {
            break Ok(());
        }
        timer.wait();
        chip8.keypad_mut().set_keys(held_keys);
        if let Err(err) = chip8.cycle() {
            break Err(err);
        }
        cycles += 1;
    };

    print!("{}", chip8.display().render_text());

    match outcome {
        Ok(()) => {
            tracing::info!(cycles, "cycle limit reached");
            Ok(())
        }
        Err(err) => {
            let pc = chip8.state.program_counter;
            tracing::error!(cycles, "halted at {pc:03X} ({})", chip8.state.fetch());
            Err(err).context("interpreter halted")
        }
    }
}
