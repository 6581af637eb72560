use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::File;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use fireworks::cli::Cli;
use fireworks::clock::{self, FrameClock, SpawnTimer};
use fireworks::error;
use fireworks::sim::Simulation;
use fireworks::surface::{Canvas, Rgb, Surface};

/// Puts the terminal back however the show ends.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> error::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn is_quit(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    key.kind == KeyEventKind::Press
        && (key.code == KeyCode::Char('q')
            || key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(event::KeyModifiers::CONTROL)))
}

fn run(mut sim: Simulation, background: Rgb) -> error::Result<()> {
    let mut stdout: BufWriter<Stdout> = BufWriter::with_capacity(1024 * 64, stdout());
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows, background);
    let (width, height) = canvas.pixel_size();
    log::info!("surface {width}x{height} pixels ({} x {} units)", canvas.width(), canvas.height());

    let mut frames = FrameClock::new();
    let mut spawner = SpawnTimer::default();
    let mut last_frame = Instant::now();

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            if is_quit(&event) {
                break;
            }
            if let Event::Resize(cols, rows) = event {
                canvas.resize(cols, rows);
                execute!(stdout, Clear(ClearType::All))?;
                log::info!("resized to {cols}x{rows} cells");
            }
        }

        let now = Instant::now();
        let steps = frames.advance(now.duration_since(last_frame).as_secs_f32());
        last_frame = now;

        for _ in 0..steps {
            for _ in 0..spawner.advance(clock::FRAME_DT) {
                sim.spawn_batch(canvas.width(), canvas.height());
            }
            sim.tick(&mut canvas);
        }

        if steps > 0 {
            canvas.present(&mut stdout)?;
        }
    }

    log::info!(
        "show over with {} fireworks and {} particles in flight",
        sim.fireworks().len(),
        sim.particles().len()
    );
    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match cli.verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Info);
        }
        2 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let sim = match cli.seed {
        Some(seed) => {
            log::info!("seeded show: {seed}");
            Simulation::with_seed(seed)
        }
        None => Simulation::default(),
    };

    run(sim, cli.bg_color.unwrap_or((0, 0, 0))).context("fireworks display failed")
}
