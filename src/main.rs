use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

use neuroscribe::App;
use neuroscribe::config::{Config, StartSurface};
use neuroscribe::device::{DeviceLink, ScriptTransport};

#[derive(Parser, Debug)]
#[command(name = "neuroscribe")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("NEUROSCRIBE_GIT_HASH"), ")"),
    about = "Grid drawing driven by a wearable EEG/EMG headset"
)]
struct Cli {
    /// Configuration file (default: ~/.config/neuroscribe/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Session script to replay, or "-" to read commands live from stdin
    #[arg(long, short = 'r', value_name = "FILE")]
    replay: Option<String>,

    /// Start on the drawing board instead of the practice game
    #[arg(long, action = ArgAction::SetTrue)]
    skip_tutorial: bool,

    /// Directory for "Save Drawing" exports
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Print the board when the session ends
    #[arg(long, action = ArgAction::SetTrue)]
    print_board: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(replay) = cli.replay.as_deref() else {
        print_usage();
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.skip_tutorial {
        config.session.start_surface = StartSurface::Main;
    }

    let mut app = App::new(&config, Instant::now());
    if let Some(dir) = &cli.export_dir {
        app.set_export_dir(dir);
    }

    let quit = Arc::new(AtomicBool::new(false));
    spawn_signal_listener(Arc::clone(&quit))?;

    let transport = if replay == "-" {
        ScriptTransport::from_reader("stdin", Box::new(io::stdin().lock()))
    } else {
        ScriptTransport::from_path(replay)
    };
    let mut link = DeviceLink::new(transport);

    app.run(&mut link, &quit)
        .with_context(|| format!("failed to connect to {}", link.name()))?;
    info!(
        "Session ended after {} notifications ({} decoded, {} dropped)",
        link.received_count(),
        app.decoder().decoded_count(),
        app.decoder().dropped_count()
    );

    if let Some(path) = app.last_export() {
        println!("Drawing saved to {}", path.display());
    }
    println!("{}", app.status_line(Instant::now()));
    if cli.print_board {
        print!("{}", app.render_board());
    }

    Ok(())
}

/// First SIGINT/SIGTERM stops dispatch after the current notification; a
/// second one exits immediately (a live stdin read may still be blocked).
fn spawn_signal_listener(quit: Arc<AtomicBool>) -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("Failed to register signal handler")?;

    thread::spawn(move || {
        for sig in signals.forever() {
            if quit.swap(true, Ordering::AcqRel) {
                warn!("Received signal {sig} again - exiting");
                std::process::exit(130);
            }
            info!(
                "Received {} - disconnecting",
                if sig == SIGTERM { "SIGTERM" } else { "SIGINT" }
            );
        }
    });
    Ok(())
}

fn print_usage() {
    println!("neuroscribe: Grid drawing driven by a wearable EEG/EMG headset");
    println!();
    println!("Usage:");
    println!("  neuroscribe --replay FILE      Replay a recorded session script");
    println!("  neuroscribe --replay -         Read commands live from stdin");
    println!("  neuroscribe --help             Show help");
    println!();
    println!("Script lines:");
    println!("  M 8 | S 2 | T | J 3 | A | N 1 | E 2 | C   device frames (code, value)");
    println!("  hex 4d 08                                  raw frame bytes");
    println!("  wait 250                                   advance the clock (ms)");
    println!("  undo | redo | clear | close-menu           board controls");
    println!("  tutorial-start | tutorial-next | tutorial-reset | tutorial-skip");
}
