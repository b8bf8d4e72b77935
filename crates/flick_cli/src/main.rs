//! Flick CLI
//!
//! Replay recorded or hand-written gesture scenarios against a carousel on
//! the headless host, printing every notification with its virtual timestamp.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flick_carousel::headless::mount;
use flick_carousel::{Carousel, CarouselEventKind};
use flick_platform::headless::HeadlessHost;
use flick_platform::Size;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;

use scenario::{Action, Scenario};

#[derive(Parser)]
#[command(name = "flick")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replay gesture scenarios against a paged carousel", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print the notifications it produces
    Replay {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Leave out per-frame change notifications
        #[arg(long)]
        hide_changes: bool,
    },

    /// Validate a scenario file without running it
    Check {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay {
            scenario,
            hide_changes,
        } => cmd_replay(&scenario, hide_changes),
        Commands::Check { scenario } => cmd_check(&scenario),
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;

    info!(
        "{}: {} steps over {:.1}ms, container {}x{}, strip {}x{}",
        path.display(),
        scenario.steps.len(),
        scenario.duration(),
        scenario.layout.container[0],
        scenario.layout.container[1],
        scenario.layout.inner[0],
        scenario.layout.inner[1],
    );
    println!("{}: ok", path.display());
    Ok(())
}

fn cmd_replay(path: &Path, hide_changes: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!("Replaying {}", path.display());

    let mut carousel = mount(
        scenario.layout.container_size(),
        scenario.layout.inner_size(),
        scenario.carousel.clone(),
    )
    .with_context(|| format!("Failed to mount carousel for {}", path.display()))?;

    info!(
        "{} pages of {}px, starting on page {}",
        carousel.page_count(),
        carousel.extent(),
        carousel.index()
    );

    let clock = carousel.host().clock();
    for kind in [
        CarouselEventKind::Change,
        CarouselEventKind::Page,
        CarouselEventKind::Complete,
        CarouselEventKind::Tap,
        CarouselEventKind::DoubleTap,
    ] {
        if hide_changes && kind == CarouselEventKind::Change {
            continue;
        }
        let clock = clock.clone();
        carousel.on(kind, move |event| println!("{:>9.1}ms  {}", clock.now(), event));
    }

    for step in &scenario.steps {
        carousel.pump(step.at);
        debug!("{:>9.1}ms  > {:?}", step.at, step.action);
        apply(&mut carousel, &step.action)?;
    }

    let end = match scenario.settle_ms {
        Some(ms) => {
            carousel.pump_for(ms);
            carousel.now()
        }
        None => carousel.settle(),
    };

    info!(
        "Finished at {:.1}ms on page {} (position {:.1}) after {} frames",
        end,
        carousel.index(),
        carousel.position(),
        carousel.frames_run()
    );
    Ok(())
}

fn apply(carousel: &mut Carousel<HeadlessHost>, action: &Action) -> Result<()> {
    if let Some((source, phase, point)) = action.pointer() {
        carousel.pointer(source, phase, point, None);
        return Ok(());
    }
    match *action {
        Action::Resize { container, inner } => carousel
            .resize(
                Size::new(container[0], container[1]),
                Size::new(inner[0], inner[1]),
            )
            .context("Resize step failed")?,
        Action::AnimateTo { index } => carousel.animate_to(index),
        Action::JumpTo { index } => carousel.jump_to(index),
        _ => {}
    }
    Ok(())
}
