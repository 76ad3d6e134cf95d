//! Binary entrypoint for the slide carousel.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use slide_carousel::carousel::Carousel;
use slide_carousel::config::Configuration;
use slide_carousel::document::{Display, Document};
use slide_carousel::events::{CarouselCommand, Rendered};
use slide_carousel::tasks;

#[derive(Debug, Parser)]
#[command(name = "slide-carousel", version, about = "Headless slide carousel")]
struct Args {
    /// Path to YAML config
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the autoplay period (e.g. `2s`, `750ms`)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Print the next N slide indices without starting the timer
    #[arg(long = "dry-run", value_name = "STEPS")]
    dry_run: Option<usize>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("slide_carousel={level}")))
        .context("invalid log filter")?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        interval,
        dry_run,
        verbose,
    } = Args::parse();
    init_tracing(verbose)?;

    let mut cfg = Configuration::from_yaml_file(&config)
        .with_context(|| format!("failed to load configuration from {}", config.display()))?;
    if let Some(period) = interval {
        cfg.carousel.autoplay.period = period;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;

    let carousel = Carousel::mount(Document::from_page(&cfg.page), &cfg)
        .context("failed to mount carousel")?;

    if let Some(steps) = dry_run {
        print_plan(&carousel, steps);
        return Ok(());
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(16); // Timer/controls -> Carousel
    let (rendered_tx, mut rendered_rx) = mpsc::channel::<Rendered>(16); // Carousel -> log

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; tearing down");
            cancel.cancel();
        });
    }

    let mut tasks: JoinSet<Result<()>> = JoinSet::new();

    if cfg.carousel.controls {
        tasks.spawn({
            let to_carousel = cmd_tx.clone();
            let cancel = cancel.clone();
            async move {
                let lines = tasks::controls::spawn_line_reader(BufReader::new(io::stdin()));
                let res = tasks::controls::run(lines, to_carousel, cancel.clone())
                    .await
                    .context("controls task failed");
                // stdin EOF ends the session the same way ctrl-c does
                cancel.cancel();
                res
            }
        });
    }

    let autoplay = cfg
        .carousel
        .autoplay
        .enabled
        .then(|| tasks::autoplay::start(cfg.carousel.autoplay.period, cmd_tx.clone(), &cancel));
    // held until teardown so a static page without timer or controls stays mounted
    let _idle = cmd_tx;

    tasks.spawn(async move {
        while let Some(Rendered { index, len }) = rendered_rx.recv().await {
            info!(index, len, "showing slide {}/{}", index + 1, len);
        }
        Ok(())
    });

    let carousel = tasks::carousel::run(carousel, cmd_rx, rendered_tx, cancel.clone())
        .await
        .context("carousel task failed")?;

    cancel.cancel();
    if let Some(handle) = autoplay {
        handle.stop();
        handle.join().await;
    }
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    info!(index = carousel.current_index(), "carousel torn down");
    Ok(())
}

fn print_plan(carousel: &Carousel, steps: usize) {
    let doc = carousel.document();
    let label = |index: usize| {
        carousel
            .slides()
            .get(index)
            .and_then(|id| doc.get(*id).ok())
            .map_or("?", |el| el.label.as_str())
    };

    println!(
        "# carousel dry run\n# slides: {}\n# start: {}\n# steps: {}\n",
        carousel.len(),
        carousel.current_index(),
        steps
    );
    if carousel.is_empty() {
        println!("(no slides; every advance is a no-op)");
        return;
    }

    let shown = carousel
        .slides()
        .iter()
        .filter(|id| doc.get(**id).is_ok_and(|el| el.style.display == Display::Block))
        .count();
    println!("# initially displayed slides: {shown}");
    println!("  {:>4}: {}", 0, label(carousel.current_index()));
    for (step, index) in carousel.cycler().plan(steps).into_iter().enumerate() {
        println!("  {:>4}: {}", step + 1, label(index));
    }
}
