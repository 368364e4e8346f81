use std::{path::PathBuf, time::Duration};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use ferrex_carousel::transform::track_transform;
use ferrex_carousel::{CarouselRow, CommitTrigger, Direction, RowKey};
use ferrex_config::{
    CarouselSettings, CarouselSettingsSource, ConfigWarnings,
    apply_guard_rails,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ferrex-carousel-check",
    about = "Validate carousel settings and dry-run a row"
)]
struct Cli {
    /// Settings file; falls back to the environment and default locations
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate the settings
    Validate {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Page through a synthetic row and print every transition
    Simulate {
        #[arg(long, default_value_t = 17)]
        items: usize,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 4)]
        moves: usize,
        #[arg(long, value_enum, default_value = "next")]
        direction: DirectionArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Next,
    Prev,
}

fn load(
    file: Option<&PathBuf>,
) -> Result<(CarouselSettings, CarouselSettingsSource, ConfigWarnings)> {
    let (settings, source) = match file {
        Some(path) => (
            CarouselSettings::load_from_file(path)?,
            CarouselSettingsSource::File(path.clone()),
        ),
        None => CarouselSettings::load_from_env()?,
    };
    let warnings = apply_guard_rails(&settings)?;
    Ok((settings, source, warnings))
}

fn report(source: &CarouselSettingsSource, warnings: &ConfigWarnings) {
    info!(?source, "carousel settings loaded");
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
}

async fn simulate(
    settings: &CarouselSettings,
    items: usize,
    width: f32,
    moves: usize,
    direction: DirectionArg,
) -> Result<()> {
    let responsive = settings.responsive(width);
    let trigger = settings.commit_trigger();
    let row = CarouselRow::with_responsive(
        RowKey::Custom("simulation"),
        (0..items).collect::<Vec<_>>(),
        responsive.subscribe(),
        trigger,
    )?;

    let view = row.derived();
    info!(
        items,
        width,
        items_per_page = view.items_per_page,
        pages = view.pagination_indicators.len(),
        "row ready"
    );
    if !view.show_controls {
        info!("everything fits on one page; nothing to simulate");
        return Ok(());
    }

    // Prev stays hidden until the row has moved once.
    let mut remaining = moves;
    if matches!(direction, DirectionArg::Prev) {
        step(&row, settings, trigger, Direction::Next).await?;
        remaining = remaining.saturating_sub(1);
    }
    let direction = match direction {
        DirectionArg::Next => Direction::Next,
        DirectionArg::Prev => Direction::Prev,
    };
    for _ in 0..remaining {
        step(&row, settings, trigger, direction).await?;
    }

    row.shutdown();
    Ok(())
}

async fn step(
    row: &CarouselRow<usize>,
    settings: &CarouselSettings,
    trigger: CommitTrigger,
    direction: Direction,
) -> Result<()> {
    let transition = match direction {
        Direction::Next => row.move_next()?,
        Direction::Prev => row.move_prev()?,
    };
    let moving = row.derived();
    info!(
        %direction,
        from = transition.from_index,
        to = transition.to_index,
        move_percentage = transition.move_percentage,
        transform = %track_transform(&moving, settings.animation()),
        "transition started"
    );

    tokio::time::sleep(settings.animation()).await;
    if trigger == CommitTrigger::AnimationEnd {
        row.animation_finished(transition.id)?;
    }
    wait_for_commit(row, transition.id).await?;

    let settled = row.derived();
    let page = settled
        .pagination_indicators
        .iter()
        .position(|indicator| indicator.active)
        .unwrap_or_default();
    let window: Vec<usize> =
        settled.window.iter().map(|slot| slot.index).collect();
    info!(
        page,
        transform = %track_transform(&settled, settings.animation()),
        ?window,
        "transition committed"
    );
    Ok(())
}

const COMMIT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const COMMIT_POLL_ATTEMPTS: u32 = 100;

/// Wait until `transition_id` is no longer in flight. The timer commit runs
/// on a spawned task, so it may land a little after the budget elapsed.
async fn wait_for_commit(
    row: &CarouselRow<usize>,
    transition_id: u64,
) -> Result<()> {
    for _ in 0..COMMIT_POLL_ATTEMPTS {
        let in_flight = row.with_carousel(|carousel| {
            carousel.pending().map(|pending| pending.id)
        });
        if in_flight != Some(transition_id) {
            return Ok(());
        }
        tokio::time::sleep(COMMIT_POLL_INTERVAL).await;
    }
    bail!(
        "transition {transition_id} still in flight {}ms after the animation budget",
        (COMMIT_POLL_INTERVAL * COMMIT_POLL_ATTEMPTS).as_millis()
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let (settings, source, warnings) = load(cli.file.as_ref())?;
    report(&source, &warnings);

    match cli.command {
        Command::Validate { strict } => {
            if strict && !warnings.is_empty() {
                bail!(
                    "{} warning(s) reported in strict mode",
                    warnings.len()
                );
            }
            info!(
                animation_ms = settings.animation_ms,
                trigger = ?settings.commit_trigger,
                breakpoints = settings.breakpoints.len(),
                "settings are valid"
            );
        }
        Command::Simulate {
            items,
            width,
            moves,
            direction,
        } => simulate(&settings, items, width, moves, direction).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(trigger: CommitTrigger) -> CarouselRow<usize> {
        CarouselRow::new(RowKey::Trending, (0..17).collect(), 5, trigger)
            .expect("row")
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_a_late_timer_commit() {
        let row = row(CommitTrigger::Timer(Duration::from_millis(750)));
        let transition = row.move_next().expect("move next");

        // Polling starts before the timer fires.
        tokio::time::sleep(Duration::from_millis(700)).await;
        wait_for_commit(&row, transition.id).await.expect("committed");
        assert!(!row.derived().is_moving);
        row.with_carousel(|c| assert_eq!(c.state().lowest_visible_index, 5));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_when_nothing_commits() {
        let row = row(CommitTrigger::AnimationEnd);
        let transition = row.move_next().expect("move next");

        let err = wait_for_commit(&row, transition.id)
            .await
            .expect_err("never committed");
        assert!(err.to_string().contains("still in flight"));
        assert!(row.derived().is_moving);
    }
}
