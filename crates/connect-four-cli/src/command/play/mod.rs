use anyhow::Context as _;
use tracing::{debug, info};

use crate::{
    command::play::app::PlayApp,
    config::Config,
    logging,
    tui::{self, RenderMode, Runtime},
};

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Frames drawn per second at most
    #[clap(long)]
    frame_rate: Option<f64>,
    /// Redraw at a fixed rate instead of only after changes
    #[clap(long)]
    fixed_frame_rate: bool,
}

pub(crate) fn run(arg: &PlayArg, config: &Config) -> anyhow::Result<()> {
    let PlayArg {
        frame_rate,
        fixed_frame_rate,
    } = arg;

    logging::init_file(&config.log.file, config.log.filter.as_deref())?;
    debug!(?config, "configuration loaded");
    let [first, second] = config.players();
    info!(
        first = first.name(),
        second = second.name(),
        tick_rate = config.display.tick_rate,
        "starting interactive game"
    );

    let tick_interval = tui::rate_interval(config.display.tick_rate)
        .context("tick rate is out of range")?;
    let render_mode = frame_render_mode(
        frame_rate.unwrap_or(config.display.frame_rate),
        *fixed_frame_rate,
    )?;
    let mut app = PlayApp::new([first, second], tick_interval, render_mode);
    Runtime::new().run(&mut app)?;

    let engine = app.engine();
    info!(
        moves_played = engine.moves_played(),
        message = engine.message(),
        "game closed"
    );
    Ok(())
}

fn frame_render_mode(frame_rate: f64, fixed: bool) -> anyhow::Result<RenderMode> {
    let render_mode = if fixed {
        RenderMode::interval_from_rate(frame_rate)
    } else {
        RenderMode::throttled_from_rate(frame_rate)
    };
    render_mode.with_context(|| {
        format!("--frame-rate must be a positive number of frames per second (got {frame_rate})")
    })
}
