use std::fmt::Write as _;

use connect_four_engine::{GameEngine, MoveError, PlayerId};
use tracing::{debug, info, instrument, warn};

use crate::{config::Config, logging};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Board grid followed by the message
    #[default]
    Text,
    /// Game snapshot as JSON
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MovesArg {
    /// Columns to play, in order (0 is the leftmost column)
    #[arg(required = true, allow_negative_numbers = true)]
    pub(crate) columns: Vec<isize>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub(crate) fn run(arg: &MovesArg, config: &Config) -> anyhow::Result<()> {
    let MovesArg { columns, format } = arg;

    logging::init_stderr(config.log.filter.as_deref())?;
    debug!(?config, "configuration loaded");
    let [first, second] = config.players();
    let mut engine = GameEngine::new(first, second);
    let rejected = apply(&mut engine, columns);
    info!(
        applied = engine.moves_played(),
        rejected = rejected.len(),
        "moves processed"
    );

    eprint!("{}", rejection_report(&rejected));
    print!("{}", render(&engine, *format)?);
    Ok(())
}

/// One stderr line per rejected move, independent of the log filter.
fn rejection_report(rejected: &[(usize, MoveError)]) -> String {
    rejected
        .iter()
        .map(|(index, error)| format!("move #{index} rejected: {error}\n"))
        .collect()
}

/// Plays `columns` in order and returns the rejected ones with their index.
#[instrument(level = "debug", skip_all, fields(count = columns.len()))]
fn apply(engine: &mut GameEngine, columns: &[isize]) -> Vec<(usize, MoveError)> {
    let mut rejected = Vec::new();
    for (index, &column) in columns.iter().enumerate() {
        if let Err(error) = engine.play_column(column) {
            warn!(index, column, %error, message = engine.message(), "move rejected");
            rejected.push((index, error));
        }
    }
    rejected
}

fn render(engine: &GameEngine, format: OutputFormat) -> anyhow::Result<String> {
    let snapshot = engine.snapshot();
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&snapshot)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut text = snapshot.board_text();
            for (id, symbol) in [(PlayerId::First, 'X'), (PlayerId::Second, 'O')] {
                let player = engine.player(id);
                writeln!(text, "{symbol}: {} ({})", player.name(), player.color())?;
            }
            writeln!(text, "{}", snapshot.message)?;
            Ok(text)
        }
    }
}
