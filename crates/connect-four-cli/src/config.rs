use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use connect_four_engine::{Player, TokenColor};
use serde::{Deserialize, Serialize};

use crate::tui;

const DEFAULT_RATE: f64 = 50.0;
const DEFAULT_LOG_FILE: &str = "connect-four.log";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("failed to read config file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[display("invalid configuration: {_0}")]
    Validation(#[error(not(source))] String),
}

/// Command-line overrides, applied on top of the config file.
#[derive(Default, Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Name of the player who moves first
    #[clap(long, global = true)]
    pub first_name: Option<String>,
    /// Name of the player who moves second
    #[clap(long, global = true)]
    pub second_name: Option<String>,
    /// Token color of the first player (red, yellow, green, blue, magenta, cyan)
    #[clap(long, global = true)]
    pub first_color: Option<TokenColor>,
    /// Token color of the second player
    #[clap(long, global = true)]
    pub second_color: Option<TokenColor>,
    /// Game loop ticks per second
    #[clap(long, global = true)]
    pub tick_rate: Option<f64>,
    /// File that receives log output while the interactive game runs
    #[clap(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub players: PlayersConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayersConfig {
    pub first: PlayerConfig,
    pub second: PlayerConfig,
}

/// Per-seat settings. Unset fields fall back to the seat's default player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub name: Option<String>,
    pub color: Option<TokenColor>,
}

impl PlayerConfig {
    fn resolve(&self, default: &Player) -> Player {
        let name = self.name.clone().unwrap_or_else(|| default.name().to_owned());
        let color = self.color.unwrap_or(default.color());
        Player::new(name, color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Game loop ticks per second. One pending input is applied per tick.
    pub tick_rate: f64,
    /// Upper bound on redraws per second.
    pub frame_rate: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_RATE,
            frame_rate: DEFAULT_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    pub filter: Option<String>,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: None,
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or returns the defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    #[must_use]
    pub fn with_overrides(mut self, args: &ConfigArgs) -> Self {
        let ConfigArgs {
            config: _,
            first_name,
            second_name,
            first_color,
            second_color,
            tick_rate,
            log_file,
        } = args;

        if let Some(name) = first_name {
            self.players.first.name = Some(name.clone());
        }
        if let Some(name) = second_name {
            self.players.second.name = Some(name.clone());
        }
        if let Some(color) = first_color {
            self.players.first.color = Some(*color);
        }
        if let Some(color) = second_color {
            self.players.second.color = Some(*color);
        }
        if let Some(rate) = tick_rate {
            self.display.tick_rate = *rate;
        }
        if let Some(file) = log_file {
            self.log.file.clone_from(file);
        }
        self
    }

    /// The two players, in turn order.
    #[must_use]
    pub fn players(&self) -> [Player; 2] {
        let [first, second] = Player::default_pair();
        [
            self.players.first.resolve(&first),
            self.players.second.resolve(&second),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let players = self.players();
        if let Some(player) = players.iter().find(|player| player.name().trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "player names must not be empty (got {:?})",
                player.name()
            )));
        }
        if players[0].name() == players[1].name() {
            return Err(ConfigError::Validation(format!(
                "both players are named {:?}",
                players[0].name()
            )));
        }
        let colors = players.iter().map(Player::color).collect::<HashSet<_>>();
        if colors.len() != players.len() {
            return Err(ConfigError::Validation(format!(
                "both players use the color {}",
                players[0].color()
            )));
        }
        for (key, rate) in [
            ("display.tick_rate", self.display.tick_rate),
            ("display.frame_rate", self.display.frame_rate),
        ] {
            if tui::rate_interval(rate).is_none() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a positive number of events per second (got {rate})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        Config::parse(text, Path::new("test.toml"))
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.players(), Player::default_pair());
        assert!((config.display.tick_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(config.log.file, Path::new("connect-four.log"));
        config.validate().unwrap();
    }

    #[test]
    fn test_full_file() {
        let config = parse(
            r#"
            [players.first]
            name = "Ann"
            color = "green"

            [players.second]
            name = "Bob"
            color = "blue"

            [display]
            tick_rate = 30.0
            frame_rate = 60.0

            [log]
            filter = "connect_four_engine=debug"
            file = "/tmp/c4.log"
            "#,
        )
        .unwrap();

        let [first, second] = config.players();
        assert_eq!(first, Player::new("Ann", TokenColor::Green));
        assert_eq!(second, Player::new("Bob", TokenColor::Blue));
        assert!((config.display.frame_rate - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.log.filter.as_deref(), Some("connect_four_engine=debug"));
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_player_keeps_seat_defaults() {
        let config = parse("[players.second]\nname = \"Bob\"\n").unwrap();
        let [first, second] = config.players();
        assert_eq!(first.name(), "Player 1");
        assert_eq!(second, Player::new("Bob", TokenColor::Yellow));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse("[players.first]\ncolor = \"purple\"\n"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            parse("[display]\nspeed = 3\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let error = Config::load(Some(Path::new("/nonexistent/connect-four.toml"))).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("/nonexistent/connect-four.toml"));
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("connect-four-{}.toml", std::process::id()));
        fs::write(&path, "[players.first]\nname = \"Ann\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.players()[0].name(), "Ann");
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_validation() {
        let invalid = [
            "[players.first]\nname = \"  \"\n",
            "[players.first]\nname = \"Player 2\"\n",
            "[players.second]\ncolor = \"red\"\n",
            "[display]\ntick_rate = 0.0\n",
            "[display]\nframe_rate = -5.0\n",
            "[display]\ntick_rate = inf\n",
            "[display]\ntick_rate = 1e-30\n",
            "[display]\nframe_rate = 1e-300\n",
        ];
        for text in invalid {
            let config = parse(text).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = parse("[players.first]\nname = \"Ann\"\n[display]\ntick_rate = 10.0\n")
            .unwrap()
            .with_overrides(&ConfigArgs {
                first_name: Some("Zoe".to_owned()),
                second_color: Some(TokenColor::Cyan),
                tick_rate: Some(25.0),
                log_file: Some(PathBuf::from("other.log")),
                ..ConfigArgs::default()
            });
        let [first, second] = config.players();
        assert_eq!(first.name(), "Zoe");
        assert_eq!(second.color(), TokenColor::Cyan);
        assert!((config.display.tick_rate - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.log.file, Path::new("other.log"));
    }

    #[test]
    fn test_tiny_rate_override_is_rejected() {
        let config = Config::default().with_overrides(&ConfigArgs {
            tick_rate: Some(1e-30),
            ..ConfigArgs::default()
        });
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("display.tick_rate"), "{error}");
    }
}
