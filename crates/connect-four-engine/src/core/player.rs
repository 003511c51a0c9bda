use serde::{Deserialize, Serialize};

/// Which of the two seats a token or turn belongs to.
///
/// `First` always moves first. The numeric [`index`](Self::index) is the turn
/// index (0 or 1) used by the game state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Display color of a player's tokens.
///
/// Parsing is case-insensitive (`"Red"`, `"red"` and `"RED"` are all accepted),
/// and the serialized form is lowercase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum TokenColor {
    #[display("red")]
    Red,
    #[display("yellow")]
    Yellow,
    #[display("green")]
    Green,
    #[display("blue")]
    Blue,
    #[display("magenta")]
    Magenta,
    #[display("cyan")]
    Cyan,
}

impl TokenColor {
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
    ];
}

/// A participant: display name and token color.
///
/// Players are immutable once created; the engine owns exactly two of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: TokenColor,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, color: TokenColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn color(&self) -> TokenColor {
        self.color
    }

    /// The default pair: "Player 1" in red, "Player 2" in yellow.
    #[must_use]
    pub fn default_pair() -> [Self; 2] {
        [
            Self::new("Player 1", TokenColor::Red),
            Self::new("Player 2", TokenColor::Yellow),
        ]
    }
}
