use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChorepackError;

// ---------------------------------------------------------------------------
// Rarity: the four tiers and their draw weights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// Every rarity, most to least frequent.
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    /// Relative draw weight. Always strictly positive; the weights are not
    /// normalized and need not sum to 1.
    pub fn weight(self) -> f64 {
        match self {
            Rarity::Common => 0.50,
            Rarity::Uncommon => 0.30,
            Rarity::Rare => 0.15,
            Rarity::Legendary => 0.05,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Legendary => "LEGENDARY",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ChorepackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChorepackError::InvalidInput(format!("Unknown rarity: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// Card: one chore in the collection
// ---------------------------------------------------------------------------

/// A chore card.
///
/// `id` is `None` until the card has been saved to the collection; only
/// persisted cards can be put into packs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub flavour_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Card {
    /// An unsaved card with just a title and rarity.
    pub fn new(title: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            title: title.into(),
            rarity,
            ..Default::default()
        }
    }

    pub fn with_flavour(mut self, text: impl Into<String>) -> Self {
        self.flavour_text = text.into();
        self
    }

    pub fn weight(&self) -> f64 {
        self.rarity.weight()
    }
}

/// Row shape of the `cards` table (snake_case columns).
#[derive(Debug, Deserialize)]
pub(crate) struct CardRow {
    pub id: String,
    pub title: String,
    pub rarity: String,
    #[serde(default)]
    pub flavour_text: Option<String>,
    pub time_estimate: Option<String>,
    pub frequency: Option<String>,
    pub image_url: Option<String>,
}

impl TryFrom<CardRow> for Card {
    type Error = ChorepackError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(Card {
            id: Some(row.id),
            title: row.title,
            rarity: row.rarity.parse()?,
            flavour_text: row.flavour_text.unwrap_or_default(),
            time_estimate: row.time_estimate,
            frequency: row.frequency,
            image_url: row.image_url,
        })
    }
}
