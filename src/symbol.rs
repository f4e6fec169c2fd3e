//! Stitch symbol vocabulary.
//!
//! [`StitchKind`] enumerates the chart symbols a pattern can contain and
//! carries the per-symbol metadata the grid store needs: the cell width of
//! multi-cell decrease symbols and whether a symbol supports mirroring.
//!
//! Kinds serialize as their short chart ids (`"chain"`, `"sc"`, `"2dctog"`,
//! …), which are also the ids used in interchange documents and the pattern
//! library.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A crochet stitch symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StitchKind {
    /// Chain stitch, the foundation stitch.
    #[serde(rename = "chain")]
    Chain,
    /// Single crochet.
    #[serde(rename = "sc")]
    Single,
    /// Double crochet.
    #[serde(rename = "dc")]
    Double,
    /// Treble crochet.
    #[serde(rename = "tr")]
    Treble,
    /// Slip stitch.
    #[serde(rename = "sl")]
    Slip,
    /// Yarn over.
    #[serde(rename = "yo")]
    YarnOver,
    /// Two double crochet worked together (decrease, spans 2 cells).
    #[serde(rename = "2dctog")]
    Dc2Tog,
    /// Three double crochet worked together (decrease, spans 3 cells).
    #[serde(rename = "3dctog")]
    Dc3Tog,
}

impl StitchKind {
    /// Every known symbol, in chart-palette order.
    pub const ALL: [StitchKind; 8] = [
        StitchKind::Chain,
        StitchKind::Single,
        StitchKind::Double,
        StitchKind::Treble,
        StitchKind::Slip,
        StitchKind::YarnOver,
        StitchKind::Dc2Tog,
        StitchKind::Dc3Tog,
    ];

    /// The short chart id, as used in serialized documents.
    pub fn id(&self) -> &'static str {
        match self {
            StitchKind::Chain => "chain",
            StitchKind::Single => "sc",
            StitchKind::Double => "dc",
            StitchKind::Treble => "tr",
            StitchKind::Slip => "sl",
            StitchKind::YarnOver => "yo",
            StitchKind::Dc2Tog => "2dctog",
            StitchKind::Dc3Tog => "3dctog",
        }
    }

    /// Number of grid cells the symbol spans.
    pub fn width(&self) -> i32 {
        match self {
            StitchKind::Dc2Tog => 2,
            StitchKind::Dc3Tog => 3,
            _ => 1,
        }
    }

    /// True for decrease symbols, the only kinds where mirroring has effect.
    pub fn is_decrease(&self) -> bool {
        matches!(self, StitchKind::Dc2Tog | StitchKind::Dc3Tog)
    }

    /// Full human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            StitchKind::Chain => "Chain Stitch",
            StitchKind::Single => "Single Crochet",
            StitchKind::Double => "Double Crochet",
            StitchKind::Treble => "Treble Crochet",
            StitchKind::Slip => "Slip Stitch",
            StitchKind::YarnOver => "Yarn Over",
            StitchKind::Dc2Tog => "2 Double Crochet Together",
            StitchKind::Dc3Tog => "3 Double Crochet Together",
        }
    }

    /// Standard written-pattern abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StitchKind::Chain => "ch",
            StitchKind::Single => "sc",
            StitchKind::Double => "dc",
            StitchKind::Treble => "tr",
            StitchKind::Slip => "sl st",
            StitchKind::YarnOver => "yo",
            StitchKind::Dc2Tog => "2dc tog",
            StitchKind::Dc3Tog => "3dc tog",
        }
    }
}

impl fmt::Display for StitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StitchKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StitchKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown stitch symbol: {s:?}"))
    }
}
