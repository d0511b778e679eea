//! Difficulty tier classification
//!
//! A difficulty value is either a named tier or a numeric score. Named
//! tiers resolve directly to their display token. Numeric scores map
//! through one ordered table of ascending upper bounds: the first bound
//! the score is strictly below wins, and anything at or above the highest
//! bound takes the top tier. Text that is neither named nor numeric echoes
//! back unchanged: degraded display, not an error.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display tokens for the sixteen known tiers (custom emoji markup).
pub mod token {
    pub const EFFORTLESS: &str = "<:effortless:1470940267782869188>";
    pub const EASY: &str = "<:easy:1464320027963424912>";
    pub const MEDIUM: &str = "<:medium:1464320095034802289>";
    pub const HARD: &str = "<:hard:1464320167571095766>";
    pub const HARDER: &str = "<:harder:1464320225075007632>";
    pub const INSANE: &str = "<:insane:1464320293622386812>";
    pub const EXPERT: &str = "<:expert:1464320350237102337>";
    pub const EXTREME: &str = "<:extreme:1464320430658551838>";
    pub const MADNESS: &str = "<:madness:1464320499600462119>";
    pub const MASTER: &str = "<:master:1464320549600755937>";
    pub const GRANDMASTER: &str = "<:grandmaster:1464320611038924874>";
    pub const GM1: &str = "<:gm1:1464320687953940543>";
    pub const GM2: &str = "<:gm2:1464320747613978748>";
    pub const TAS: &str = "<:tas:1464320806162268222>";
    pub const TAS1: &str = "<:tas1:1464320856275550414>";
    pub const TAS2: &str = "<:tas2:1464320904061518007>";
}

/// Named tier lookup, keyed by the normalized (trimmed, lowercased) name.
static NAMED_TIERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("effortless", token::EFFORTLESS),
        ("easy", token::EASY),
        ("medium", token::MEDIUM),
        ("hard", token::HARD),
        ("harder", token::HARDER),
        ("insane", token::INSANE),
        ("expert", token::EXPERT),
        ("extreme", token::EXTREME),
        ("madness", token::MADNESS),
        ("master", token::MASTER),
        ("grandmaster", token::GRANDMASTER),
        ("gm1", token::GM1),
        ("gm2", token::GM2),
        ("tas", token::TAS),
        ("tas1", token::TAS1),
        ("tas2", token::TAS2),
    ])
});

/// Ordered numeric classification bands.
///
/// There is exactly one of these tables in the codebase; every call site
/// that classifies a numeric difficulty goes through it.
#[derive(Debug, Clone)]
pub struct TierTable {
    /// Ascending (upper bound, token) pairs; strict `<` comparison
    bands: Vec<(f64, String)>,
    /// Token for scores at or above the highest bound
    top: String,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            bands: vec![
                (1.0, token::EFFORTLESS.to_string()),
                (2.0, token::EASY.to_string()),
                (3.0, token::MEDIUM.to_string()),
                (4.0, token::HARD.to_string()),
                (5.0, token::HARDER.to_string()),
                (6.0, token::INSANE.to_string()),
                (7.0, token::EXPERT.to_string()),
                (8.0, token::EXTREME.to_string()),
                (9.0, token::MADNESS.to_string()),
                (10.0, token::MASTER.to_string()),
                (11.0, token::GRANDMASTER.to_string()),
                (12.0, token::GM1.to_string()),
                (13.0, token::GM2.to_string()),
                (14.0, token::TAS.to_string()),
                (15.0, token::TAS1.to_string()),
            ],
            top: token::TAS2.to_string(),
        }
    }
}

impl TierTable {
    /// Build a table from explicit bands. Bounds must already be ascending.
    pub fn new(bands: Vec<(f64, String)>, top: String) -> Self {
        Self { bands, top }
    }

    /// Classify a raw difficulty value into a display tier token.
    ///
    /// Unparseable text comes back exactly as given.
    pub fn classify(&self, difficulty: &str) -> String {
        let normalized = difficulty.trim().to_lowercase();

        if let Some(tok) = NAMED_TIERS.get(normalized.as_str()) {
            return (*tok).to_string();
        }

        match normalized.parse::<f64>() {
            Ok(score) => self.band_for(score).to_string(),
            Err(_) => difficulty.to_string(),
        }
    }

    /// First band the score is strictly below; top tier otherwise.
    fn band_for(&self, score: f64) -> &str {
        for (bound, tok) in &self.bands {
            if score < *bound {
                return tok;
            }
        }
        &self.top
    }
}
