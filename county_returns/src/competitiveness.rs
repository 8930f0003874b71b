//! The competitiveness scale: 7 bands per major party plus a neutral tossup band.
//!
//! The colors and the band boundaries are consumed as-is by the map layer.
//! All the lower bounds are inclusive and apply to the margin percentage
//! already rounded to 2 decimals.

use serde::{Deserialize, Serialize};

/// The outcome of the two-party race in one county.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "DEM")]
    Dem,
    #[serde(rename = "REP")]
    Rep,
    #[serde(rename = "TIE")]
    Tie,
}

impl Winner {
    pub fn from_votes(dem_votes: u64, rep_votes: u64) -> Winner {
        match dem_votes.cmp(&rep_votes) {
            std::cmp::Ordering::Greater => Winner::Dem,
            std::cmp::Ordering::Less => Winner::Rep,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Party {
    Democratic,
    Republican,
}

impl Party {
    fn name(&self) -> &'static str {
        match self {
            Party::Democratic => "Democratic",
            Party::Republican => "Republican",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Party::Democratic => "D",
            Party::Republican => "R",
        }
    }
}

struct Band {
    lower: f64,
    category: &'static str,
    code: &'static str,
    /// Range as written in the per-county label.
    label_range: &'static str,
    /// Range as written in the legend, after the party prefix.
    legend_range: &'static str,
    rep_color: &'static str,
    dem_color: &'static str,
}

impl Band {
    fn color(&self, party: Party) -> &'static str {
        match party {
            Party::Democratic => self.dem_color,
            Party::Republican => self.rep_color,
        }
    }
}

/// Margins strictly below this value are tossups.
pub const TOSSUP_THRESHOLD: f64 = 0.5;

const TOSSUP_COLOR: &str = "#f7f7f7";
const TOSSUP_RANGE: &str = "<0.50%";

// Evaluated top-down: the first band whose lower bound is reached wins.
static BANDS: [Band; 7] = [
    Band {
        lower: 40.0,
        category: "Annihilation",
        code: "ANNIHILATION",
        label_range: ">=40.00%",
        legend_range: "40%+",
        rep_color: "#67000d",
        dem_color: "#08306b",
    },
    Band {
        lower: 30.0,
        category: "Dominant",
        code: "DOMINANT",
        label_range: "30.00-39.99%",
        legend_range: "30.00-39.99%",
        rep_color: "#a50f15",
        dem_color: "#08519c",
    },
    Band {
        lower: 20.0,
        category: "Stronghold",
        code: "STRONGHOLD",
        label_range: "20.00-29.99%",
        legend_range: "20.00-29.99%",
        rep_color: "#cb181d",
        dem_color: "#3182bd",
    },
    Band {
        lower: 10.0,
        category: "Safe",
        code: "SAFE",
        label_range: "10.00-19.99%",
        legend_range: "10.00-19.99%",
        rep_color: "#ef3b2c",
        dem_color: "#6baed6",
    },
    Band {
        lower: 5.5,
        category: "Likely",
        code: "LIKELY",
        label_range: "5.50-9.99%",
        legend_range: "5.50-9.99%",
        rep_color: "#fb6a4a",
        dem_color: "#9ecae1",
    },
    Band {
        lower: 1.0,
        category: "Lean",
        code: "LEAN",
        label_range: "1.00-5.49%",
        legend_range: "1.00-5.49%",
        rep_color: "#fcae91",
        dem_color: "#c6dbef",
    },
    Band {
        lower: TOSSUP_THRESHOLD,
        category: "Tilt",
        code: "TILT",
        label_range: "0.50-0.99%",
        legend_range: "0.50-0.99%",
        rep_color: "#fee8c8",
        dem_color: "#e1f5fe",
    },
];

/// The rating attached to each county result.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CompetitivenessRating {
    pub category: String,
    /// `Democratic`, `Republican` or `Tossup`.
    pub party: String,
    pub code: String,
    pub color: String,
    pub label: String,
}

impl CompetitivenessRating {
    fn tossup() -> CompetitivenessRating {
        CompetitivenessRating {
            category: "Tossup".to_string(),
            party: "Tossup".to_string(),
            code: "TOSSUP".to_string(),
            color: TOSSUP_COLOR.to_string(),
            label: format!("Tossup ({})", TOSSUP_RANGE),
        }
    }
}

/// Classifies a (rounded) margin percentage.
///
/// Ties and margins under 0.50% are tossups whoever is ahead.
pub fn competitiveness(margin_pct: f64, winner: Winner) -> CompetitivenessRating {
    let party = match winner {
        Winner::Dem => Party::Democratic,
        Winner::Rep => Party::Republican,
        Winner::Tie => return CompetitivenessRating::tossup(),
    };
    if margin_pct < TOSSUP_THRESHOLD {
        return CompetitivenessRating::tossup();
    }
    let band = BANDS
        .iter()
        .find(|b| margin_pct >= b.lower)
        .unwrap_or(&BANDS[BANDS.len() - 1]);
    CompetitivenessRating {
        category: band.category.to_string(),
        party: party.name().to_string(),
        code: format!("{}_{}", party.prefix(), band.code),
        color: band.color(party).to_string(),
        label: format!("{} {} ({})", band.category, party.name(), band.label_range),
    }
}

/// One line of the legend.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: String,
    pub range: String,
    pub color: String,
}

/// The legend of the whole scale, in display order: strongest Republican first,
/// then the tossup, then the Democratic bands from the weakest to the strongest.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CompetitivenessScale {
    #[serde(rename = "Republican")]
    pub republican: Vec<LegendEntry>,
    #[serde(rename = "Tossup")]
    pub tossup: Vec<LegendEntry>,
    #[serde(rename = "Democratic")]
    pub democratic: Vec<LegendEntry>,
}

impl CompetitivenessScale {
    pub fn len(&self) -> usize {
        self.republican.len() + self.tossup.len() + self.democratic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn legend_entry(band: &Band, party: Party) -> LegendEntry {
    LegendEntry {
        category: band.category.to_string(),
        range: format!("{}+{}", party.prefix(), band.legend_range),
        color: band.color(party).to_string(),
    }
}

/// Builds the legend from the same table that drives `competitiveness`.
pub fn competitiveness_scale() -> CompetitivenessScale {
    CompetitivenessScale {
        republican: BANDS
            .iter()
            .map(|b| legend_entry(b, Party::Republican))
            .collect(),
        tossup: vec![LegendEntry {
            category: "Tossup".to_string(),
            range: TOSSUP_RANGE.to_string(),
            color: TOSSUP_COLOR.to_string(),
        }],
        democratic: BANDS
            .iter()
            .rev()
            .map(|b| legend_entry(b, Party::Democratic))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(margin_pct: f64, winner: Winner) -> String {
        competitiveness(margin_pct, winner).code
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        let cases = [
            (0.0, "TOSSUP"),
            (0.49, "TOSSUP"),
            (0.5, "D_TILT"),
            (0.99, "D_TILT"),
            (1.0, "D_LEAN"),
            (5.49, "D_LEAN"),
            (5.5, "D_LIKELY"),
            (9.99, "D_LIKELY"),
            (10.0, "D_SAFE"),
            (19.99, "D_SAFE"),
            (20.0, "D_STRONGHOLD"),
            (29.99, "D_STRONGHOLD"),
            (30.0, "D_DOMINANT"),
            (39.99, "D_DOMINANT"),
            (40.0, "D_ANNIHILATION"),
            (100.0, "D_ANNIHILATION"),
        ];
        for (margin, expected) in cases {
            assert_eq!(code(margin, Winner::Dem), expected, "margin {}", margin);
            assert_eq!(
                code(margin, Winner::Rep),
                expected.replace("D_", "R_"),
                "margin {}",
                margin
            );
        }
    }

    #[test]
    fn ties_are_always_tossups() {
        for margin in [0.0, 0.5, 3.0, 12.5, 45.0, 100.0] {
            let r = competitiveness(margin, Winner::Tie);
            assert_eq!(r, CompetitivenessRating::tossup());
        }
    }

    #[test]
    fn tossup_is_party_neutral() {
        let r = competitiveness(0.2, Winner::Rep);
        assert_eq!(r.category, "Tossup");
        assert_eq!(r.party, "Tossup");
        assert_eq!(r.color, "#f7f7f7");
        assert_eq!(r.label, "Tossup (<0.50%)");
    }

    #[test]
    fn labels_and_colors() {
        let r = competitiveness(20.0, Winner::Dem);
        assert_eq!(r.category, "Stronghold");
        assert_eq!(r.party, "Democratic");
        assert_eq!(r.code, "D_STRONGHOLD");
        assert_eq!(r.color, "#3182bd");
        assert_eq!(r.label, "Stronghold Democratic (20.00-29.99%)");

        let r = competitiveness(55.3, Winner::Rep);
        assert_eq!(r.color, "#67000d");
        assert_eq!(r.label, "Annihilation Republican (>=40.00%)");

        let r = competitiveness(0.75, Winner::Rep);
        assert_eq!(r.color, "#fee8c8");
        assert_eq!(r.label, "Tilt Republican (0.50-0.99%)");

        let r = competitiveness(0.75, Winner::Dem);
        assert_eq!(r.color, "#e1f5fe");
    }

    #[test]
    fn legend_matches_the_classifier() {
        let scale = competitiveness_scale();
        assert_eq!(scale.len(), 15);
        assert_eq!(scale.republican.len(), 7);
        assert_eq!(scale.democratic.len(), 7);

        assert_eq!(scale.republican[0].category, "Annihilation");
        assert_eq!(scale.republican[0].range, "R+40%+");
        assert_eq!(scale.republican[6].range, "R+0.50-0.99%");
        assert_eq!(scale.tossup[0].range, "<0.50%");
        assert_eq!(scale.democratic[0].category, "Tilt");
        assert_eq!(scale.democratic[0].color, "#e1f5fe");
        assert_eq!(scale.democratic[6].range, "D+40%+");

        for (entry, margin) in scale.republican.iter().zip(BANDS.iter().map(|b| b.lower)) {
            let r = competitiveness(margin, Winner::Rep);
            assert_eq!(entry.category, r.category);
            assert_eq!(entry.color, r.color);
        }
    }

    #[test]
    fn legend_serializes_in_display_order() {
        let js = serde_json::to_string(&competitiveness_scale()).unwrap();
        let r = js.find("\"Republican\"").unwrap();
        let t = js.find("\"Tossup\"").unwrap();
        let d = js.find("\"Democratic\"").unwrap();
        assert!(r < t && t < d);
    }

    #[test]
    fn winner_from_votes() {
        assert_eq!(Winner::from_votes(600, 400), Winner::Dem);
        assert_eq!(Winner::from_votes(400, 600), Winner::Rep);
        assert_eq!(Winner::from_votes(500, 500), Winner::Tie);
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"TIE\"");
    }
}
