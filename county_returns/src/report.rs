use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::competitiveness::{competitiveness_scale, CompetitivenessScale};
use crate::config::PipelineConfig;
use crate::summary::{count_results, summarize, ResultsByYear};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub state: String,
    pub state_fips: String,
    pub geography_level: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationSystem {
    pub competitiveness_scale: CompetitivenessScale,
    pub office_types: Vec<String>,
    pub enhanced_features: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_years: usize,
    pub total_contests: usize,
    pub total_county_results: usize,
    pub years_covered: Vec<String>,
}

/// The consolidated document read by the map layer.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub focus: String,
    pub jurisdiction: Jurisdiction,
    /// Calendar date of the run, `YYYY-MM-DD`.
    pub processed_date: String,
    pub categorization_system: CategorizationSystem,
    pub summary: RunSummary,
    pub results_by_year: ResultsByYear,
}

impl Report {
    /// Summarizes the aggregation and wraps the results with the static metadata.
    pub fn build(config: &PipelineConfig, agg: &Aggregation, processed_date: &str) -> Report {
        let results_by_year = summarize(&agg.tally, config);
        let meta = &config.metadata;
        Report {
            focus: meta.focus.clone(),
            jurisdiction: Jurisdiction {
                state: meta.state.clone(),
                state_fips: config.state_fips.clone(),
                geography_level: meta.geography_level.clone(),
            },
            processed_date: processed_date.to_string(),
            categorization_system: CategorizationSystem {
                competitiveness_scale: competitiveness_scale(),
                office_types: meta.office_types.clone(),
                enhanced_features: meta.enhanced_features.clone(),
            },
            summary: RunSummary {
                total_years: agg.years_seen.len(),
                total_contests: agg.contests_seen.len(),
                total_county_results: count_results(&results_by_year),
                years_covered: agg.years_seen.iter().cloned().collect(),
            },
            results_by_year,
        }
    }
}
