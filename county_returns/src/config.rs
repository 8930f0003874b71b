// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a county returns file.
///
/// All the fields are kept as text: the coercion to numbers and canonical
/// names happens during aggregation. Missing columns are empty.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawRecord {
    pub office: String,
    pub county: String,
    pub party: String,
    pub candidate: String,
    pub votes: String,
}

/// A row of the geographic reference (the attribute table of the county shapefile).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountyRecord {
    /// The state identifier (FIPS code).
    pub state: String,
    /// The short name, for example `Baltimore`.
    pub name: String,
    /// The full descriptive name, for example `Baltimore city` or `Baltimore County`.
    pub full_name: String,
}

// ********* Configuration **********

/// The level of government a contest belongs to.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ContestType {
    Federal,
    State,
}

/// A statewide contest that is kept by the contest filter.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContestSpec {
    pub name: String,
    pub contest_type: ContestType,
    /// Display order of the office, 1 being the most prominent.
    pub office_rank: u32,
}

/// Static description of the jurisdiction, copied as-is into the report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub focus: String,
    pub state: String,
    pub geography_level: String,
    pub office_types: Vec<String>,
    pub enhanced_features: Vec<String>,
}

/// Everything the pipeline needs to know about the state being processed.
///
/// It is built once and only borrowed afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PipelineConfig {
    pub contests: Vec<ContestSpec>,
    /// Any office starting with one of these prefixes collapses to the prefix.
    pub contest_prefixes: Vec<String>,
    /// Lowercase party label -> party code.
    pub party_synonyms: BTreeMap<String, String>,
    pub default_party: String,
    pub unknown_candidate: String,
    pub state_fips: String,
    /// Base names (lowercase) that exist both as a county and as an independent city.
    pub independent_cities: Vec<String>,
    pub metadata: ReportMetadata,
}

pub const DEM: &str = "DEM";
pub const REP: &str = "REP";

impl PipelineConfig {
    /// The settings for the Maryland general elections.
    pub fn maryland() -> PipelineConfig {
        let contests = vec![
            ("President", ContestType::Federal),
            ("Governor", ContestType::State),
            ("U.S. Senator", ContestType::Federal),
            ("Attorney General", ContestType::State),
            ("Comptroller", ContestType::State),
        ]
        .into_iter()
        .enumerate()
        .map(|(idx, (name, contest_type))| ContestSpec {
            name: name.to_string(),
            contest_type,
            office_rank: (idx + 1) as u32,
        })
        .collect();

        let party_synonyms = [
            ("democratic", DEM),
            ("republican", REP),
            ("libertarian", "LIB"),
            ("independent", "IND"),
            ("reform", "REF"),
            ("green", "GRN"),
            ("alliance", "ALL"),
            ("taxpayers", "TAX"),
            ("natural-law", "NAT"),
            ("other", "OTH"),
            ("both parties", "BTH"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        PipelineConfig {
            contests,
            contest_prefixes: vec!["Comptroller".to_string()],
            party_synonyms,
            default_party: "OTH".to_string(),
            unknown_candidate: "Unknown".to_string(),
            state_fips: "24".to_string(),
            independent_cities: vec!["baltimore".to_string()],
            metadata: ReportMetadata {
                focus: "Maryland county-level political realignment patterns".to_string(),
                state: "Maryland".to_string(),
                geography_level: "County and county-equivalent".to_string(),
                office_types: ["Federal", "State", "Judicial", "Other"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                enhanced_features: [
                    "Maryland county-level competitiveness categorization for each contest",
                    "Maryland-specific contest type classification (Federal/State/Judicial)",
                    "Office ranking system tuned for statewide Maryland analysis",
                    "Color coding aligned to Maryland county political geography visualization",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
        }
    }

    pub fn contest(&self, name: &str) -> Option<&ContestSpec> {
        self.contests.iter().find(|c| c.name == name)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig::maryland()
    }
}
