use crate::returns::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIRECTORY: &str = "Data/openelections";
pub const DEFAULT_FILE_SUFFIX: &str = "__md__general__county.csv";
pub const DEFAULT_COUNTY_REFERENCE: &str = "Data/tl_2020_24_county20/tl_2020_24_county20.shp";
pub const DEFAULT_OUTPUT_PATH: &str = "Data/md_county_aggregated_results_1986_2024.json";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContestConfig {
    pub name: String,
    #[serde(rename = "contestType")]
    pub _contest_type: String,
    #[serde(rename = "officeRank")]
    pub office_rank: Option<u32>,
}

impl ContestConfig {
    pub fn contest_type(&self) -> ReturnsResult<ContestType> {
        match self._contest_type.as_str() {
            "Federal" => Ok(ContestType::Federal),
            "State" => Ok(ContestType::State),
            _ => whatever!(
                "unknown contest type {:?} for contest {:?}",
                self._contest_type,
                self.name
            ),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub focus: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "geographyLevel")]
    pub geography_level: Option<String>,
    #[serde(rename = "officeTypes")]
    pub office_types: Option<Vec<String>>,
    #[serde(rename = "enhancedFeatures")]
    pub enhanced_features: Option<Vec<String>>,
}

/// The content of the `--config` file. Every entry falls back to the Maryland settings.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnsConfig {
    #[serde(rename = "inputDirectory")]
    pub input_directory: Option<String>,
    #[serde(rename = "fileSuffix")]
    pub file_suffix: Option<String>,
    #[serde(rename = "countyReference")]
    pub county_reference: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "stateFips")]
    pub state_fips: Option<String>,
    #[serde(rename = "stateField")]
    pub state_field: Option<String>,
    #[serde(rename = "nameField")]
    pub name_field: Option<String>,
    #[serde(rename = "fullNameField")]
    pub full_name_field: Option<String>,
    pub contests: Option<Vec<ContestConfig>>,
    #[serde(rename = "contestPrefixes")]
    pub contest_prefixes: Option<Vec<String>>,
    #[serde(rename = "partySynonyms")]
    pub party_synonyms: Option<BTreeMap<String, String>>,
    #[serde(rename = "defaultParty")]
    pub default_party: Option<String>,
    #[serde(rename = "unknownCandidate")]
    pub unknown_candidate: Option<String>,
    #[serde(rename = "independentCities")]
    pub independent_cities: Option<Vec<String>>,
    pub metadata: Option<MetadataConfig>,
}

/// The three attribute names read from the county reference.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReferenceFields {
    pub state: String,
    pub name: String,
    pub full_name: String,
}

/// File locations of one run, after applying the command line overrides.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_dir: PathBuf,
    pub file_suffix: String,
    pub county_reference: PathBuf,
    pub output_path: PathBuf,
    pub fields: ReferenceFields,
}

fn pick(arg: &Option<String>, conf: &Option<String>, default: &str) -> String {
    arg.clone()
        .or_else(|| conf.clone())
        .unwrap_or_else(|| default.to_string())
}

impl ReturnsConfig {
    pub fn pipeline_config(&self) -> ReturnsResult<PipelineConfig> {
        let mut res = PipelineConfig::maryland();

        if let Some(contests) = &self.contests {
            let mut specs: Vec<ContestSpec> = Vec::new();
            for (idx, c) in contests.iter().enumerate() {
                specs.push(ContestSpec {
                    name: c.name.trim().to_string(),
                    contest_type: c.contest_type()?,
                    office_rank: c.office_rank.unwrap_or((idx + 1) as u32),
                });
            }
            res.contests = specs;
        }
        if let Some(x) = &self.contest_prefixes {
            res.contest_prefixes = x.clone();
        }
        if let Some(x) = &self.party_synonyms {
            res.party_synonyms = x
                .iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v.clone()))
                .collect();
        }
        if let Some(x) = &self.default_party {
            res.default_party = x.clone();
        }
        if let Some(x) = &self.unknown_candidate {
            res.unknown_candidate = x.clone();
        }
        if let Some(x) = &self.state_fips {
            res.state_fips = x.clone();
        }
        if let Some(x) = &self.independent_cities {
            res.independent_cities = x.iter().map(|c| normalize_name(c)).collect();
        }
        if let Some(m) = &self.metadata {
            let meta = &mut res.metadata;
            if let Some(x) = &m.focus {
                meta.focus = x.clone();
            }
            if let Some(x) = &m.state {
                meta.state = x.clone();
            }
            if let Some(x) = &m.geography_level {
                meta.geography_level = x.clone();
            }
            if let Some(x) = &m.office_types {
                meta.office_types = x.clone();
            }
            if let Some(x) = &m.enhanced_features {
                meta.enhanced_features = x.clone();
            }
        }
        Ok(res)
    }

    /// The paths of the run. The command line takes precedence over the file.
    pub fn run_settings(&self, args: &Args) -> RunSettings {
        RunSettings {
            input_dir: PathBuf::from(pick(
                &args.input,
                &self.input_directory,
                DEFAULT_INPUT_DIRECTORY,
            )),
            file_suffix: pick(&None, &self.file_suffix, DEFAULT_FILE_SUFFIX),
            county_reference: PathBuf::from(pick(
                &args.counties,
                &self.county_reference,
                DEFAULT_COUNTY_REFERENCE,
            )),
            output_path: PathBuf::from(pick(&args.out, &self.output_path, DEFAULT_OUTPUT_PATH)),
            fields: ReferenceFields {
                state: pick(&None, &self.state_field, "STATEFP20"),
                name: pick(&None, &self.name_field, "NAME20"),
                full_name: pick(&None, &self.full_name_field, "NAMELSAD20"),
            },
        }
    }
}

pub fn read_config(path: &str) -> ReturnsResult<ReturnsConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}
