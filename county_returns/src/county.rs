//! Resolution of the county labels found in the returns files to the names
//! used by the geographic reference.
//!
//! The source files are not consistent across years: some spell out the
//! `County` or `City` suffix, some do not. A few jurisdictions also exist both
//! as a county and as an independent city sharing the same short name
//! (`Baltimore County` and `Baltimore city`), so the lookup keeps every full
//! name that shares a short name and picks one with the suffix heuristics below.

use log::debug;
use std::collections::HashMap;

use crate::config::{CountyRecord, PipelineConfig};

/// Lowercases, collapses the whitespace and straightens the apostrophes.
pub fn normalize_name(s: &str) -> String {
    straighten_apostrophes(s)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

fn straighten_apostrophes(s: &str) -> String {
    s.replace(['`', '\u{2019}'], "'")
}

fn strip_suffix_word(nraw: &str) -> &str {
    if let Some(base) = nraw.strip_suffix(" county") {
        base.trim()
    } else if let Some(base) = nraw.strip_suffix(" city") {
        base.trim()
    } else {
        nraw
    }
}

fn find_containing<'a>(candidates: &'a [String], pattern: &str) -> Option<&'a String> {
    candidates
        .iter()
        .find(|x| x.to_lowercase().contains(pattern))
}

/// Normalized short name -> full names sharing it, in reference order.
///
/// Read-only once built.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CountyLookup {
    by_name: HashMap<String, Vec<String>>,
    independent_cities: Vec<String>,
}

impl CountyLookup {
    /// Builds the lookup from the reference records, keeping only the configured state.
    pub fn build<I>(records: I, config: &PipelineConfig) -> CountyLookup
    where
        I: IntoIterator<Item = CountyRecord>,
    {
        let mut by_name: HashMap<String, Vec<String>> = HashMap::new();
        for rec in records {
            if rec.state != config.state_fips {
                continue;
            }
            by_name
                .entry(normalize_name(&rec.name))
                .or_default()
                .push(rec.full_name);
        }
        debug!(
            "CountyLookup::build: {} short names for state {}",
            by_name.len(),
            config.state_fips
        );
        CountyLookup {
            by_name,
            independent_cities: config.independent_cities.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// True if the name is one of the full names of the reference.
    pub fn is_canonical(&self, full_name: &str) -> bool {
        self.by_name
            .values()
            .any(|group| group.iter().any(|x| x == full_name))
    }

    /// The full names registered under a short name.
    pub fn candidates(&self, name: &str) -> &[String] {
        self.by_name
            .get(&normalize_name(name))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolves a raw county label to exactly one canonical name.
    ///
    /// Labels that do not match anything get a synthesized name: the label
    /// itself if it already ends with `county` or `city`, otherwise the label
    /// followed by ` County`.
    pub fn resolve(&self, county: &str) -> String {
        let raw = straighten_apostrophes(county.trim());
        let nraw = normalize_name(&raw);

        // The raw data does not distinguish the independent city from the
        // county of the same name unless the label says "city".
        for city in self.independent_cities.iter() {
            if nraw == format!("{} city", city) {
                if let Some(x) = self
                    .by_name
                    .get(city)
                    .and_then(|group| find_containing(group, " city"))
                {
                    return x.clone();
                }
            }
        }

        let base = strip_suffix_word(&nraw);
        match self.by_name.get(base).map(|v| v.as_slice()) {
            Some([single]) => single.clone(),
            Some(candidates) if !candidates.is_empty() => {
                if nraw.contains("city") {
                    if let Some(x) = find_containing(candidates, " city") {
                        return x.clone();
                    }
                }
                find_containing(candidates, " county")
                    .unwrap_or(&candidates[0])
                    .clone()
            }
            _ => {
                let lower = raw.to_lowercase();
                debug!("resolve: no reference entry for {:?}", raw);
                if lower.ends_with(" county") || lower.ends_with(" city") {
                    raw
                } else {
                    format!("{} County", raw)
                }
            }
        }
    }
}
