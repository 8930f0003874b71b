use log::debug;
use std::collections::BTreeSet;

use crate::config::{PipelineConfig, RawRecord};
use crate::county::CountyLookup;
use crate::normalize::{normalize_contest, normalize_party, strip_running_mate};
use crate::tally::{Tally, TallyKey};

/// The year embedded at the start of a returns file name (`2020__md__general__county.csv`).
pub fn year_from_file_name(file_name: &str) -> Option<String> {
    let year = file_name.get(..4)?;
    if year.chars().all(|c| c.is_ascii_digit()) {
        Some(year.to_string())
    } else {
        None
    }
}

/// Reads a vote count. Anything that is not a non-negative integer counts as zero.
pub fn parse_votes(votes: &str) -> u64 {
    votes.trim().parse::<u64>().unwrap_or(0)
}

/// The accumulated counters and what was seen while reading the files.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Aggregation {
    pub tally: Tally,
    pub years_seen: BTreeSet<String>,
    pub contests_seen: BTreeSet<String>,
    pub rows_read: u64,
    pub rows_skipped: u64,
}

/// Feeds the rows of the returns files into a `Tally`.
pub struct Aggregator<'a> {
    config: &'a PipelineConfig,
    lookup: &'a CountyLookup,
    agg: Aggregation,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a PipelineConfig, lookup: &'a CountyLookup) -> Aggregator<'a> {
        Aggregator {
            config,
            lookup,
            agg: Aggregation::default(),
        }
    }

    /// Registers the year of a file about to be read, even if none of its rows is kept.
    pub fn begin_file(&mut self, year: &str) {
        self.agg.years_seen.insert(year.to_string());
    }

    /// Adds one row. Returns false if the office is not tracked and the row was skipped.
    pub fn add_record(&mut self, year: &str, record: &RawRecord) -> bool {
        self.agg.rows_read += 1;
        let contest = match normalize_contest(&record.office, self.config) {
            Some(c) => c,
            None => {
                self.agg.rows_skipped += 1;
                return false;
            }
        };

        let county = self.lookup.resolve(&record.county);
        let party = normalize_party(&record.party, self.config);
        let candidate = match strip_running_mate(&record.candidate) {
            c if c.is_empty() => self.config.unknown_candidate.clone(),
            c => c,
        };
        let votes = parse_votes(&record.votes);

        self.agg.contests_seen.insert(contest.clone());
        self.agg.tally.add(
            TallyKey {
                year: year.to_string(),
                contest,
                county,
                party,
                candidate,
            },
            votes,
        );
        true
    }

    pub fn finish(self) -> Aggregation {
        debug!(
            "Aggregator::finish: {} rows read, {} skipped, {} counters",
            self.agg.rows_read,
            self.agg.rows_skipped,
            self.agg.tally.len()
        );
        self.agg
    }
}
