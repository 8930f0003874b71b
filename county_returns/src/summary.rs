use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::competitiveness::{competitiveness, CompetitivenessRating, Winner};
use crate::config::{ContestSpec, ContestType, PipelineConfig, DEM, REP};
use crate::tally::{Bucket, Tally, TallyKey};

/// The result of one contest in one county.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContestSummary {
    pub county: String,
    pub contest: String,
    pub contest_type: ContestType,
    pub office_rank: u32,
    pub year: String,
    /// Leading Democratic candidate, empty if the party did not run.
    pub dem_candidate: String,
    pub rep_candidate: String,
    pub dem_votes: u64,
    pub rep_votes: u64,
    pub dem_pct: f64,
    pub rep_pct: f64,
    pub other_votes: u64,
    pub total_votes: u64,
    pub two_party_total: u64,
    pub margin: u64,
    /// Always formatted with 2 decimals, for example `"20.00"`.
    pub margin_pct: String,
    pub winner: Winner,
    pub competitiveness: CompetitivenessRating,
    pub all_parties: BTreeMap<String, u64>,
}

/// year -> contest -> county -> summary
pub type ResultsByYear = BTreeMap<String, BTreeMap<String, BTreeMap<String, ContestSummary>>>;

/// Rounds to 2 decimal places, half to even on the exact binary value.
///
/// `0.125` gives `0.12` and `49.875` gives `49.88`.
pub fn round2(x: f64) -> f64 {
    format!("{:.2}", x).parse::<f64>().unwrap_or(x)
}

/// `part` as a percentage of `total`, rounded to 2 decimals. Zero when there are no votes.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2((part as f64 / total as f64) * 100.0)
    }
}

// The candidate with the most votes in the party. The first one seen wins a tie.
fn leading_candidate(entries: &[&(TallyKey, u64)], party: &str) -> String {
    let mut best: Option<&(TallyKey, u64)> = None;
    for entry in entries.iter().copied().filter(|e| e.0.party == party) {
        match best {
            Some(b) if b.1 >= entry.1 => {}
            _ => best = Some(entry),
        }
    }
    best.map(|b| b.0.candidate.clone()).unwrap_or_default()
}

/// Derives the statistics of one (year, contest, county) bucket.
pub fn summarize_bucket(bucket: &Bucket, spec: &ContestSpec) -> ContestSummary {
    let mut all_parties: BTreeMap<String, u64> = BTreeMap::new();
    for (key, votes) in bucket.entries.iter().map(|e| (&e.0, e.1)) {
        let count = all_parties.entry(key.party.clone()).or_insert(0);
        *count = count.saturating_add(votes);
    }

    // Sums saturate: counts are coerced from untrusted text.
    let dem_votes = all_parties.get(DEM).cloned().unwrap_or(0);
    let rep_votes = all_parties.get(REP).cloned().unwrap_or(0);
    let total_votes = all_parties
        .values()
        .fold(0u64, |acc, v| acc.saturating_add(*v));
    let two_party_total = dem_votes.saturating_add(rep_votes);
    let other_votes = total_votes.saturating_sub(two_party_total);

    let margin = dem_votes.abs_diff(rep_votes);
    let margin_pct = percentage(margin, total_votes);
    let winner = Winner::from_votes(dem_votes, rep_votes);

    ContestSummary {
        county: bucket.key.county.clone(),
        contest: bucket.key.contest.clone(),
        contest_type: spec.contest_type,
        office_rank: spec.office_rank,
        year: bucket.key.year.clone(),
        dem_candidate: leading_candidate(&bucket.entries, DEM),
        rep_candidate: leading_candidate(&bucket.entries, REP),
        dem_votes,
        rep_votes,
        dem_pct: percentage(dem_votes, total_votes),
        rep_pct: percentage(rep_votes, total_votes),
        other_votes,
        total_votes,
        two_party_total,
        margin,
        margin_pct: format!("{:.2}", margin_pct),
        winner,
        competitiveness: competitiveness(margin_pct, winner),
        all_parties,
    }
}

/// Summarizes every bucket of the tally.
pub fn summarize(tally: &Tally, config: &PipelineConfig) -> ResultsByYear {
    let mut res: ResultsByYear = BTreeMap::new();
    for bucket in tally.buckets() {
        let spec = match config.contest(&bucket.key.contest) {
            Some(spec) => spec,
            None => {
                warn!(
                    "summarize: skipping untracked contest {:?}",
                    bucket.key.contest
                );
                continue;
            }
        };
        let summary = summarize_bucket(&bucket, spec);
        debug!(
            "summarize: {} {} {}: {:?} by {}",
            summary.year, summary.contest, summary.county, summary.winner, summary.margin_pct
        );
        res.entry(bucket.key.year.clone())
            .or_default()
            .entry(bucket.key.contest.clone())
            .or_default()
            .insert(bucket.key.county.clone(), summary);
    }
    res
}

/// Number of county results in the nested mapping.
pub fn count_results(results: &ResultsByYear) -> usize {
    results
        .values()
        .flat_map(|contests| contests.values())
        .map(|counties| counties.len())
        .sum()
}
