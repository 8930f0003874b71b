//! Canonical forms for the free-text fields of the returns files.

use crate::config::PipelineConfig;

/// Maps an office label to one of the configured contests.
///
/// Returns `None` when the office is not tracked, in which case the row should be skipped.
pub fn normalize_contest(office: &str, config: &PipelineConfig) -> Option<String> {
    let office = office.trim();
    let name = config
        .contest_prefixes
        .iter()
        .find(|p| office.starts_with(p.as_str()))
        .map(|p| p.as_str())
        .unwrap_or(office);
    config.contest(name).map(|c| c.name.clone())
}

/// Maps a party label to its short code. Unknown labels are kept, uppercased.
pub fn normalize_party(party: &str, config: &PipelineConfig) -> String {
    let p = party.trim().to_lowercase();
    if let Some(code) = config.party_synonyms.get(&p) {
        return code.clone();
    }
    if p.is_empty() {
        return config.default_party.clone();
    }
    p.to_uppercase()
}

/// Removes the running mate from a ticket, for example `Biden/Harris` -> `Biden`.
///
/// An empty name stays empty.
pub fn strip_running_mate(name: &str) -> String {
    let candidate = name.trim();
    if let Some((head, _)) = candidate.split_once('/') {
        return head.trim().to_string();
    }
    // ASCII lowercasing keeps the byte offsets of the original string.
    if let Some(idx) = candidate.to_ascii_lowercase().find(" and ") {
        return candidate[..idx].trim().to_string();
    }
    candidate.to_string()
}
