use std::collections::{BTreeMap, HashMap};

/// Identifies one vote counter: a candidate of a party, in a county, for a contest and a year.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct TallyKey {
    pub year: String,
    pub contest: String,
    pub county: String,
    pub party: String,
    pub candidate: String,
}

/// The (year, contest, county) part of a key, which defines one summary row.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct BucketKey {
    pub year: String,
    pub contest: String,
    pub county: String,
}

impl TallyKey {
    pub fn bucket(&self) -> BucketKey {
        BucketKey {
            year: self.year.clone(),
            contest: self.contest.clone(),
            county: self.county.clone(),
        }
    }
}

/// Vote counters keyed by `TallyKey`.
///
/// The counters are stored in the order in which their key was first seen.
/// This order is what breaks ties between candidates with the same number of votes.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(TallyKey, u64)>,
    index: HashMap<TallyKey, usize>,
}

/// The counters of one (year, contest, county), in first-seen order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Bucket<'a> {
    pub key: BucketKey,
    pub entries: Vec<&'a (TallyKey, u64)>,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    /// Adds votes to a counter, creating it with zero votes if needed.
    pub fn add(&mut self, key: TallyKey, votes: u64) {
        match self.index.get(&key) {
            Some(&idx) => {
                let count = &mut self.entries[idx].1;
                *count = count.saturating_add(votes);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, votes));
            }
        }
    }

    pub fn get(&self, key: &TallyKey) -> Option<u64> {
        self.index.get(key).map(|&idx| self.entries[idx].1)
    }

    /// Number of distinct counters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups the counters by (year, contest, county), sorted by year, then contest, then county.
    ///
    /// Inside a bucket, counters keep their first-seen order.
    pub fn buckets(&self) -> Vec<Bucket<'_>> {
        let mut grouped: BTreeMap<BucketKey, Vec<&(TallyKey, u64)>> = BTreeMap::new();
        for entry in self.entries.iter() {
            grouped.entry(entry.0.bucket()).or_default().push(entry);
        }
        grouped
            .into_iter()
            .map(|(key, entries)| Bucket { key, entries })
            .collect()
    }
}
