// Primitives for reading the county returns files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::returns::*;

/// The returns files of a directory, in file name order.
pub fn list_input_files(dir: &Path, suffix: &str) -> ReturnsResult<Vec<PathBuf>> {
    let path = dir.display().to_string();
    let mut res: Vec<PathBuf> = Vec::new();
    for entry_r in fs::read_dir(dir).context(ListingInputsSnafu { path: path.clone() })? {
        let entry = entry_r.context(ListingInputsSnafu { path: path.clone() })?;
        let p = entry.path();
        let matches = p
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.ends_with(suffix))
            .unwrap_or(false);
        if matches && p.is_file() {
            res.push(p);
        }
    }
    // The order of the files decides the order in which candidates are first seen.
    res.sort();
    Ok(res)
}

struct Columns {
    office: Option<usize>,
    county: Option<usize>,
    party: Option<usize>,
    candidate: Option<usize>,
    votes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Columns {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        Columns {
            office: find("office"),
            county: find("county"),
            party: find("party"),
            candidate: find("candidate"),
            votes: find("votes"),
        }
    }

    fn record(&self, line: &csv::StringRecord) -> RawRecord {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| line.get(i))
                .unwrap_or_default()
                .to_string()
        };
        RawRecord {
            office: get(self.office),
            county: get(self.county),
            party: get(self.party),
            candidate: get(self.candidate),
            votes: get(self.votes),
        }
    }
}

/// Streams the rows of one file into the aggregator. Returns the number of rows read.
///
/// Columns are found by header name; missing columns and short rows read as empty.
/// Rows that cannot be decoded are skipped with a warning.
pub fn read_returns_file(
    path: &Path,
    year: &str,
    aggregator: &mut Aggregator,
) -> ReturnsResult<usize> {
    let path_s = path.display().to_string();
    info!("Reading returns file {:?} for year {}", path_s, year);
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path_s.clone(),
        })?;
    let headers = rdr
        .headers()
        .context(CsvLineParseSnafu {
            path: path_s.clone(),
            lineno: 1usize,
        })?
        .clone();
    let columns = Columns::from_headers(&headers);
    if columns.office.is_none() || columns.votes.is_none() {
        warn!(
            "read_returns_file: {}: missing office or votes column in {:?}",
            path_s, headers
        );
    }

    let mut num_rows = 0;
    let mut num_kept = 0;
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        match line_r {
            Ok(line) => {
                num_rows += 1;
                let record = columns.record(&line);
                if aggregator.add_record(year, &record) {
                    num_kept += 1;
                } else {
                    debug!(
                        "read_returns_file: {}:{}: skipping office {:?}",
                        path_s, lineno, record.office
                    );
                }
            }
            Err(e) => {
                warn!(
                    "read_returns_file: {}:{}: skipping undecodable row: {}",
                    path_s, lineno, e
                );
            }
        }
    }
    info!(
        "Read {} rows from {:?}, kept {}",
        num_rows, path_s, num_kept
    );
    Ok(num_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "2022__md__general__county.csv",
            "1986__md__general__county.csv",
            "2020__md__primary__county.csv",
            "README.md",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("1990__md__general__county.csv")).unwrap();

        let files = list_input_files(dir.path(), "__md__general__county.csv").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "1986__md__general__county.csv".to_string(),
                "2022__md__general__county.csv".to_string()
            ]
        );
    }

    #[test]
    fn short_rows_and_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("2016__md__general__county.csv");
        fs::write(
            &p,
            "office,county,party,votes\n\
             President,Garrett,Democratic,5\n\
             President,Garrett,Republican\n\
             President,Garrett,Democratic,7,extra\n",
        )
        .unwrap();

        let config = PipelineConfig::maryland();
        let lookup = CountyLookup::default();
        let mut aggregator = Aggregator::new(&config, &lookup);
        assert_eq!(read_returns_file(&p, "2016", &mut aggregator).unwrap(), 3);
        let agg = aggregator.finish();
        let key = TallyKey {
            year: "2016".to_string(),
            contest: "President".to_string(),
            county: "Garrett County".to_string(),
            party: "DEM".to_string(),
            candidate: "Unknown".to_string(),
        };
        assert_eq!(agg.tally.get(&key), Some(12));
        assert_eq!(agg.tally.len(), 2);
    }
}
