use log::{debug, info, warn};

use county_returns::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeSet;
use std::path::Path;

use crate::args::Args;
use crate::returns::config_reader::*;
use crate::returns::io_csv::{list_input_files, read_returns_file};
use crate::returns::io_geo::read_county_reference;
use crate::returns::io_report::{check_reference, write_report};

pub mod config_reader;
mod io_csv;
mod io_geo;
mod io_report;

#[derive(Debug, Snafu)]
pub enum ReturnsError {
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error listing the returns files in {path}"))]
    ListingInputs {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error reading the county reference {path}"))]
    ReadingDbf { source: dbase::Error, path: String },
    #[snafu(display("Missing field {field} in the county reference {path}"))]
    MissingReferenceField { field: String, path: String },
    #[snafu(display("Error creating the output directory {path}"))]
    CreatingOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the report"))]
    SerializingReport { source: serde_json::Error },
    #[snafu(display("Error writing the report to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReturnsResult<T> = Result<T, ReturnsError>;

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Reads all the returns files and builds the report, without writing anything.
pub fn build_report(
    pipeline: &PipelineConfig,
    settings: &RunSettings,
    processed_date: &str,
) -> ReturnsResult<Report> {
    let files = list_input_files(&settings.input_dir, &settings.file_suffix)?;
    info!(
        "Found {} returns files in {:?}",
        files.len(),
        settings.input_dir
    );

    let records = read_county_reference(&settings.county_reference, &settings.fields)?;
    let lookup = CountyLookup::build(records, pipeline);
    info!(
        "Loaded {} county names for state {} from {:?}",
        lookup.len(),
        pipeline.state_fips,
        settings.county_reference
    );

    let mut aggregator = Aggregator::new(pipeline, &lookup);
    for path in files.iter() {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let year = match year_from_file_name(file_name) {
            Some(y) => y,
            None => {
                debug!("build_report: no year in file name {:?}, skipping", path);
                continue;
            }
        };
        aggregator.begin_file(&year);
        read_returns_file(path, &year, &mut aggregator)?;
    }
    let agg = aggregator.finish();

    let unmatched: BTreeSet<&String> = agg
        .tally
        .buckets()
        .into_iter()
        .flat_map(|b| b.entries)
        .map(|e| &e.0.county)
        .filter(|county| !lookup.is_canonical(county))
        .collect();
    for county in unmatched {
        warn!("No county reference entry for {:?}, using the name as is", county);
    }

    Ok(Report::build(pipeline, &agg, processed_date))
}

/// Builds the report as configured by the command line and writes it.
pub fn run_report(args: &Args) -> ReturnsResult<Report> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => ReturnsConfig::default(),
    };
    let pipeline = config.pipeline_config()?;
    let settings = config.run_settings(args);
    info!("settings: {:?}", settings);

    let report = build_report(&pipeline, &settings, &today())?;
    write_report(&report, &settings.output_path)?;

    println!("Wrote {}", settings.output_path.display());
    println!(
        "Summary: {} years, {} contests, {} county results",
        report.summary.total_years,
        report.summary.total_contests,
        report.summary.total_county_results
    );

    // The reference report, if provided for comparison
    if let Some(reference_p) = &args.reference {
        check_reference(&report, Path::new(reference_p))?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as JSValue;
    use std::fs;
    use std::path::PathBuf;

    const COUNTIES: &str = "\
STATEFP20,NAME20,NAMELSAD20
24,Anywhere,Anywhere County
24,Baltimore,Baltimore County
24,Baltimore,Baltimore city
51,Baltimore,Baltimore Lookalike County
";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, contents).unwrap();
        p
    }

    fn args(dir: &Path) -> Args {
        Args {
            input: Some(dir.join("returns").display().to_string()),
            counties: Some(dir.join("counties.csv").display().to_string()),
            out: Some(dir.join("out/nested/report.json").display().to_string()),
            ..Args::default()
        }
    }

    fn setup() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("returns")).unwrap();
        write(dir.path(), "counties.csv", COUNTIES);
        dir
    }

    fn read_output(dir: &Path) -> JSValue {
        let s = fs::read_to_string(dir.join("out/nested/report.json")).unwrap();
        serde_json::from_str(&s).unwrap()
    }

    #[test]
    fn two_years_end_to_end() {
        let dir = setup();
        let returns = dir.path().join("returns");
        write(
            &returns,
            "2020__md__general__county.csv",
            "county,office,district,party,candidate,votes\n\
             Anywhere County,President,,Democratic,Joe Biden/Kamala Harris,600\n\
             Anywhere County,President,,Republican,Donald Trump and Mike Pence,400\n\
             Anywhere County,U.S. House,1,Republican,Andy Harris,700\n",
        );
        write(
            &returns,
            "2022__md__general__county.csv",
            "county,office,party,candidate,votes\n\
             Anywhere,President,Democratic,A,100\n\
             Anywhere,President,Republican,B,300\n\
             Anywhere,President,Republican,B,not a number\n",
        );
        // No year in the name, and another state.
        write(&returns, "notes__md__general__county.csv", "office\nPresident\n");
        write(&returns, "2020__va__general__county.csv", "office\nPresident\n");

        let report = run_report(&args(dir.path())).unwrap();
        assert_eq!(report.summary.years_covered, vec!["2020", "2022"]);

        let js = read_output(dir.path());
        let years: Vec<&String> = js["results_by_year"].as_object().unwrap().keys().collect();
        assert_eq!(years, vec!["2020", "2022"]);
        assert_eq!(js["results_by_year"]["2020"].as_object().unwrap().len(), 1);
        assert_eq!(js["results_by_year"]["2022"].as_object().unwrap().len(), 1);

        let s2020 = &js["results_by_year"]["2020"]["President"]["Anywhere County"];
        assert_eq!(s2020["dem_candidate"], "Joe Biden");
        assert_eq!(s2020["rep_candidate"], "Donald Trump");
        assert_eq!(s2020["dem_votes"], 600);
        assert_eq!(s2020["rep_votes"], 400);
        assert_eq!(s2020["total_votes"], 1000);
        assert_eq!(s2020["margin"], 200);
        assert_eq!(s2020["margin_pct"], "20.00");
        assert_eq!(s2020["winner"], "DEM");
        assert_eq!(s2020["competitiveness"]["code"], "D_STRONGHOLD");

        let s2022 = &js["results_by_year"]["2022"]["President"]["Anywhere County"];
        assert_eq!(s2022["rep_votes"], 300);
        assert_eq!(s2022["dem_pct"], 25.0);
        assert_eq!(s2022["margin_pct"], "50.00");
        assert_eq!(s2022["winner"], "REP");
        assert_eq!(s2022["competitiveness"]["code"], "R_ANNIHILATION");

        assert_eq!(js["summary"]["total_years"], 2);
        assert_eq!(js["summary"]["total_contests"], 1);
        assert_eq!(js["summary"]["total_county_results"], 2);
        assert_eq!(js["focus"], "Maryland county-level political realignment patterns");
    }

    #[test]
    fn independent_city_is_kept_apart() {
        let dir = setup();
        write(
            &dir.path().join("returns"),
            "2018__md__general__county.csv",
            "office,county,party,candidate,votes\n\
             Governor,Baltimore City,Democratic,Ben Jealous and Susan Turnbull,100\n\
             Governor,Baltimore,Republican,Larry Hogan and Boyd Rutherford,200\n\
             Governor,Baltimore County,Republican,Larry Hogan and Boyd Rutherford,50\n",
        );
        run_report(&args(dir.path())).unwrap();
        let js = read_output(dir.path());
        let gov = js["results_by_year"]["2018"]["Governor"].as_object().unwrap();
        let counties: Vec<&String> = gov.keys().collect();
        assert_eq!(counties, vec!["Baltimore County", "Baltimore city"]);
        assert_eq!(gov["Baltimore County"]["rep_votes"], 250);
        assert_eq!(gov["Baltimore city"]["dem_votes"], 100);
    }

    #[test]
    fn reference_comparison_ignores_the_date() {
        let dir = setup();
        write(
            &dir.path().join("returns"),
            "2020__md__general__county.csv",
            "office,county,party,candidate,votes\nPresident,Anywhere,Democratic,A,10\n",
        );
        let mut a = args(dir.path());
        run_report(&a).unwrap();

        let mut js = read_output(dir.path());
        js["processed_date"] = JSValue::String("1999-01-01".to_string());
        let reference = write(
            dir.path(),
            "reference.json",
            &serde_json::to_string_pretty(&js).unwrap(),
        );
        a.reference = Some(reference.display().to_string());
        assert!(run_report(&a).is_ok());

        js["results_by_year"]["2020"]["President"]["Anywhere County"]["dem_votes"] = 11.into();
        write(
            dir.path(),
            "reference.json",
            &serde_json::to_string_pretty(&js).unwrap(),
        );
        assert!(run_report(&a).is_err());
    }

    #[test]
    fn config_file_selects_another_state() {
        let dir = setup();
        write(
            &dir.path().join("returns"),
            "2021__va__general__county.csv",
            "office,county,party,candidate,votes\n\
             Governor,Baltimore,Democratic,D,10\n\
             Governor,Baltimore,Republican,R,12\n",
        );
        let config = write(
            dir.path(),
            "va.json",
            r#"{
                "fileSuffix": "__va__general__county.csv",
                "stateFips": "51",
                "independentCities": [],
                "contests": [{"name": "Governor", "contestType": "State"}],
                "metadata": {"state": "Virginia"}
            }"#,
        );
        let mut a = args(dir.path());
        a.config = Some(config.display().to_string());
        let report = run_report(&a).unwrap();
        assert_eq!(report.jurisdiction.state, "Virginia");
        assert_eq!(report.jurisdiction.state_fips, "51");
        let gov = &report.results_by_year["2021"]["Governor"];
        assert!(gov.contains_key("Baltimore Lookalike County"));
        assert_eq!(gov["Baltimore Lookalike County"].office_rank, 1);
    }

    #[test]
    fn missing_input_directory_is_fatal() {
        let dir = setup();
        let mut a = args(dir.path());
        a.input = Some(dir.path().join("nope").display().to_string());
        assert!(matches!(
            run_report(&a),
            Err(ReturnsError::ListingInputs { .. })
        ));
    }
}
