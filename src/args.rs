use clap::Parser;

/// Builds the consolidated county-level election results report.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the state to process: contests, party labels,
    /// file locations. Every entry is optional and defaults to the Maryland settings.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, optional) The directory containing the `<year>__<state>__general__county.csv` files.
    /// Setting this option overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, optional) The county reference: a shapefile (its .dbf attribute table is read)
    /// or a CSV file with the same columns.
    #[clap(long, value_parser)]
    pub counties: Option<String>,

    /// (file path, optional) Where to write the JSON report. Parent directories are created.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A previously written report. If provided, the run fails when the new report
    /// differs from it (the processing date is not compared).
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
