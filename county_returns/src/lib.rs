/*!
Aggregation of county-level general election returns.

The pipeline turns the rows of the returns files into one summary per
(year, contest, county), each rated on a fixed competitiveness scale:

```
use county_returns::*;

let config = PipelineConfig::maryland();
let lookup = CountyLookup::build(
    vec![CountyRecord {
        state: "24".to_string(),
        name: "Garrett".to_string(),
        full_name: "Garrett County".to_string(),
    }],
    &config,
);

let mut aggregator = Aggregator::new(&config, &lookup);
aggregator.begin_file("2020");
for (party, votes) in [("Democratic", "600"), ("Republican", "400")] {
    aggregator.add_record(
        "2020",
        &RawRecord {
            office: "President".to_string(),
            county: "Garrett".to_string(),
            party: party.to_string(),
            candidate: format!("{} nominee", party),
            votes: votes.to_string(),
        },
    );
}

let report = Report::build(&config, &aggregator.finish(), "2020-11-03");
let summary = &report.results_by_year["2020"]["President"]["Garrett County"];
assert_eq!(summary.margin_pct, "20.00");
assert_eq!(summary.competitiveness.code, "D_STRONGHOLD");
```
*/

mod aggregate;
mod competitiveness;
mod config;
mod county;
mod normalize;
mod report;
mod summary;
mod tally;

pub use crate::aggregate::*;
pub use crate::competitiveness::*;
pub use crate::config::*;
pub use crate::county::*;
pub use crate::normalize::*;
pub use crate::report::*;
pub use crate::summary::*;
pub use crate::tally::*;
