// Readers for the county reference: the attribute table of the census county
// shapefile, or a CSV export of it.

use std::path::Path;

use crate::returns::*;

/// Reads the county records. `.csv` files are read as CSV; anything else is taken as a
/// shapefile and its `.dbf` attribute table is read.
pub fn read_county_reference(
    path: &Path,
    fields: &ReferenceFields,
) -> ReturnsResult<Vec<CountyRecord>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let res = if is_csv {
        read_csv_reference(path, fields)?
    } else {
        read_dbf_reference(&path.with_extension("dbf"), fields)?
    };
    debug!("read_county_reference: {} records", res.len());
    Ok(res)
}

fn read_dbf_reference(path: &Path, fields: &ReferenceFields) -> ReturnsResult<Vec<CountyRecord>> {
    let p = path.display().to_string();
    info!("Attempting to read county attribute table {:?}", p);
    let mut reader = dbase::Reader::from_path(path).context(ReadingDbfSnafu { path: p.clone() })?;
    let records = reader.read().context(ReadingDbfSnafu { path: p.clone() })?;

    let mut res: Vec<CountyRecord> = Vec::new();
    for rec in records.iter() {
        res.push(CountyRecord {
            state: dbf_text(rec, &fields.state, &p)?,
            name: dbf_text(rec, &fields.name, &p)?,
            full_name: dbf_text(rec, &fields.full_name, &p)?,
        });
    }
    Ok(res)
}

fn dbf_text(rec: &dbase::Record, field: &str, path: &str) -> ReturnsResult<String> {
    match rec.get(field) {
        Some(dbase::FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        Some(dbase::FieldValue::Character(None)) => Ok("".to_string()),
        Some(dbase::FieldValue::Memo(s)) => Ok(s.trim().to_string()),
        Some(x) => whatever!("{}: field {} is not a text field: {:?}", path, field, x),
        None => MissingReferenceFieldSnafu { field, path }.fail(),
    }
}

fn read_csv_reference(path: &Path, fields: &ReferenceFields) -> ReturnsResult<Vec<CountyRecord>> {
    let p = path.display().to_string();
    info!("Attempting to read county reference {:?}", p);
    let mut rdr = csv::Reader::from_path(path).context(CsvOpenSnafu { path: p.clone() })?;
    let headers = rdr
        .headers()
        .context(CsvLineParseSnafu {
            path: p.clone(),
            lineno: 1usize,
        })?
        .clone();
    let column = |field: &str| -> ReturnsResult<usize> {
        headers
            .iter()
            .position(|h| h.trim() == field)
            .context(MissingReferenceFieldSnafu {
                field,
                path: p.clone(),
            })
    };
    let i_state = column(&fields.state)?;
    let i_name = column(&fields.name)?;
    let i_full_name = column(&fields.full_name)?;

    let mut res: Vec<CountyRecord> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu {
            path: p.clone(),
            lineno: idx + 2,
        })?;
        let get = |i: usize| line.get(i).unwrap_or_default().trim().to_string();
        res.push(CountyRecord {
            state: get(i_state),
            name: get(i_name),
            full_name: get(i_full_name),
        });
    }
    Ok(res)
}
