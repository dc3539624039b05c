use serde_json::{Map, Value};
use std::io;

use super::{format_scalar, is_record_list};

/// Write output as CSV to stdout: `field,value` rows for scalar result fields,
/// then one section per list of records, each row led by the section name.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let written = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_result(&mut wtr, result),
            _ => write_fields(&mut wtr, map),
        },
        Value::Array(arr) => write_records(&mut wtr, None, arr),
        other => wtr.write_record([format_scalar(other, "")]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {e}");
    }
}

type CsvWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

fn write_result(wtr: &mut CsvWriter<'_>, result: &Map<String, Value>) -> csv::Result<()> {
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !is_record_list(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    write_fields(wtr, &scalars)?;

    for (name, val) in result {
        if let Value::Array(arr) = val {
            if is_record_list(val) {
                write_records(wtr, Some(name.as_str()), arr)?;
            }
        }
    }
    Ok(())
}

fn write_fields(wtr: &mut CsvWriter<'_>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_scalar(val, "")])?;
    }
    Ok(())
}

fn write_records(
    wtr: &mut CsvWriter<'_>,
    section: Option<&str>,
    arr: &[Value],
) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_scalar(item, "")])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let prefix: Vec<&str> = section.map(|_| "section").into_iter().collect();
    wtr.write_record(prefix.iter().copied().chain(headers.iter().copied()))?;

    for item in arr {
        if let Value::Object(map) = item {
            let row = section.map(str::to_string).into_iter().chain(
                headers
                    .iter()
                    .map(|h| map.get(*h).map(|v| format_scalar(v, "")).unwrap_or_default()),
            );
            wtr.write_record(row)?;
        }
    }
    Ok(())
}
