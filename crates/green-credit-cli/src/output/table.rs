use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, is_record_list};

/// Format output as tables: one for the scalar result fields, then one per
/// nested object or list of records (accepted offers, projections, ...).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_result_tables(result);
                print_envelope_notes(map);
            }
            _ => println!("{}", field_table(map)),
        },
        Value::Array(arr) => println!("{}", records_table(arr)),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>) {
    let (nested, scalars): (Vec<_>, Vec<_>) = result
        .iter()
        .partition(|(_, v)| v.is_object() || is_record_list(v));

    if !scalars.is_empty() {
        let flat: Map<String, Value> = scalars
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        println!("{}", field_table(&flat));
    }

    for (name, val) in nested {
        println!("\n{}:", name);
        match val {
            Value::Object(inner) => println!("{}", field_table(inner)),
            Value::Array(arr) => println!("{}", records_table(arr)),
            _ => {}
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), cell(val)]);
    }
    builder.build()
}

fn records_table(arr: &[Value]) -> Table {
    let mut builder = Builder::default();
    let headers: Vec<String> = match arr.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => vec!["value".to_string()],
    };
    builder.push_record(headers.clone());

    for item in arr {
        let row: Vec<String> = match item {
            Value::Object(map) => headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect(),
            other => vec![cell(other)],
        };
        builder.push_record(row);
    }
    builder.build()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        other => format_scalar(other, "-"),
    }
}
