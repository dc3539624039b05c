use serde_json::Value;

use super::format_scalar;

/// Result fields that best answer each command, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_payment",
    "term_months",
    "scheduled_payment",
    "accepted_count",
    "summary",
    "money",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            match map.get(key) {
                // The savings summary is itself an object; flatten it to one line.
                Some(Value::Object(inner)) => {
                    return inner
                        .iter()
                        .map(|(k, v)| format!("{}={}", k, format_scalar(v, "null")))
                        .collect::<Vec<_>>()
                        .join(" ");
                }
                Some(val) if !val.is_null() => return format_scalar(val, "null"),
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val, "null"));
        }
    }

    format_scalar(result_obj, "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_wins_over_other_fields() {
        let v = json!({"result": {"principal": "60000", "term_months": 37}});
        assert_eq!(minimal_answer(&v), "37");
    }

    #[test]
    fn test_null_term_falls_through() {
        let v = json!({"result": {"term_months": null, "feasible": false}});
        // keys iterate sorted, so the fallback is the first alphabetically
        assert_eq!(minimal_answer(&v), "feasible: false");
    }

    #[test]
    fn test_summary_flattened() {
        let v = json!({"result": {"summary": {"money": "150", "co2_kg": "0", "water_liters": "1950"}}});
        let line = minimal_answer(&v);
        assert!(line.contains("money=150"));
        assert!(line.contains("water_liters=1950"));
    }
}
