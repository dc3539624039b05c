use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Typed document piped on stdin. `None` when stdin is a terminal or carries
/// only whitespace, so interactive runs fall through to command-line flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    match read_piped(io::stdin().lock())? {
        Some(text) => parse_piped(&text).map(Some),
        None => Ok(None),
    }
}

fn read_piped(mut reader: impl Read) -> io::Result<Option<String>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// JSON first, YAML as the fallback for hand-written policy and offer files.
fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<T, Box<dyn std::error::Error>> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text).map_err(|yaml_err| {
            format!("stdin is neither JSON ({json_err}) nor YAML ({yaml_err})").into()
        }),
    }
}
