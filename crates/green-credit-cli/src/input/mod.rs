pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Typed command input from `--input <file>` or piped stdin, in that order.
/// `None` means neither was supplied and the caller should fall back to flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_document(path)?));
    }
    stdin::read_stdin()
}
