use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde_yaml::{Mapping, Value};
use tracing::debug;

mod policy;
mod reorder;

pub use policy::{Alphabetize, FileMatch, SortPolicy};
pub use reorder::reorder_document;

/// Parse `input`, reorder it and write the result to `output`. Returns false
/// without writing anything when the document root is not a mapping.
pub fn sort_file(input: &Path, output: &Path, policy: &SortPolicy) -> Result<bool> {
    let text = fs::read_to_string(input)?;
    let doc: Value =
        serde_yaml::from_str(&text).map_err(|e| anyhow!("{}: {}", input.display(), e))?;
    let Value::Mapping(doc) = doc else {
        eprintln!("{}: document root is not a mapping, skipping.", input.display());
        return Ok(false);
    };
    let sorted = reorder_document(&doc, policy);
    let text = serialize_document(&sorted)?;
    fs::write(output, text).map_err(|e| anyhow!("{}: {}", output.display(), e))?;
    debug!(input = %input.display(), output = %output.display(), "Sorted compose file");
    Ok(true)
}

/// Render each top-level entry as its own YAML block, separated by a blank
/// line.
pub fn serialize_document(doc: &Mapping) -> Result<String> {
    if doc.is_empty() {
        return Ok(serde_yaml::to_string(doc)?);
    }
    let mut out = String::new();
    for (key, value) in doc {
        if !out.is_empty() {
            out.push('\n');
        }
        let mut block = Mapping::new();
        block.insert(key.clone(), value.clone());
        out.push_str(&serde_yaml::to_string(&block)?);
    }
    Ok(out)
}
