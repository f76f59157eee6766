//! Loader for the BPP text instance format.
//!
//! ```text
//! 5        <- number of items
//! 10       <- bin capacity
//! 2        <- one item size per line
//! 5
//! 4
//! 7
//! 1
//! ```
//!
//! Blank lines and surrounding whitespace are ignored.

use crate::error::{Error, Result};
use crate::packing::{Instance, Item};
use std::fs;
use std::path::Path;

/// A named instance loaded from disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File name of the dataset, e.g. `N1C1W1_A.BPP`.
    pub name: String,
    /// The validated instance.
    pub instance: Instance,
}

/// Reads and parses a dataset file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let instance = parse_bpp(&text)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Dataset { name, instance })
}

/// Parses BPP text into an [`Instance`].
///
/// The declared item count must match the number of sizes that follow.
///
/// # Examples
///
/// ```
/// use u_binpack::dataset::parse_bpp;
///
/// let instance = parse_bpp("3\n10\n4\n6\n5\n").unwrap();
/// assert_eq!(instance.capacity(), 10);
/// assert_eq!(instance.len(), 3);
/// ```
pub fn parse_bpp(text: &str) -> Result<Instance> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line, raw) = lines.next().ok_or_else(|| Error::Dataset {
        line: 1,
        message: "missing item count".into(),
    })?;
    let count: usize = parse_number(line, raw, "item count")?;

    let (line, raw) = lines.next().ok_or_else(|| Error::Dataset {
        line: line + 1,
        message: "missing bin capacity".into(),
    })?;
    let capacity: u64 = parse_number(line, raw, "bin capacity")?;

    let mut items = Vec::with_capacity(count);
    let mut last_line = line;
    for (line, raw) in lines {
        items.push(Item::new(parse_number(line, raw, "item size")?));
        last_line = line;
    }

    if items.len() != count {
        return Err(Error::Dataset {
            line: last_line,
            message: format!("declared {count} items but found {}", items.len()),
        });
    }

    Instance::new(capacity, items)
}

fn parse_number<T: std::str::FromStr>(line: usize, raw: &str, what: &str) -> Result<T> {
    raw.parse().map_err(|_| Error::Dataset {
        line,
        message: format!("invalid {what} '{raw}'"),
    })
}
