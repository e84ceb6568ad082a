/*!
 * Output Rendering
 * Formatting of STAT reports and error messages
 */

use crate::config::StatFormat;
use crate::memory::{Range, Snapshot};

/// One STAT line: `Addresses [start:end] Unused` or `... Process <id>`
pub fn render_range(range: &Range) -> String {
    format!("Addresses {}", range)
}

/// Render a snapshot in the configured format, one line per range for text
pub fn render_stat(snapshot: &Snapshot, format: StatFormat) -> Result<String, serde_json::Error> {
    match format {
        StatFormat::Text => {
            let mut out = String::new();
            for range in snapshot {
                out.push_str(&render_range(range));
                out.push('\n');
            }
            Ok(out)
        }
        StatFormat::Json => {
            let mut out = serde_json::to_string(snapshot)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Human-readable line for a rejected operation
pub fn render_error(error: &dyn std::error::Error) -> String {
    format!("Error: {}", error)
}
