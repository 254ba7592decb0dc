//! Human-readable matrix rendering for debugging.

use std::fmt::Write;

use clockzone_core::{decode, is_strict};
use clockzone_dbm::DbmLib;

use super::Zone;

const RULE: &str = "---------------------------------------";

/// Rendering options for [`Zone::dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Decode raw entries to bound values.
    pub convert: bool,
    /// Append `<` or `≤` to each entry.
    pub show_strictness: bool,
    /// Minimum width of every column but the last.
    pub column_width: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            convert: false,
            show_strictness: false,
            column_width: 14,
        }
    }
}

impl DumpOptions {
    /// Decoded values with strictness markers.
    pub fn decoded() -> Self {
        Self {
            convert: true,
            show_strictness: true,
            ..Self::default()
        }
    }
}

impl<L: DbmLib> Zone<L> {
    /// Renders the matrix row by row between two rules.
    ///
    /// Not a stable format; meant for test output and logs.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockzone_zone::{DumpOptions, Zone};
    ///
    /// let zone: Zone = Zone::new(2, false);
    /// let text = zone.dump(DumpOptions { column_width: 4, ..DumpOptions::decoded() });
    /// assert!(text.contains("0 ≤ 0 ≤"));
    /// ```
    pub fn dump(&self, options: DumpOptions) -> String {
        let mut out = String::new();
        out.push_str(RULE);
        out.push('\n');

        for i in 0..self.size {
            for j in 0..self.size {
                let raw = self.get(i, j);
                let mut cell = if options.convert {
                    decode(raw).to_string()
                } else {
                    raw.to_string()
                };
                if options.show_strictness {
                    cell.push_str(if is_strict(raw) { " <" } else { " ≤" });
                }

                if j + 1 == self.size {
                    out.push_str(&cell);
                } else {
                    let _ = write!(out, "{:<width$}", cell, width = options.column_width);
                }
            }
            out.push('\n');
        }

        out.push_str(RULE);
        out
    }
}
