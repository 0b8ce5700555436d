//! CSV Projection of the History
//!
//! Pure read-only presentation over an in-memory [`History`]: one row per
//! component, identity first, then the full historical sequence oldest
//! first. No engine state is touched and nothing is recomputed - the row is
//! exactly what the durable record holds for that component.

use std::io::{self, Write};

use crate::history::History;

/// Write `history` as CSV rows: `component,v1,v2,...`, one per component.
///
/// Components appear in stable key order; a component with no readings
/// produces a row with just its identity.
pub fn write_csv<W: Write>(history: &History, out: &mut W) -> io::Result<()> {
    for (component, values) in history.components() {
        write!(out, "{}", component)?;
        for value in values {
            write!(out, ",{}", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_component() {
        let mut history = History::new();
        history.append_and_trim("ENG1", &[0.5, 0.25], 100);
        history.append_and_trim("PG3", &[1.0], 100);

        let mut out = Vec::new();
        write_csv(&history, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ENG1,0.5,0.25\nPG3,1\n"
        );
    }

    #[test]
    fn empty_history_writes_nothing() {
        let mut out = Vec::new();
        write_csv(&History::new(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
