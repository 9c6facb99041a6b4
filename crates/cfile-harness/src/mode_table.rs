//! Machine-readable view of `AccessMode` resolution.

use cfile_core::AccessMode;
use serde::Serialize;

/// One valid flag combination and the mode string it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeRow {
    pub flags: Vec<&'static str>,
    pub bits: u8,
    pub mode: &'static str,
}

const FLAG_NAMES: [(AccessMode, &str); 5] = [
    (AccessMode::READ, "read"),
    (AccessMode::WRITE, "write"),
    (AccessMode::APPEND, "append"),
    (AccessMode::BINARY, "binary"),
    (AccessMode::EXTENDED, "extended"),
];

/// Every valid combination, in resolution-table order.
#[must_use]
pub fn mode_table() -> Vec<ModeRow> {
    AccessMode::ALL_VALID
        .iter()
        .filter_map(|&mode| {
            Some(ModeRow {
                flags: FLAG_NAMES
                    .iter()
                    .filter(|(flag, _)| mode.contains(*flag))
                    .map(|(_, name)| *name)
                    .collect(),
                bits: mode.bits(),
                mode: mode.mode_str()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_twelve_rows_with_unique_strings() {
        let rows = mode_table();
        assert_eq!(rows.len(), 12);
        let mut modes: Vec<_> = rows.iter().map(|r| r.mode).collect();
        modes.sort_unstable();
        modes.dedup();
        assert_eq!(modes.len(), 12);
    }

    #[test]
    fn row_lists_its_flags() {
        let rows = mode_table();
        let rbx = rows.iter().find(|r| r.mode == "rb+").unwrap();
        assert_eq!(rbx.flags, ["read", "binary", "extended"]);
        assert_eq!(rbx.bits, 0b1_1001);
    }
}
