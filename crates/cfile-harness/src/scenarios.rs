//! Executable checks of the `CFile` contract.
//!
//! Each scenario gets a private scratch directory and returns `Err(reason)` on
//! the first mismatch. Descriptor liveness is read from `/proc/self/fd`, so
//! close-tracking scenarios need Linux.

use std::ffi::c_int;
use std::path::{Path, PathBuf};

use cfile::{AccessMode, CFile, FilePosition, NULL};
use cfile_core::ModeError;

/// Outcome of a scenario body.
pub type ScenarioOutcome = Result<(), String>;

/// A named check and the stdio symbol it centers on.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub symbol: &'static str,
    pub mode: Option<&'static str>,
    pub run: fn(&Path) -> ScenarioOutcome,
}

macro_rules! ensure {
    ($cond:expr, $($msg:tt)+) => {
        if !$cond {
            return Err(format!($($msg)+));
        }
    };
}

/// Every scenario, in execution order.
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "modes_table_resolves",
            symbol: "fopen",
            mode: None,
            run: modes_table_resolves,
        },
        Scenario {
            name: "modes_parse_accepts_aliases",
            symbol: "fopen",
            mode: Some("r+b"),
            run: modes_parse_accepts_aliases,
        },
        Scenario {
            name: "open_missing_is_null",
            symbol: "fopen",
            mode: Some("r"),
            run: open_missing_is_null,
        },
        Scenario {
            name: "take_moves_handle",
            symbol: "fopen",
            mode: Some("w+"),
            run: take_moves_handle,
        },
        Scenario {
            name: "move_keeps_open",
            symbol: "fclose",
            mode: Some("w+"),
            run: move_keeps_open,
        },
        Scenario {
            name: "reset_closes",
            symbol: "fclose",
            mode: Some("w+"),
            run: reset_closes,
        },
        Scenario {
            name: "drop_closes",
            symbol: "fclose",
            mode: Some("w"),
            run: drop_closes,
        },
        Scenario {
            name: "block_round_trip",
            symbol: "fread",
            mode: Some("wb+"),
            run: block_round_trip,
        },
        Scenario {
            name: "line_round_trip",
            symbol: "fgets",
            mode: Some("w+"),
            run: line_round_trip,
        },
        Scenario {
            name: "position_restore",
            symbol: "fsetpos",
            mode: Some("wb+"),
            run: position_restore,
        },
        Scenario {
            name: "append_writes_at_end",
            symbol: "fwrite",
            mode: Some("ab"),
            run: append_writes_at_end,
        },
        Scenario {
            name: "raw_mode_passthrough",
            symbol: "fopen",
            mode: Some("wx"),
            run: raw_mode_passthrough,
        },
        Scenario {
            name: "freopen_failure_empties",
            symbol: "freopen",
            mode: Some("r"),
            run: freopen_failure_empties,
        },
        Scenario {
            name: "empty_instance_fails_cleanly",
            symbol: "fgetc",
            mode: None,
            run: empty_instance_fails_cleanly,
        },
        Scenario {
            name: "rename_and_remove",
            symbol: "rename",
            mode: Some("w"),
            run: rename_and_remove,
        },
    ]
}

/// Scenarios whose name contains `filter`, or all of them.
#[must_use]
pub fn select(filter: Option<&str>) -> Vec<Scenario> {
    all()
        .into_iter()
        .filter(|s| filter.is_none_or(|f| s.name.contains(f)))
        .collect()
}

fn fd_is_open(fd: c_int) -> bool {
    fd >= 0 && PathBuf::from(format!("/proc/self/fd/{fd}")).exists()
}

fn last_errno() -> Option<i32> {
    std::io::Error::last_os_error().raw_os_error()
}

fn open_scratch(dir: &Path, name: &str, mode: AccessMode) -> Result<CFile, String> {
    let file = CFile::open(dir.join(name), mode);
    ensure!(file.is_open(), "open {name} as {mode} failed: errno {:?}", last_errno());
    Ok(file)
}

// ---------------------------------------------------------------------------
// Mode resolution
// ---------------------------------------------------------------------------

fn modes_table_resolves(_dir: &Path) -> ScenarioOutcome {
    let expected = [
        "r", "w", "a", "r+", "w+", "a+", "rb", "wb", "ab", "rb+", "wb+", "ab+",
    ];
    for (mode, want) in AccessMode::ALL_VALID.iter().zip(expected) {
        ensure!(mode.mode_str() == Some(want), "{mode:?} resolved wrongly");
    }
    let valid = (0..32u8)
        .filter_map(AccessMode::from_bits)
        .filter(|m| m.is_valid())
        .count();
    ensure!(valid == 12, "expected 12 valid combinations, found {valid}");
    Ok(())
}

fn modes_parse_accepts_aliases(_dir: &Path) -> ScenarioOutcome {
    let mode = AccessMode::parse("r+b").map_err(|e| e.to_string())?;
    ensure!(mode.mode_str() == Some("rb+"), "r+b parsed as {mode:?}");
    ensure!(
        matches!(AccessMode::parse("rw"), Err(ModeError::UnknownModeString(_))),
        "rw should not parse"
    );
    let invalid = AccessMode::READ | AccessMode::WRITE;
    ensure!(
        matches!(invalid.try_mode_str(), Err(ModeError::InvalidCombination { .. })),
        "read|write should not resolve"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

fn open_missing_is_null(dir: &Path) -> ScenarioOutcome {
    let file = CFile::open(dir.join("missing"), AccessMode::READ);
    ensure!(file == NULL, "missing path produced an open stream");
    ensure!(
        last_errno() == Some(libc::ENOENT),
        "expected ENOENT, got {:?}",
        last_errno()
    );
    Ok(())
}

fn take_moves_handle(dir: &Path) -> ScenarioOutcome {
    let mut source = open_scratch(dir, "take", AccessMode::WRITE | AccessMode::EXTENDED)?;
    let raw = source.get();
    let destination = source.take();
    ensure!(source == NULL, "source still owns a stream after take");
    ensure!(destination.get() == raw, "take changed the handle");
    Ok(())
}

fn move_keeps_open(dir: &Path) -> ScenarioOutcome {
    let file = open_scratch(dir, "move", AccessMode::WRITE | AccessMode::EXTENDED)?;
    let fd = file.fileno();
    let moved = file;
    ensure!(fd_is_open(fd), "moving closed descriptor {fd}");
    drop(moved);
    ensure!(!fd_is_open(fd), "descriptor {fd} survived drop of the new owner");
    Ok(())
}

fn reset_closes(dir: &Path) -> ScenarioOutcome {
    let mut file = open_scratch(dir, "reset", AccessMode::WRITE | AccessMode::EXTENDED)?;
    let fd = file.fileno();
    ensure!(file.reset() == 0, "reset reported a close failure");
    ensure!(file == NULL, "reset left a handle");
    ensure!(!fd_is_open(fd), "descriptor {fd} still open after reset");
    ensure!(file.reset() == 0, "reset on empty should be a no-op");
    Ok(())
}

fn drop_closes(dir: &Path) -> ScenarioOutcome {
    let fd = {
        let file = open_scratch(dir, "drop", AccessMode::WRITE)?;
        file.fileno()
    };
    ensure!(!fd_is_open(fd), "descriptor {fd} still open after drop");
    Ok(())
}

// ---------------------------------------------------------------------------
// I/O
// ---------------------------------------------------------------------------

fn block_round_trip(dir: &Path) -> ScenarioOutcome {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let mut file = open_scratch(
        dir,
        "block",
        AccessMode::WRITE | AccessMode::BINARY | AccessMode::EXTENDED,
    )?;
    let written = file.write_items(&data);
    ensure!(written == data.len(), "wrote {written} of {}", data.len());
    file.rewind();

    let mut back = vec![0u8; data.len()];
    let read = file.read_items(&mut back);
    ensure!(read == data.len(), "read {read} of {}", data.len());
    ensure!(back == data, "bytes differ after round trip");
    Ok(())
}

fn line_round_trip(dir: &Path) -> ScenarioOutcome {
    let mut file = open_scratch(dir, "lines", AccessMode::WRITE | AccessMode::EXTENDED)?;
    ensure!(file.fputs(c"alpha\n") >= 0, "fputs failed");
    ensure!(file.print_fmt(format_args!("beta {}\n", 2)) == 7, "print_fmt count");
    file.rewind();

    let mut buffer = [0u8; 32];
    ensure!(file.fgets(&mut buffer) == Some(c"alpha\n"), "first line differs");
    ensure!(file.fgets(&mut buffer) == Some(c"beta 2\n"), "second line differs");
    ensure!(file.fgets(&mut buffer).is_none(), "expected end of file");
    ensure!(file.feof() != 0, "end-of-file indicator not set");
    Ok(())
}

fn position_restore(dir: &Path) -> ScenarioOutcome {
    let mut file = open_scratch(
        dir,
        "position",
        AccessMode::WRITE | AccessMode::BINARY | AccessMode::EXTENDED,
    )?;
    file.write_items(b"0123456789");
    ensure!(file.fseek(3, libc::SEEK_SET) == 0, "fseek failed");

    let mut saved = FilePosition::new();
    ensure!(file.fgetpos(&mut saved) == 0, "fgetpos failed");
    let first = file.fgetc();
    let _ = file.fgetc();
    ensure!(file.fsetpos(&saved) == 0, "fsetpos failed");
    ensure!(file.ftell() == 3, "ftell after fsetpos is {}", file.ftell());
    ensure!(file.fgetc() == first, "restored read differs");
    Ok(())
}

fn append_writes_at_end(dir: &Path) -> ScenarioOutcome {
    let path = dir.join("append");
    std::fs::write(&path, b"head").map_err(|e| e.to_string())?;
    let mut file = CFile::open(&path, AccessMode::APPEND | AccessMode::BINARY);
    ensure!(file.is_open(), "append open failed");
    file.write_items(b"-tail");
    ensure!(file.reset() == 0, "close failed");
    let contents = std::fs::read(&path).map_err(|e| e.to_string())?;
    ensure!(contents == b"head-tail", "contents are {contents:?}");
    Ok(())
}

fn raw_mode_passthrough(dir: &Path) -> ScenarioOutcome {
    let path = dir.join("exclusive");
    let mut created = CFile::open(&path, "wx");
    ensure!(created.is_open(), "exclusive create failed");
    created.reset();
    let again = CFile::open(&path, "wx");
    ensure!(again == NULL, "exclusive create succeeded twice");
    Ok(())
}

fn freopen_failure_empties(dir: &Path) -> ScenarioOutcome {
    let mut file = open_scratch(dir, "freopen", AccessMode::WRITE)?;
    file.freopen(dir.join("missing-target"), AccessMode::READ);
    ensure!(file == NULL, "failed freopen left a handle");
    Ok(())
}

fn empty_instance_fails_cleanly(_dir: &Path) -> ScenarioOutcome {
    let mut file = CFile::new();
    ensure!(file.fgetc() == libc::EOF, "fgetc on empty");
    ensure!(last_errno() == Some(libc::EBADF), "expected EBADF, got {:?}", last_errno());
    ensure!(file.write_items(b"x") == 0, "write on empty");
    ensure!(file.ftell() == -1, "ftell on empty");
    ensure!(file.fclose() == libc::EOF, "fclose on empty");
    ensure!(file.fileno() == -1, "fileno on empty");
    Ok(())
}

fn rename_and_remove(dir: &Path) -> ScenarioOutcome {
    let from = dir.join("rename-from");
    let to = dir.join("rename-to");
    let mut file = CFile::open(&from, AccessMode::WRITE);
    ensure!(file.is_open(), "create failed");
    file.reset();
    ensure!(CFile::rename(&from, &to) == 0, "rename failed");
    ensure!(!from.exists() && to.exists(), "rename did not move the file");
    ensure!(CFile::remove(&to) == 0, "remove failed");
    ensure!(!to.exists(), "remove left the file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let scenarios = all();
        let mut names: Vec<_> = scenarios.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn select_filters_by_substring() {
        let picked = select(Some("round_trip"));
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|s| s.name.contains("round_trip")));
        assert_eq!(select(None).len(), all().len());
    }

    #[test]
    fn modes_filter_excludes_raw_mode_scenario() {
        let names: Vec<_> = select(Some("modes_")).iter().map(|s| s.name).collect();
        assert_eq!(names, ["modes_table_resolves", "modes_parse_accepts_aliases"]);
        assert!(select(Some("mode_")).iter().any(|s| s.name == "raw_mode_passthrough"));
    }

    #[test]
    fn modes_are_plausible_fopen_strings() {
        for scenario in all() {
            if let Some(mode) = scenario.mode {
                assert!(mode.starts_with(['r', 'w', 'a']), "{}", scenario.name);
            }
        }
    }
}
