//! Physical keyboard discovery.
//!
//! Scans `/dev/input/by-id` (falling back to `/dev/input/by-path`) for
//! stable-named keyboard symlinks, filters them through the pure rules in
//! [`socd_core::discovery`], and – when more than one keyboard is plugged
//! in – asks the operator to pick one.
//!
//! The prompt is an external collaborator behind the [`SelectionPrompt`]
//! trait: production reads a line from stdin, tests script the replies.
//! Invalid or out-of-range replies are re-prompted silently; the prompt
//! itself never fails the locator unless the input stream dies.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use socd_core::discovery::{collect_candidates, DirectoryProfile};

/// Primary directory of stable device symlinks.
pub const BY_ID_DIR: &str = "/dev/input/by-id";

/// Fallback directory, used when the primary cannot be opened.
pub const BY_PATH_DIR: &str = "/dev/input/by-path";

/// Error type for keyboard discovery.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Neither device directory could be opened.
    #[error("no input device directory could be opened")]
    NoDirectory,
    /// The directories were readable but held no keyboard entries.
    #[error("no keyboard device found")]
    NotFound,
    /// The operator input stream failed while selecting a device.
    #[error("failed to read device selection: {0}")]
    Prompt(#[source] io::Error),
}

/// External collaborator that asks the operator to choose a device.
pub trait SelectionPrompt {
    /// Presents the candidates as an enumerated, 1-based list and returns
    /// one line of operator input.  Called again after an invalid reply.
    fn read_choice(&mut self, candidates: &[String]) -> io::Result<String>;
}

/// Interactive prompt on stdin/stdout.
pub struct StdinPrompt;

impl SelectionPrompt for StdinPrompt {
    fn read_choice(&mut self, candidates: &[String]) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "multiple keyboards found:")?;
        for (i, name) in candidates.iter().enumerate() {
            writeln!(stdout, "  {}: {name}", i + 1)?;
        }
        write!(stdout, "select keyboard [1-{}]: ", candidates.len())?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Locates the physical keyboard device node using the standard directories.
///
/// Blocks on the prompt when more than one candidate remains.
///
/// # Errors
///
/// Returns [`LocateError::NoDirectory`] if neither directory is openable,
/// [`LocateError::NotFound`] if no candidate survives filtering, and
/// [`LocateError::Prompt`] if the operator input stream fails.
pub fn locate_keyboard(prompt: &mut dyn SelectionPrompt) -> Result<PathBuf, LocateError> {
    locate_in(
        &[
            (Path::new(BY_ID_DIR), DirectoryProfile::BY_ID),
            (Path::new(BY_PATH_DIR), DirectoryProfile::BY_PATH),
        ],
        prompt,
    )
}

/// Directory-parameterised locator, used directly by tests.
pub fn locate_in(
    directories: &[(&Path, DirectoryProfile)],
    prompt: &mut dyn SelectionPrompt,
) -> Result<PathBuf, LocateError> {
    let mut any_opened = false;

    for (dir, profile) in directories {
        let names = match list_names(dir) {
            Ok(names) => names,
            Err(e) => {
                debug!(dir = %dir.display(), "device directory not usable: {e}");
                continue;
            }
        };
        any_opened = true;

        let candidates = collect_candidates(names, profile);
        match candidates.len() {
            0 => continue,
            1 => {
                info!(device = %candidates[0], "keyboard selected");
                return Ok(dir.join(&candidates[0]));
            }
            _ => {
                let chosen = select(&candidates, prompt)?;
                info!(device = %chosen, "keyboard selected by operator");
                return Ok(dir.join(chosen));
            }
        }
    }

    if any_opened {
        Err(LocateError::NotFound)
    } else {
        Err(LocateError::NoDirectory)
    }
}

fn list_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

/// Runs the 1-based selection loop until the operator's reply is in range.
fn select<'a>(
    candidates: &'a [String],
    prompt: &mut dyn SelectionPrompt,
) -> Result<&'a String, LocateError> {
    loop {
        let reply = prompt
            .read_choice(candidates)
            .map_err(LocateError::Prompt)?;
        match reply.trim().parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(&candidates[n - 1]),
            _ => debug!(reply = reply.trim(), "invalid selection, re-prompting"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    /// Prompt double that replays a fixed list of replies.
    struct ScriptedPrompt {
        replies: Vec<&'static str>,
        calls: usize,
    }

    impl ScriptedPrompt {
        fn new(replies: Vec<&'static str>) -> Self {
            Self { replies, calls: 0 }
        }
    }

    impl SelectionPrompt for ScriptedPrompt {
        fn read_choice(&mut self, _candidates: &[String]) -> io::Result<String> {
            let reply = self.replies[self.calls];
            self.calls += 1;
            Ok(reply.to_string())
        }
    }

    fn make_dir(entries: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for entry in entries {
            File::create(dir.path().join(entry)).expect("create entry");
        }
        dir
    }

    #[test]
    fn test_single_candidate_selected_without_prompting() {
        // Arrange
        let dir = make_dir(&[
            "usb-Vendor_Keyboard-event-kbd",
            "usb-Vendor_Keyboard-if01-event-kbd",
            "usb-Vendor_Mouse-event-mouse",
        ]);
        let mut prompt = ScriptedPrompt::new(vec![]);

        // Act
        let path = locate_in(&[(dir.path(), DirectoryProfile::BY_ID)], &mut prompt)
            .expect("must locate");

        // Assert
        assert_eq!(path, dir.path().join("usb-Vendor_Keyboard-event-kbd"));
        assert_eq!(prompt.calls, 0);
    }

    #[test]
    fn test_multiple_candidates_use_one_based_selection() {
        let dir = make_dir(&[
            "usb-Alpha_Board-event-kbd",
            "usb-Zeta_Board-event-kbd",
        ]);
        let mut prompt = ScriptedPrompt::new(vec!["2\n"]);

        let path = locate_in(&[(dir.path(), DirectoryProfile::BY_ID)], &mut prompt)
            .expect("must locate");

        // Candidates are sorted, so "2" is the Zeta board
        assert_eq!(path, dir.path().join("usb-Zeta_Board-event-kbd"));
    }

    #[test]
    fn test_invalid_replies_are_reprompted() {
        let dir = make_dir(&[
            "usb-Alpha_Board-event-kbd",
            "usb-Zeta_Board-event-kbd",
        ]);
        // Out of range, not a number, empty, then valid
        let mut prompt = ScriptedPrompt::new(vec!["3\n", "x\n", "\n", "1\n"]);

        let path = locate_in(&[(dir.path(), DirectoryProfile::BY_ID)], &mut prompt)
            .expect("must locate");

        assert_eq!(path, dir.path().join("usb-Alpha_Board-event-kbd"));
        assert_eq!(prompt.calls, 4);
    }

    #[test]
    fn test_empty_primary_falls_back_to_secondary() {
        let primary = make_dir(&["usb-Vendor_Mouse-event-mouse"]);
        let fallback = make_dir(&["pci-0000:00:14.0-usb-0:2:1.0-event-kbd"]);
        let mut prompt = ScriptedPrompt::new(vec![]);

        let path = locate_in(
            &[
                (primary.path(), DirectoryProfile::BY_ID),
                (fallback.path(), DirectoryProfile::BY_PATH),
            ],
            &mut prompt,
        )
        .expect("must locate");

        assert_eq!(
            path,
            fallback.path().join("pci-0000:00:14.0-usb-0:2:1.0-event-kbd")
        );
    }

    #[test]
    fn test_missing_primary_falls_back_to_secondary() {
        let fallback = make_dir(&["pci-0000:00:14.0-usb-0:2:1.0-event-kbd"]);
        let mut prompt = ScriptedPrompt::new(vec![]);

        let path = locate_in(
            &[
                (Path::new("/nonexistent-socd-test-dir"), DirectoryProfile::BY_ID),
                (fallback.path(), DirectoryProfile::BY_PATH),
            ],
            &mut prompt,
        )
        .expect("must locate");

        assert!(path.starts_with(fallback.path()));
    }

    #[test]
    fn test_no_candidates_anywhere_is_not_found() {
        let empty = make_dir(&[]);
        let mut prompt = ScriptedPrompt::new(vec![]);

        let result = locate_in(&[(empty.path(), DirectoryProfile::BY_ID)], &mut prompt);

        assert!(matches!(result, Err(LocateError::NotFound)));
    }

    #[test]
    fn test_no_openable_directory_is_a_distinct_error() {
        let mut prompt = ScriptedPrompt::new(vec![]);

        let result = locate_in(
            &[(Path::new("/nonexistent-socd-test-dir"), DirectoryProfile::BY_ID)],
            &mut prompt,
        );

        assert!(matches!(result, Err(LocateError::NoDirectory)));
    }
}
