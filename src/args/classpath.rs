//! Search-path merge — the user's `-classpath` plus the built-in default.

use std::path::{Path, PathBuf};

use crate::args::error::LaunchError;
use crate::args::probe::PathProbe;

/// Join entries with `separator`, quoting entries that contain whitespace.
pub fn join_entries<'a>(entries: impl IntoIterator<Item = &'a str>, separator: char) -> String {
    entries
        .into_iter()
        .filter(|e| !e.is_empty())
        .map(quote_entry)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

fn quote_entry(entry: &str) -> String {
    if entry.chars().any(char::is_whitespace) && !is_quoted(entry) {
        format!("\"{}\"", entry)
    } else {
        entry.to_string()
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Render the merged search-path value.
///
/// - User values present: `user[sep user...] + sep + default`.
/// - No user value: `default`, plus `extension` when probing found one.
///
/// Each user value may itself hold several separator-joined entries; they
/// are split so every entry is quoted on its own.
pub fn merge_search_path(
    user_values: &[String],
    default: &str,
    extension: Option<&Path>,
    separator: char,
) -> String {
    let extension = extension.map(|p| p.display().to_string());
    let entries: Vec<&str> = if user_values.is_empty() {
        std::iter::once(default)
            .chain(extension.as_deref())
            .collect()
    } else {
        user_values
            .iter()
            .flat_map(|v| v.split(separator))
            .chain(std::iter::once(default))
            .collect()
    };
    join_entries(entries, separator)
}

/// Look for a runtime installation on the executable search path.
///
/// The first entry that contains `launcher_binary` wins. Its parent is
/// checked for each of `layouts` in order; the first existing directory is
/// returned. If none exists the search stops there with `None`.
pub fn probe_runtime_extension(
    search_path: Option<&str>,
    separator: char,
    launcher_binary: &str,
    layouts: &[String],
    probe: &impl PathProbe,
) -> Result<Option<PathBuf>, LaunchError> {
    let Some(search_path) = search_path else {
        return Ok(None);
    };

    for dir in search_path.split(separator).filter(|d| !d.is_empty()) {
        let dir = Path::new(dir);
        if !has_launcher(dir, launcher_binary, probe)? {
            continue;
        }

        tracing::debug!("Found {} in {}", launcher_binary, dir.display());
        let Some(home) = dir.parent() else {
            return Ok(None);
        };

        for layout in layouts {
            let candidate = home.join(layout);
            if probe
                .is_directory(&candidate)
                .map_err(|e| LaunchError::probe(&candidate, e))?
            {
                return Ok(Some(candidate));
            }
        }
        return Ok(None);
    }

    Ok(None)
}

fn has_launcher(dir: &Path, launcher_binary: &str, probe: &impl PathProbe) -> Result<bool, LaunchError> {
    let mut candidates = vec![dir.join(launcher_binary)];
    if cfg!(windows) {
        candidates.push(dir.join(format!("{}.exe", launcher_binary)));
    }
    for candidate in candidates {
        if probe
            .exists(&candidate)
            .map_err(|e| LaunchError::probe(&candidate, e))?
        {
            return Ok(true);
        }
    }
    Ok(false)
}
