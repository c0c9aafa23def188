//! File watching for translation regeneration.
//!
//! Debounced filesystem events under a root directory are matched against
//! glob patterns; any match asks the [`Regenerator`] for a run.

mod regenerator;

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use glob::{MatchOptions, Pattern, PatternError};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use tracing::{debug, info, warn};

pub use regenerator::Regenerator;

/// Glob patterns matched against paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    patterns: Vec<Pattern>,
}

impl PathFilter {
    /// `*` does not cross directory separators; use `**` for that.
    const OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    pub fn new(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            root: root.into(),
            patterns,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if `path` (absolute, or relative to the root) matches any pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, Self::OPTIONS))
    }
}

/// Watch `filter.root()` until the watcher shuts down, triggering
/// `regenerator` for every debounced batch containing a matching path.
///
/// Watch errors and generator failures are logged; neither ends the loop.
pub fn watch(
    filter: &PathFilter,
    regenerator: &Regenerator,
    debounce: Duration,
) -> notify::Result<()> {
    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(debounce, tx)?;
    debouncer
        .watcher()
        .watch(filter.root(), RecursiveMode::Recursive)?;
    info!("watching {} for changes", filter.root().display());

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<&Path> = events
                    .iter()
                    .map(|event| event.path.as_path())
                    .filter(|path| filter.matches(path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    debug!("changed: {}", path.display());
                }
                info!("{} language file(s) changed", changed.len());
                regenerator.trigger();
            }
            Err(e) => warn!("watch error: {e}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> PathFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        PathFilter::new("/app", &patterns).unwrap()
    }

    #[test]
    fn matches_paths_relative_to_root() {
        let filter = filter(&["lang/**/*.php"]);

        assert!(filter.matches(Path::new("/app/lang/en/auth.php")));
        assert!(filter.matches(Path::new("/app/lang/en/nested/validation.php")));
        assert!(filter.matches(Path::new("lang/fr/auth.php")));
        assert!(!filter.matches(Path::new("/app/lang/en.json")));
        assert!(!filter.matches(Path::new("/app/resources/lang/en/auth.php")));
    }

    #[test]
    fn single_star_stays_in_directory() {
        let filter = filter(&["lang/*.json"]);

        assert!(filter.matches(Path::new("/app/lang/en.json")));
        assert!(!filter.matches(Path::new("/app/lang/vendor/en.json")));
    }

    #[test]
    fn any_pattern_matches() {
        let filter = filter(&["lang/**/*.php", "lang/*.json"]);

        assert!(filter.matches(Path::new("/app/lang/en.json")));
        assert!(filter.matches(Path::new("/app/lang/en/auth.php")));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(PathFilter::new("/app", &["lang/[".to_string()]).is_err());
    }
}
