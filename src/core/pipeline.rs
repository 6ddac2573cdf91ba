//! Move pipeline.
//!
//! Drives a `plexbot move` run:
//! 1. Check the source directory and the TV library root exist
//! 2. Find video files below the source directory
//! 3. For each file: preprocess hooks, parse, copy into the library
//!    (or the error directory when unparsed), postprocess hooks
//! 4. Run the postprocessall hooks once
//!
//! Files are handled strictly one at a time. A failing file never stops the run.

use crate::core::hooks::{HookPolicy, HookRunner, StageReport};
use crate::core::parser::EpisodeNameParser;
use crate::core::scanner;
use crate::core::tokens::{Token, TokenSet};
use crate::generators::path::{destination_for, episode_tokens, quarantine_destination};
use crate::models::config::{Config, HookStage};
use crate::utils::fs::{copy_file, create_dir_all, extension_with_dot};
use crate::utils::text::title_case;
use crate::Result;
use std::path::{Path, PathBuf};

/// Terminal state of one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Copied into the TV library.
    Relocated { from: PathBuf, to: PathBuf },
    /// Name not recognised, copied into the error directory. `replaced` is
    /// set when an earlier file with the same name was overwritten there.
    Quarantined {
        from: PathBuf,
        to: PathBuf,
        replaced: bool,
    },
    /// Copy failed; the file stays where it was.
    FailedCopy { from: PathBuf, error: String },
    /// Name not recognised and no error directory is configured.
    Skipped { from: PathBuf },
}

impl FileOutcome {
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Relocated { from, .. }
            | FileOutcome::Quarantined { from, .. }
            | FileOutcome::FailedCopy { from, .. }
            | FileOutcome::Skipped { from } => from,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One entry per discovered file, in processing order.
    pub outcomes: Vec<FileOutcome>,
    /// Report of the postprocessall stage.
    pub postprocess_all: StageReport,
}

impl RunSummary {
    pub fn found(&self) -> usize {
        self.outcomes.len()
    }

    pub fn relocated(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Relocated { .. }))
    }

    pub fn quarantined(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Quarantined { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::FailedCopy { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Moves downloaded episodes into the TV library.
pub struct MovePipeline {
    config: Config,
    hash: Option<String>,
    parser: EpisodeNameParser,
    hooks: HookRunner,
}

impl MovePipeline {
    /// Create a pipeline from configuration and the caller-supplied `{hash}`.
    pub fn new(config: Config, hash: Option<String>) -> Self {
        let hooks = HookRunner::new(HookPolicy::from(&config.hooks));
        Self {
            config,
            hash,
            parser: EpisodeNameParser::new(),
            hooks,
        }
    }

    /// Replace the filename parser.
    pub fn with_parser(mut self, parser: EpisodeNameParser) -> Self {
        self.parser = parser;
        self
    }

    /// Replace the hook policy from the configuration.
    pub fn with_hook_policy(mut self, policy: HookPolicy) -> Self {
        self.hooks = HookRunner::new(policy);
        self
    }

    /// Process every video file below `source`.
    ///
    /// Only a missing source directory or TV library aborts the run; those
    /// are checked before any file or hook is touched.
    pub async fn run(&self, source: &Path) -> Result<RunSummary> {
        let tvpath = self.check_preconditions(source)?;

        let files = scanner::find_video_files(source)?;
        tracing::info!("Found {} file(s) to process", files.len());

        let global = TokenSet::global(
            tvpath,
            self.config.plex.errorpath.as_deref(),
            self.hash.as_deref(),
        );

        let mut summary = RunSummary::default();
        for file in &files {
            let outcome = self.process_file(file, tvpath, &global).await;
            summary.outcomes.push(outcome);
        }

        summary.postprocess_all = self
            .hooks
            .run_stage(
                HookStage::PostprocessAll,
                self.config.hook_templates(HookStage::PostprocessAll),
                &global,
            )
            .await;

        Ok(summary)
    }

    fn check_preconditions(&self, source: &Path) -> Result<&Path> {
        let tvpath = self.config.plex.tvpath.as_deref();
        if let Some(tvpath) = tvpath {
            tracing::info!("Plex TV library path: {}", tvpath.display());
        }
        tracing::info!("Looking for files in: {}...", source.display());

        if !source.is_dir() {
            let err = crate::Error::SourceNotFound(source.display().to_string());
            tracing::error!("{}", err);
            return Err(err);
        }

        let tvpath = tvpath.ok_or_else(|| {
            tracing::error!("{}", crate::Error::LibraryNotConfigured);
            crate::Error::LibraryNotConfigured
        })?;
        if !tvpath.is_dir() {
            let err = crate::Error::LibraryNotFound(tvpath.display().to_string());
            tracing::error!("{}", err);
            return Err(err);
        }

        Ok(tvpath)
    }

    async fn process_file(&self, file: &Path, tvpath: &Path, global: &TokenSet) -> FileOutcome {
        tracing::info!("- Found file {}...", file.display());

        let mut tokens = global.for_file(file);

        let pre = self
            .hooks
            .run_stage(
                HookStage::Preprocess,
                self.config.hook_templates(HookStage::Preprocess),
                &tokens,
            )
            .await;

        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let info = self.parser.parse(&filename);

        let ext = extension_with_dot(file);
        let Some(dest) = destination_for(tvpath, &info, &ext) else {
            return self.quarantine(file).await;
        };
        tracing::debug!("Parsed {} as {}: {:?}", filename, info.parse_kind, info);
        if info.show_name.is_empty() {
            tracing::warn!("No show name found in {}", filename);
        }

        let (season_token, episode_token) = episode_tokens(&info).unwrap_or_default();
        tokens.set(Token::NewFilePath, dest.display().to_string());
        tokens.set(Token::ShowName, title_case(&info.show_name));
        tokens.set(Token::ShowSeasonNumber, season_token);
        tokens.set(Token::ShowEpisodeNumber, episode_token);

        if let Some(parent) = dest.parent() {
            if let Err(e) = create_dir_all(parent) {
                tracing::error!("Could not create {}: {}", parent.display(), e);
                return FileOutcome::FailedCopy {
                    from: file.to_path_buf(),
                    error: e.to_string(),
                };
            }
        }

        tracing::info!("-- Moving to {}", dest.display());
        if let Err(e) = copy_in_background(file, &dest).await {
            tracing::error!("{}", e);
            return FileOutcome::FailedCopy {
                from: file.to_path_buf(),
                error: e.to_string(),
            };
        }

        if pre.aborted {
            tracing::warn!("Skipping postprocess hooks for {}", file.display());
        } else {
            self.hooks
                .run_stage(
                    HookStage::Postprocess,
                    self.config.hook_templates(HookStage::Postprocess),
                    &tokens,
                )
                .await;
        }

        FileOutcome::Relocated {
            from: file.to_path_buf(),
            to: dest,
        }
    }

    /// Copy an unrecognised file into the error directory.
    async fn quarantine(&self, file: &Path) -> FileOutcome {
        let Some(errorpath) = self.config.plex.errorpath.as_deref() else {
            tracing::error!(
                "Could not determine show information for {} and plex.errorpath is not set",
                file.display()
            );
            return FileOutcome::Skipped {
                from: file.to_path_buf(),
            };
        };

        let failed = |error: String| FileOutcome::FailedCopy {
            from: file.to_path_buf(),
            error,
        };

        let Some(dest) = quarantine_destination(errorpath, file) else {
            return failed(format!("no file name in {}", file.display()));
        };

        if let Err(e) = create_dir_all(errorpath) {
            tracing::error!("Could not create {}: {}", errorpath.display(), e);
            return failed(e.to_string());
        }

        tracing::info!(
            "-- Could not determine show information, copying to {}",
            dest.display()
        );
        let replaced = dest.exists();
        if replaced {
            tracing::warn!("{} already exists and will be overwritten", dest.display());
        }
        if let Err(e) = copy_in_background(file, &dest).await {
            tracing::error!("{}", e);
            return failed(e.to_string());
        }

        FileOutcome::Quarantined {
            from: file.to_path_buf(),
            to: dest,
            replaced,
        }
    }
}

/// Run the blocking copy off the async runtime threads.
async fn copy_in_background(from: &Path, to: &Path) -> Result<()> {
    let (from, to) = (from.to_path_buf(), to.to_path_buf());
    tokio::task::spawn_blocking(move || copy_file(&from, &to))
        .await
        .map_err(|e| crate::Error::other(format!("copy task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            outcomes: vec![
                FileOutcome::Relocated {
                    from: PathBuf::from("/dl/a.mkv"),
                    to: PathBuf::from("/tv/A/Season 1/s1e01.mkv"),
                },
                FileOutcome::Quarantined {
                    from: PathBuf::from("/dl/b.mkv"),
                    to: PathBuf::from("/err/b.mkv"),
                    replaced: false,
                },
                FileOutcome::FailedCopy {
                    from: PathBuf::from("/dl/c.mkv"),
                    error: "denied".to_string(),
                },
                FileOutcome::Skipped {
                    from: PathBuf::from("/dl/d.mkv"),
                },
            ],
            postprocess_all: StageReport::default(),
        };

        assert_eq!(summary.found(), 4);
        assert_eq!(summary.relocated(), 1);
        assert_eq!(summary.quarantined(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.outcomes[2].source(), Path::new("/dl/c.mkv"));
    }

    // End-to-end runs live in tests/pipeline_tests.rs
}
