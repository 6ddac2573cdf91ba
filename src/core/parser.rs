//! Episode filename parser.
//!
//! Extracts show name plus season/episode or aired date from downloaded
//! filenames. Conventions are tried in a fixed priority order and the first
//! match wins:
//! 1. `Show.Name.S03E01...`  (season/episode)
//! 2. `Show.Name.2014.03.05...` (air date)
//! 3. `Show.Name.301.` / `Show.Name.S3x01.` (loose season/episode)
//!
//! Unrecognised names are not errors; they come back as [`ParseKind::Unparsed`].

use crate::models::media::{EpisodeInfo, ParseKind};
use crate::utils::text::{base_name, title_case};
use crate::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Built-in conventions, highest priority first.
const DEFAULT_PATTERNS: &[(ParseKind, &str)] = &[
    (
        ParseKind::SeasonEpisode,
        r"(?i)^((?P<series_name>.+?)[. _-]+)?s(?P<season_num>\d+)[. _-]*e(?P<ep_num>\d+)(([. _-]*e|-)(?P<extra_ep_num>(!(1080|720)[pi])\d+))*[. _-]*((?P<extra_info>.+?)((![. _-])-(?P<release_group>[^-]+))?)?$",
    ),
    (
        ParseKind::AirDate,
        r"^((?P<series_name>.+?)[. _-]+)(?P<year>\d{4}).(?P<month>\d{1,2}).(?P<day>\d{1,2})",
    ),
    (
        ParseKind::SeasonEpisodeAlt,
        r"(?P<series_name>.*?)\.S?(?P<season_num>\d{1,2})[Ex-]?(?P<ep_num>\d{2})\.(.*)",
    ),
];

static DEFAULT_PARSER: LazyLock<EpisodeNameParser> = LazyLock::new(EpisodeNameParser::new);

/// One filename convention.
#[derive(Debug, Clone)]
struct EpisodeMatcher {
    kind: ParseKind,
    regex: Regex,
}

impl EpisodeMatcher {
    fn extract(&self, filename: &str) -> Option<EpisodeInfo> {
        let caps = self.regex.captures(filename)?;

        let mut info = EpisodeInfo {
            show_name: normalize_show_name(capture(&caps, "series_name")),
            parse_kind: self.kind,
            ..Default::default()
        };

        match self.kind {
            ParseKind::SeasonEpisode | ParseKind::SeasonEpisodeAlt => {
                info.season_number = number(&caps, "season_num");
                info.episode_number = number(&caps, "ep_num");
            }
            ParseKind::AirDate => {
                info.aired_year = number(&caps, "year");
                info.aired_month = number(&caps, "month");
                info.aired_day = number(&caps, "day");
            }
            ParseKind::Unparsed => {}
        }

        Some(info)
    }
}

/// Ordered cascade of filename conventions.
#[derive(Debug, Clone)]
pub struct EpisodeNameParser {
    matchers: Vec<EpisodeMatcher>,
}

impl EpisodeNameParser {
    /// Create a parser with the built-in conventions.
    pub fn new() -> Self {
        let matchers = DEFAULT_PATTERNS
            .iter()
            .filter_map(|(kind, pattern)| match Regex::new(pattern) {
                Ok(regex) => Some(EpisodeMatcher { kind: *kind, regex }),
                Err(e) => {
                    tracing::error!("Invalid {} pattern: {}", kind, e);
                    None
                }
            })
            .collect();

        Self { matchers }
    }

    /// Append a convention tried after all existing ones.
    ///
    /// The pattern needs a `series_name` group plus `season_num`/`ep_num`
    /// or `year`/`month`/`day` depending on `kind`.
    pub fn with_matcher(mut self, kind: ParseKind, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| crate::Error::other(format!("Invalid pattern '{}': {}", pattern, e)))?;
        self.matchers.push(EpisodeMatcher { kind, regex });
        Ok(self)
    }

    /// Parse a filename or path. Never fails; unknown names yield `Unparsed`.
    pub fn parse(&self, filename: &str) -> EpisodeInfo {
        let filename = base_name(filename);
        if filename.trim().is_empty() {
            return EpisodeInfo::default();
        }

        self.matchers
            .iter()
            .find_map(|m| m.extract(filename))
            .unwrap_or_default()
    }
}

impl Default for EpisodeNameParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a filename with the built-in conventions (convenience function).
pub fn parse_episode(filename: &str) -> EpisodeInfo {
    DEFAULT_PARSER.parse(filename)
}

fn capture<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

/// Numeric capture, zero when missing or unparseable.
fn number(caps: &Captures<'_>, name: &str) -> u32 {
    capture(caps, name).parse().unwrap_or(0)
}

fn normalize_show_name(raw: &str) -> String {
    let mut collapsed = raw.trim().to_string();
    if let Ok(re) = Regex::new(r"[\W_]+") {
        collapsed = re.replace_all(&collapsed, " ").into_owned();
    }
    title_case(collapsed.trim())
}
