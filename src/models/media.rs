//! Episode-related data models.

use serde::{Deserialize, Serialize};

/// Which filename convention produced an [`EpisodeInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseKind {
    /// No convention matched.
    #[default]
    Unparsed,
    /// `Show.Name.S01E02...`
    SeasonEpisode,
    /// Looser `Show.Name.102.` / `Show.Name.S1x02.` form.
    SeasonEpisodeAlt,
    /// `Show.Name.2014.03.05...`
    AirDate,
}

impl ParseKind {
    /// Whether the season/episode fields carry meaning.
    pub fn is_season_episode(self) -> bool {
        matches!(self, ParseKind::SeasonEpisode | ParseKind::SeasonEpisodeAlt)
    }
}

impl std::fmt::Display for ParseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseKind::Unparsed => write!(f, "unparsed"),
            ParseKind::SeasonEpisode => write!(f, "season/episode"),
            ParseKind::SeasonEpisodeAlt => write!(f, "season/episode (alt)"),
            ParseKind::AirDate => write!(f, "air date"),
        }
    }
}

/// Episode metadata extracted from a downloaded filename.
///
/// Only one group of numeric fields is meaningful, selected by `parse_kind`:
/// the season/episode pair for the season variants, the aired date for
/// [`ParseKind::AirDate`]. The other group stays at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    /// Series title, separators collapsed to single spaces.
    pub show_name: String,
    /// Which heuristic matched.
    pub parse_kind: ParseKind,
    /// Season number.
    pub season_number: u32,
    /// Episode number.
    pub episode_number: u32,
    /// Aired year.
    pub aired_year: u32,
    /// Aired month.
    pub aired_month: u32,
    /// Aired day.
    pub aired_day: u32,
}

impl EpisodeInfo {
    /// Whether any heuristic recognised the filename.
    pub fn is_parsed(&self) -> bool {
        self.parse_kind != ParseKind::Unparsed
    }

    /// Season and episode, when the parse kind defines them.
    pub fn season_episode(&self) -> Option<(u32, u32)> {
        self.parse_kind
            .is_season_episode()
            .then_some((self.season_number, self.episode_number))
    }

    /// Aired year, month and day, when the parse kind defines them.
    pub fn air_date(&self) -> Option<(u32, u32, u32)> {
        (self.parse_kind == ParseKind::AirDate).then_some((
            self.aired_year,
            self.aired_month,
            self.aired_day,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unparsed() {
        let info = EpisodeInfo::default();
        assert!(!info.is_parsed());
        assert_eq!(info.season_episode(), None);
        assert_eq!(info.air_date(), None);
    }

    #[test]
    fn test_accessors_follow_parse_kind() {
        let info = EpisodeInfo {
            show_name: "The Daily Show".to_string(),
            parse_kind: ParseKind::AirDate,
            aired_year: 2014,
            aired_month: 3,
            aired_day: 5,
            ..Default::default()
        };
        assert_eq!(info.air_date(), Some((2014, 3, 5)));
        assert_eq!(info.season_episode(), None);

        let info = EpisodeInfo {
            parse_kind: ParseKind::SeasonEpisodeAlt,
            season_number: 1,
            episode_number: 3,
            ..Default::default()
        };
        assert_eq!(info.season_episode(), Some((1, 3)));
        assert_eq!(info.air_date(), None);
    }
}
