//! Library path generator.

use crate::models::media::EpisodeInfo;
use crate::utils::text::title_case;
use std::path::{Path, PathBuf};

/// Season folder name.
///
/// Format: `Season ${season}` (aired year for date-based episodes)
pub fn generate_season_folder(season: u32) -> String {
    format!("Season {}", season)
}

/// Episode file name, `ext` including its leading dot.
///
/// Format: `s${season}e${episode2}${ext}` or `${show} ${year}-${month2}-${day2}${ext}`
pub fn generate_episode_filename(info: &EpisodeInfo, ext: &str) -> Option<String> {
    if let Some((season, episode)) = info.season_episode() {
        return Some(format!("s{}e{:02}{}", season, episode, ext));
    }
    info.air_date().map(|(year, month, day)| {
        format!(
            "{} {}-{:02}-{:02}{}",
            title_case(&info.show_name),
            year,
            month,
            day,
            ext
        )
    })
}

/// Full library destination for a parsed episode.
///
/// Returns `None` for unparsed names.
pub fn destination_for(tvpath: &Path, info: &EpisodeInfo, ext: &str) -> Option<PathBuf> {
    let season = match (info.season_episode(), info.air_date()) {
        (Some((season, _)), _) => season,
        (None, Some((year, _, _))) => year,
        (None, None) => return None,
    };
    let filename = generate_episode_filename(info, ext)?;

    Some(
        tvpath
            .join(title_case(&info.show_name))
            .join(generate_season_folder(season))
            .join(filename),
    )
}

/// Values for `{showseasonnumber}` and `{showepisodenumber}`.
///
/// Date-based episodes report the year and a `year-month-day` string.
pub fn episode_tokens(info: &EpisodeInfo) -> Option<(String, String)> {
    if let Some((season, episode)) = info.season_episode() {
        return Some((season.to_string(), episode.to_string()));
    }
    info.air_date().map(|(year, month, day)| {
        (
            year.to_string(),
            format!("{}-{:02}-{:02}", year, month, day),
        )
    })
}

/// Where an unparsed file is copied: the error directory plus its base name.
pub fn quarantine_destination(errorpath: &Path, source: &Path) -> Option<PathBuf> {
    source.file_name().map(|name| errorpath.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::ParseKind;

    fn season_episode(show: &str, season: u32, episode: u32) -> EpisodeInfo {
        EpisodeInfo {
            show_name: show.to_string(),
            parse_kind: ParseKind::SeasonEpisode,
            season_number: season,
            episode_number: episode,
            ..Default::default()
        }
    }

    #[test]
    fn test_season_episode_destination() {
        let info = season_episode("Once Upon a Time", 3, 1);
        let dest = destination_for(Path::new("/tv"), &info, ".mkv").unwrap();
        assert_eq!(
            dest,
            PathBuf::from("/tv/Once Upon A Time/Season 3/s3e01.mkv")
        );
    }

    #[test]
    fn test_air_date_destination() {
        let info = EpisodeInfo {
            show_name: "the daily show".to_string(),
            parse_kind: ParseKind::AirDate,
            aired_year: 2014,
            aired_month: 3,
            aired_day: 5,
            ..Default::default()
        };
        let dest = destination_for(Path::new("/tv"), &info, ".mp4").unwrap();
        assert_eq!(
            dest,
            PathBuf::from("/tv/The Daily Show/Season 2014/The Daily Show 2014-03-05.mp4")
        );
        assert_eq!(
            episode_tokens(&info),
            Some(("2014".to_string(), "2014-03-05".to_string()))
        );
    }

    #[test]
    fn test_unparsed_has_no_destination() {
        let info = EpisodeInfo::default();
        assert!(destination_for(Path::new("/tv"), &info, ".mkv").is_none());
        assert!(episode_tokens(&info).is_none());
    }

    #[test]
    fn test_episode_number_padding() {
        let info = season_episode("Lost", 10, 112);
        assert_eq!(
            generate_episode_filename(&info, ".avi").as_deref(),
            Some("s10e112.avi")
        );
        assert_eq!(
            episode_tokens(&info),
            Some(("10".to_string(), "112".to_string()))
        );
    }

    #[test]
    fn test_quarantine_destination() {
        let dest = quarantine_destination(Path::new("/errors"), Path::new("/src/a/randomfile.mkv"));
        assert_eq!(dest, Some(PathBuf::from("/errors/randomfile.mkv")));
    }
}
