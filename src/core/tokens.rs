//! Hook command token substitution.
//!
//! Hook templates reference values such as `{oldfilepath}` or `{tvpath}`.
//! A run-scoped [`TokenSet`] holds the global values; every file gets a fresh
//! set derived from it that accumulates per-file values as processing advances.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;

/// A substitutable placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    OldFilePath,
    NewFilePath,
    ShowName,
    ShowSeasonNumber,
    ShowEpisodeNumber,
    TvPath,
    ErrorPath,
    Hash,
}

impl Token {
    pub const ALL: [Token; 8] = [
        Token::OldFilePath,
        Token::NewFilePath,
        Token::ShowName,
        Token::ShowSeasonNumber,
        Token::ShowEpisodeNumber,
        Token::TvPath,
        Token::ErrorPath,
        Token::Hash,
    ];

    /// Name between the braces.
    pub fn name(self) -> &'static str {
        match self {
            Token::OldFilePath => "oldfilepath",
            Token::NewFilePath => "newfilepath",
            Token::ShowName => "showname",
            Token::ShowSeasonNumber => "showseasonnumber",
            Token::ShowEpisodeNumber => "showepisodenumber",
            Token::TvPath => "tvpath",
            Token::ErrorPath => "errorpath",
            Token::Hash => "hash",
        }
    }

    /// Placeholder as written in templates, e.g. `{tvpath}`.
    pub fn placeholder(self) -> String {
        format!("{{{}}}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether the value describes the file being processed rather than the run.
    pub fn is_per_file(self) -> bool {
        !matches!(self, Token::TvPath | Token::ErrorPath | Token::Hash)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

/// Current placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    values: BTreeMap<Token, String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run-scoped tokens. Missing or empty optional values are left unset.
    pub fn global(tvpath: &Path, errorpath: Option<&Path>, hash: Option<&str>) -> Self {
        let mut tokens = Self::new();
        tokens.set(Token::TvPath, tvpath.display().to_string());
        if let Some(errorpath) = errorpath {
            tokens.set(Token::ErrorPath, errorpath.display().to_string());
        }
        if let Some(hash) = hash.filter(|h| !h.is_empty()) {
            tokens.set(Token::Hash, hash);
        }
        tokens
    }

    /// Fresh per-file set: the global tokens of `self` plus `{oldfilepath}`.
    pub fn for_file(&self, old_path: &Path) -> Self {
        let mut tokens = Self {
            values: self
                .values
                .iter()
                .filter(|(token, _)| !token.is_per_file())
                .map(|(token, value)| (*token, value.clone()))
                .collect(),
        };
        tokens.set(Token::OldFilePath, old_path.display().to_string());
        tokens
    }

    pub fn set(&mut self, token: Token, value: impl Into<String>) {
        self.values.insert(token, value.into());
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitute every known placeholder in `template`.
    ///
    /// Single left-to-right pass: substituted values are never rescanned.
    /// Unknown or unset placeholders stay as written.
    pub fn format(&self, template: &str) -> String {
        let Ok(re) = Regex::new(r"\{([a-z]+)\}") else {
            return template.to_string();
        };

        re.replace_all(template, |caps: &Captures<'_>| {
            Token::from_name(&caps[1])
                .and_then(|token| self.get(token))
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    }
}

/// Per-file tokens referenced by a template, which a run-scoped set cannot resolve.
pub fn unresolved_per_file(template: &str) -> Vec<Token> {
    Token::ALL
        .into_iter()
        .filter(|t| t.is_per_file() && template.contains(&t.placeholder()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_preprocess_template() {
        let mut tokens = TokenSet::new();
        tokens.set(Token::OldFilePath, r"C:\src\a.mkv");
        assert_eq!(
            tokens.format("tool.exe -file {oldfilepath}"),
            r"tool.exe -file C:\src\a.mkv"
        );
    }

    #[test]
    fn test_format_leaves_unknown_and_unset() {
        let tokens = TokenSet::global(Path::new("/tv"), None, None);
        assert_eq!(
            tokens.format("x {tvpath} {errorpath} {bogus} {hash}"),
            "x /tv {errorpath} {bogus} {hash}"
        );
    }

    #[test]
    fn test_format_does_not_rescan_values() {
        let mut tokens = TokenSet::new();
        tokens.set(Token::OldFilePath, "/dl/{showname}.mkv");
        tokens.set(Token::ShowName, "Lost");
        assert_eq!(
            tokens.format("{oldfilepath} {showname}"),
            "/dl/{showname}.mkv Lost"
        );
    }

    #[test]
    fn test_for_file_resets_per_file_tokens() {
        let global = TokenSet::global(Path::new("/tv"), Some(Path::new("/err")), Some("abc123"));
        let mut first = global.for_file(&PathBuf::from("/dl/one.mkv"));
        first.set(Token::NewFilePath, "/tv/One/Season 1/s1e01.mkv");

        let second = first.for_file(&PathBuf::from("/dl/two.mkv"));
        assert_eq!(second.get(Token::OldFilePath), Some("/dl/two.mkv"));
        assert_eq!(second.get(Token::NewFilePath), None);
        assert_eq!(second.get(Token::Hash), Some("abc123"));
        assert_eq!(second.get(Token::ErrorPath), Some("/err"));
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn test_empty_hash_is_unset() {
        let tokens = TokenSet::global(Path::new("/tv"), None, Some(""));
        assert_eq!(tokens.get(Token::Hash), None);
    }

    #[test]
    fn test_unresolved_per_file() {
        assert_eq!(
            unresolved_per_file("notify {tvpath} {newfilepath} {showname}"),
            vec![Token::NewFilePath, Token::ShowName]
        );
        assert!(unresolved_per_file("refresh {tvpath} {hash}").is_empty());
    }

    #[test]
    fn test_token_names_round_trip() {
        for token in Token::ALL {
            assert_eq!(Token::from_name(token.name()), Some(token));
            assert_eq!(token.to_string(), token.placeholder());
        }
    }
}
