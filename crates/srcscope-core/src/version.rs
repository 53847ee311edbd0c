//! Release version strings of the form `year.minor-commit-hash`.
//!
//! Releases are quarterly: `minor` runs from 1 to 4 within a year.
//! Comparison only looks at `(year, minor, commit)`; two builds of the
//! same commit count as the same version whatever their hash.

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Failure to parse a version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid {field} in version string {input:?}: {source}")]
    InvalidNumber {
        field: &'static str,
        input: String,
        #[source]
        source: ParseIntError,
    },
}

/// A release version: quarterly `year.minor`, plus the commit count and hash of the build.
#[derive(Debug, Clone, Default)]
pub struct Version {
    pub year: i32,
    pub minor: i32,
    pub commit: i32,
    pub hash: String,
}

impl Version {
    pub fn new(year: i32, minor: i32, commit: i32, hash: impl Into<String>) -> Self {
        Self {
            year,
            minor,
            commit,
            hash: hash.into(),
        }
    }

    /// Advance by `releases` quarterly releases, rolling over into later years.
    ///
    /// Saturates instead of overflowing.
    pub fn add_releases(&mut self, releases: i32) -> &mut Self {
        let minor = self.minor.saturating_sub(1).saturating_add(releases);
        self.year = self.year.saturating_add(minor.div_euclid(4));
        self.minor = minor.rem_euclid(4) + 1;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.minor > 0 && self.minor < 5 && self.year > 2016
    }

    pub fn is_empty(&self) -> bool {
        self.year == 0 && self.minor == 0 && self.commit == 0
    }

    /// `year.minor`
    pub fn to_short_string(&self) -> String {
        format!("{}.{}", self.year, self.minor)
    }

    /// `year.minor.commit`
    pub fn to_display_string(&self) -> String {
        format!("{}.{}.{}", self.year, self.minor, self.commit)
    }

    fn key(&self) -> (i32, i32, i32) {
        (self.year, self.minor, self.commit)
    }
}

fn parse_field(field: &'static str, value: &str, input: &str) -> Result<i32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|source| ParseError::InvalidNumber {
            field,
            input: input.to_string(),
            source,
        })
}

impl FromStr for Version {
    type Err = ParseError;

    /// Accepts `year[.minor[.commit[-hash]]]` as well as the
    /// `year.minor-commit-hash` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut version = Version::default();
        let (year, rest) = match input.split_once('.') {
            Some((year, rest)) => (year, Some(rest)),
            None => (input, None),
        };
        version.year = parse_field("year", year, input)?;

        let Some(rest) = rest else {
            return Ok(version);
        };

        let (minor, rest) = match rest.find(|c: char| c == '.' || c == '-') {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };
        version.minor = parse_field("minor", minor, input)?;

        if let Some(rest) = rest {
            let (commit, hash) = match rest.split_once('-') {
                Some((commit, hash)) => (commit, hash),
                None => (rest, ""),
            };
            version.commit = parse_field("commit", commit, input)?;
            version.hash = hash.to_string();
        }

        Ok(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}-{}-{}",
            self.year, self.minor, self.commit, self.hash
        )
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted_form() {
        let v: Version = "2019.3.42-0af3c1d".parse().unwrap();
        assert_eq!(v.year, 2019);
        assert_eq!(v.minor, 3);
        assert_eq!(v.commit, 42);
        assert_eq!(v.hash, "0af3c1d");
    }

    #[test]
    fn test_parse_display_form() {
        let v: Version = "2020.1-17-deadbee".parse().unwrap();
        assert_eq!((v.year, v.minor, v.commit), (2020, 1, 17));
        assert_eq!(v.hash, "deadbee");
        assert_eq!(v.to_string(), "2020.1-17-deadbee");
    }

    #[test]
    fn test_parse_partial_versions() {
        let v: Version = "2018".parse().unwrap();
        assert_eq!((v.year, v.minor, v.commit), (2018, 0, 0));

        let v: Version = "2018.4".parse().unwrap();
        assert_eq!(v.to_short_string(), "2018.4");
        assert!(v.hash.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_numeric_fields() {
        assert_eq!("".parse::<Version>().unwrap_err(), ParseError::Empty);
        assert!(matches!(
            "abc.1".parse::<Version>(),
            Err(ParseError::InvalidNumber { field: "year", .. })
        ));
        assert!(matches!(
            "2019.x".parse::<Version>(),
            Err(ParseError::InvalidNumber { field: "minor", .. })
        ));
        assert!(matches!(
            "2019.2.beta-abc".parse::<Version>(),
            Err(ParseError::InvalidNumber { field: "commit", .. })
        ));
    }

    #[test]
    fn test_ordering_ignores_hash() {
        let a = Version::new(2019, 2, 10, "aaa");
        let b = Version::new(2019, 2, 10, "bbb");
        assert_eq!(a, b);

        assert!(Version::new(2018, 4, 99, "") < Version::new(2019, 1, 0, ""));
        assert!(Version::new(2019, 2, 0, "") < Version::new(2019, 3, 0, ""));
        assert!(Version::new(2019, 3, 5, "") > Version::new(2019, 3, 4, ""));
    }

    #[test]
    fn test_add_releases_wraps_quarters() {
        let mut v = Version::new(2019, 3, 0, "");
        v.add_releases(1);
        assert_eq!(v.to_short_string(), "2019.4");
        v.add_releases(1);
        assert_eq!(v.to_short_string(), "2020.1");
        v.add_releases(6);
        assert_eq!(v.to_short_string(), "2021.3");
    }

    #[test]
    fn test_add_releases_saturates_on_huge_counts() {
        let mut v = Version::new(2019, 3, 0, "");
        v.add_releases(i32::MAX);
        assert!((1..=4).contains(&v.minor));
        assert!(v.year > 2019);

        let mut v = Version::new(i32::MAX, 4, 0, "");
        v.add_releases(i32::MAX);
        assert_eq!(v.year, i32::MAX);
        assert!((1..=4).contains(&v.minor));
    }

    #[test]
    fn test_validity_and_emptiness() {
        assert!(Version::new(2019, 1, 0, "").is_valid());
        assert!(!Version::new(2016, 1, 0, "").is_valid());
        assert!(!Version::new(2019, 5, 0, "").is_valid());
        assert!(Version::default().is_empty());
        assert_eq!(Version::new(2019, 2, 7, "x").to_display_string(), "2019.2.7");
    }
}
