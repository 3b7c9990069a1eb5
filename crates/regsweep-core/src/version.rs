//! Tag version ranking.
//!
//! Registry tags are free-form strings. [`rank_key`] maps every tag onto a
//! [`VersionKey`] so that the tags of a repository can be ordered newest-first:
//!
//! - `latest` → always the newest tag
//! - `1.4.2`, `v2.0.0-rc1` → dotted version comparison
//! - `42` → numbered CI build, below every release
//! - `master-3f2a9c1` → legacy branch build, below numbered builds
//! - `stable`, `sha-abc` → text-leading tag, below everything else

use std::cmp::{Ordering, Reverse};
use std::fmt;

/// The floating tag that always ranks first.
pub const LATEST_TAG: &str = "latest";

/// Prefix of legacy branch-build tags.
pub const BRANCH_PREFIX: &str = "master-";

const BUILD_QUALIFIER: &str = "build";

/// Ordering tier of a tag. Tiers compare before the version payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Tags that do not start with a number, such as `stable` or `dev`.
    Opaque,

    /// Legacy `master-*` branch builds.
    Branch,

    /// Purely numeric CI build tags.
    Build,

    /// Tags starting with a number, compared as a dotted version.
    Release,

    /// The floating `latest` marker.
    Latest,
}

/// Decimal number of arbitrary length, stored without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeral(String);

impl Numeral {
    /// Creates a numeral from a run of ASCII digits.
    #[must_use]
    pub fn new(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the normalized digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for Numeral {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Numeral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single component of a [`DottedVersion`].
///
/// Text sorts before numbers at the same position, so `1.0.rc1` is older
/// than `1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Textual qualifier such as `rc`, `beta` or a commit hash fragment.
    Text(String),

    /// Numeric component.
    Number(Numeral),
}

impl Segment {
    /// How a version carrying this segment past the end of a shorter, otherwise
    /// equal version compares against it.
    const fn trailing_order(&self) -> Ordering {
        match self {
            Self::Text(_) => Ordering::Less,
            Self::Number(_) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => write!(f, "{}", number.as_str()),
        }
    }
}

/// A version split into numeric and textual segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DottedVersion {
    segments: Vec<Segment>,
}

impl DottedVersion {
    /// The `0.0.0` base that build and branch tags are anchored to.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            segments: vec![
                Segment::Number(Numeral::new("0")),
                Segment::Number(Numeral::new("0")),
                Segment::Number(Numeral::new("0")),
            ],
        }
    }

    /// Parses a tag into segments.
    ///
    /// Separators are `.`, `-`, `_` and `+`; a run of digits next to letters
    /// forms its own segment (`rc12` → `rc`, `12`). A `v` directly followed by
    /// a digit at the start is dropped. Parsing never fails: an empty or
    /// separator-only tag yields an empty version.
    ///
    /// # Examples
    ///
    /// ```
    /// use regsweep_core::DottedVersion;
    ///
    /// assert!(DottedVersion::parse("1.10.0") > DottedVersion::parse("1.9.3"));
    /// assert!(DottedVersion::parse("2.0.0-rc1") < DottedVersion::parse("2.0.0"));
    /// assert_eq!(DottedVersion::parse("v1.2"), DottedVersion::parse("1.2"));
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = match input.strip_prefix(['v', 'V']) {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
            _ => input,
        };

        let mut segments = Vec::new();
        for part in input.split(['.', '-', '_', '+']) {
            let mut rest = part;
            while let Some(first) = rest.chars().next() {
                let numeric = first.is_ascii_digit();
                let end = rest
                    .find(|c: char| c.is_ascii_digit() != numeric)
                    .unwrap_or(rest.len());
                let (run, tail) = rest.split_at(end);
                segments.push(if numeric {
                    Segment::Number(Numeral::new(run))
                } else {
                    Segment::Text(run.to_string())
                });
                rest = tail;
            }
        }

        Self { segments }
    }

    /// Appends the segments of `qualifier` after this version.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Self) -> Self {
        self.segments.extend(qualifier.segments);
        self
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.segments.iter();
        let mut right = other.segments.iter();

        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (Some(a), Some(b)) => match a.cmp(b) {
                    Ordering::Equal => {}
                    ordering => return ordering,
                },
                (Some(extra), None) => return extra.trailing_order(),
                (None, Some(extra)) => return extra.trailing_order().reverse(),
            }
        }
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Comparable ranking key derived from a tag.
///
/// Keys compare by [`Tier`] first and by [`DottedVersion`] within a tier. A
/// greater key means a newer tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    tier: Tier,
    version: DottedVersion,
}

impl VersionKey {
    /// The key of the `latest` tag, greater than every other key.
    #[must_use]
    pub fn latest() -> Self {
        Self {
            tier: Tier::Latest,
            version: DottedVersion::default(),
        }
    }

    /// Returns the ordering tier.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Returns the version payload.
    #[must_use]
    pub const fn version(&self) -> &DottedVersion {
        &self.version
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            Tier::Latest => write!(f, "latest"),
            Tier::Build => write!(f, "build {}", self.version),
            Tier::Branch => write!(f, "branch {}", self.version),
            Tier::Release => write!(f, "release {}", self.version),
            Tier::Opaque => write!(f, "opaque {}", self.version),
        }
    }
}

/// Computes the ranking key of a tag.
///
/// Tags that parse to nothing or start with text fall into [`Tier::Opaque`]
/// and rank below numbered builds and branch builds.
///
/// # Examples
///
/// ```
/// use regsweep_core::{rank_key, Tier};
///
/// assert_eq!(rank_key("latest").tier(), Tier::Latest);
/// assert_eq!(rank_key("1234").tier(), Tier::Build);
/// assert_eq!(rank_key("master-3f2a9c1").tier(), Tier::Branch);
/// assert!(rank_key("10") > rank_key("9"));
/// assert!(rank_key("1.0.0") > rank_key("master-3f2a9c1"));
/// assert!(rank_key("stable") < rank_key("1234"));
/// ```
#[must_use]
pub fn rank_key(tag: &str) -> VersionKey {
    if tag == LATEST_TAG {
        return VersionKey::latest();
    }

    if !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit()) {
        let qualifier = DottedVersion {
            segments: vec![
                Segment::Text(BUILD_QUALIFIER.to_string()),
                Segment::Number(Numeral::new(tag)),
            ],
        };
        return VersionKey {
            tier: Tier::Build,
            version: DottedVersion::zero().with_qualifier(qualifier),
        };
    }

    if tag.starts_with(BRANCH_PREFIX) {
        return VersionKey {
            tier: Tier::Branch,
            version: DottedVersion::zero().with_qualifier(DottedVersion::parse(tag)),
        };
    }

    let version = DottedVersion::parse(tag);
    let tier = match version.segments().first() {
        Some(Segment::Number(_)) => Tier::Release,
        _ => Tier::Opaque,
    };
    VersionKey { tier, version }
}

/// Compares two tags by rank, newest first.
#[must_use]
pub fn compare_newest_first(a: &str, b: &str) -> Ordering {
    rank_key(b).cmp(&rank_key(a))
}

/// Sorts tags newest-first. Tags with equal keys keep their input order.
pub fn sort_newest_first<T: AsRef<str>>(tags: &mut [T]) {
    tags.sort_by_cached_key(|tag| Reverse(rank_key(tag.as_ref())));
}
