//! Hierarchical version identifiers.
//!
//! A device's versions are numbered `v1`, `v2`, ... and renewals of a version `vB` are numbered
//! `R-vB-1`, `R-vB-2`, ... Two older renewal spellings still exist in stored data: `R-B` (sequence
//! implicitly 1) and `R-B.S`. Both are recognised when computing the next renewal sequence and are
//! rewritten to the current spelling at that point.

use std::fmt;

/// Spelling of a renewal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenewalFormat {
    /// `R-v<B>-<S>`
    Current,
    /// `R-<B>` or `R-<B>.<S>`
    Legacy,
}

/// A parsed version number.
///
/// Formatting always produces the current spelling, so `parse` followed by `to_string` is how a
/// legacy renewal identifier is normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionIdentifier {
    /// `v<N>` with `N >= 1`
    NewVersion(u32),
    /// Renewal number `sequence` of new version `v<base>`, both `>= 1`
    Renewal {
        base: u32,
        sequence: u32,
        format: RenewalFormat,
    },
}

impl VersionIdentifier {
    /// Current-format renewal identifier `R-v<base>-<sequence>`
    pub fn renewal(base: u32, sequence: u32) -> Self {
        Self::Renewal {
            base,
            sequence,
            format: RenewalFormat::Current,
        }
    }

    /// Parses a stored version number.
    ///
    /// # Arguments
    /// - `value` - Version number exactly as stored, no surrounding whitespace is accepted
    ///
    /// # Returns
    /// - `Some(VersionIdentifier)` - `value` is one of `v<N>`, `R-v<B>-<S>`, `R-<B>` or `R-<B>.<S>`
    ///   with all numbers made of ASCII digits and non-zero
    /// - `None` - Anything else, including hand-renamed identifiers such as `v1-beta`
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(number) = value.strip_prefix('v') {
            return parse_number(number).map(Self::NewVersion);
        }

        let rest = value.strip_prefix("R-")?;
        if let Some(current) = rest.strip_prefix('v') {
            let (base, sequence) = current.split_once('-')?;
            return Some(Self::Renewal {
                base: parse_number(base)?,
                sequence: parse_number(sequence)?,
                format: RenewalFormat::Current,
            });
        }

        let (base, sequence) = match rest.split_once('.') {
            Some((base, sequence)) => (parse_number(base)?, parse_number(sequence)?),
            None => (parse_number(rest)?, 1),
        };

        Some(Self::Renewal {
            base,
            sequence,
            format: RenewalFormat::Legacy,
        })
    }

    /// The `N` of a `v<N>` identifier
    pub fn new_version_number(&self) -> Option<u32> {
        match self {
            Self::NewVersion(number) => Some(*number),
            Self::Renewal { .. } => None,
        }
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewVersion(number) => write!(f, "v{}", number),
            Self::Renewal { base, sequence, .. } => write!(f, "R-v{}-{}", base, sequence),
        }
    }
}

fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u32>().ok().filter(|number| *number > 0)
}
