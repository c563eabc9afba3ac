use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fitch sovereign credit rating, ordered from weakest to strongest.
///
/// The derived `Ord` follows declaration order, so comparing two ratings and
/// comparing their ranks always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FitchRating {
    #[serde(rename = "CCC")]
    Ccc,
    #[serde(rename = "CCC+")]
    CccPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "BB-")]
    BbMinus,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "BB+")]
    BbPlus,
    #[serde(rename = "BBB-")]
    BbbMinus,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BBB+")]
    BbbPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA+")]
    AaPlus,
    #[serde(rename = "AAA")]
    Aaa,
}

impl FitchRating {
    pub const COUNT: usize = 17;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Ccc,
            Self::CccPlus,
            Self::BMinus,
            Self::B,
            Self::BPlus,
            Self::BbMinus,
            Self::Bb,
            Self::BbPlus,
            Self::BbbMinus,
            Self::Bbb,
            Self::BbbPlus,
            Self::AMinus,
            Self::A,
            Self::APlus,
            Self::Aa,
            Self::AaPlus,
            Self::Aaa,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ccc => "CCC",
            Self::CccPlus => "CCC+",
            Self::BMinus => "B-",
            Self::B => "B",
            Self::BPlus => "B+",
            Self::BbMinus => "BB-",
            Self::Bb => "BB",
            Self::BbPlus => "BB+",
            Self::BbbMinus => "BBB-",
            Self::Bbb => "BBB",
            Self::BbbPlus => "BBB+",
            Self::AMinus => "A-",
            Self::A => "A",
            Self::APlus => "A+",
            Self::Aa => "AA",
            Self::AaPlus => "AA+",
            Self::Aaa => "AAA",
        }
    }

    /// Ordinal position on the scale, 1 (`CCC`) through 17 (`AAA`).
    pub const fn rank(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        let index = usize::from(rank).checked_sub(1)?;
        Self::ordered().get(index).copied()
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|rating| rating.label() == label)
    }
}

impl fmt::Display for FitchRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses user input: surrounding whitespace is ignored and case folded.
impl FromStr for FitchRating {
    type Err = UnknownRating;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::from_label(&normalized).ok_or_else(|| UnknownRating(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a recognized Fitch rating (expected one of CCC..AAA)")]
pub struct UnknownRating(pub String);

/// A country's position relative to the rating scale.
///
/// `BelowScale` is what an absent or unrecognized rating extracts to. It sits
/// under every real rating and carries rank 0; it is not a missing value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CreditStanding {
    #[default]
    BelowScale,
    Rated(FitchRating),
}

impl CreditStanding {
    pub const fn rank(self) -> u8 {
        match self {
            Self::BelowScale => 0,
            Self::Rated(rating) => rating.rank(),
        }
    }

    pub const fn rating(self) -> Option<FitchRating> {
        match self {
            Self::BelowScale => None,
            Self::Rated(rating) => Some(rating),
        }
    }

    /// True when this standing is strictly stronger than `threshold`.
    pub fn exceeds(self, threshold: FitchRating) -> bool {
        self > Self::Rated(threshold)
    }
}

impl fmt::Display for CreditStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowScale => f.write_str("unrated"),
            Self::Rated(rating) => write!(f, "{} (rank {})", rating, rating.rank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scale_covers_seventeen_labels_with_strictly_increasing_ranks() {
        let ordered = FitchRating::ordered();
        assert_eq!(ordered.len(), 17);

        let ranks: Vec<u8> = ordered.iter().map(|rating| rating.rank()).collect();
        assert_eq!(ranks, (1..=17).collect::<Vec<u8>>());
        assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));

        let labels: HashSet<&str> = ordered.iter().map(|rating| rating.label()).collect();
        assert_eq!(labels.len(), 17, "labels must be unique");
    }

    #[test]
    fn label_and_rank_round_trip() {
        for rating in FitchRating::ordered() {
            assert_eq!(FitchRating::from_label(rating.label()), Some(rating));
            assert_eq!(FitchRating::from_rank(rating.rank()), Some(rating));
        }
        assert_eq!(FitchRating::from_rank(0), None);
        assert_eq!(FitchRating::from_rank(18), None);
    }

    #[test]
    fn documented_anchor_ranks() {
        assert_eq!(FitchRating::Ccc.rank(), 1);
        assert_eq!(FitchRating::Bbb.rank(), 10);
        assert_eq!(FitchRating::A.rank(), 13);
        assert_eq!(FitchRating::Aaa.rank(), 17);
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(" bbb+ ".parse::<FitchRating>(), Ok(FitchRating::BbbPlus));
        assert_eq!("aa".parse::<FitchRating>(), Ok(FitchRating::Aa));
        assert_eq!(
            "Baa1".parse::<FitchRating>(),
            Err(UnknownRating("Baa1".to_string()))
        );
        assert!(FitchRating::from_label("bbb").is_none());
    }

    #[test]
    fn below_scale_sits_under_every_rating() {
        assert_eq!(CreditStanding::BelowScale.rank(), 0);
        for rating in FitchRating::ordered() {
            assert!(CreditStanding::BelowScale < CreditStanding::Rated(rating));
            assert!(!CreditStanding::BelowScale.exceeds(rating));
        }
    }

    #[test]
    fn exceeds_is_strict() {
        let standing = CreditStanding::Rated(FitchRating::A);
        assert!(standing.exceeds(FitchRating::Bbb));
        assert!(!standing.exceeds(FitchRating::A));
        assert!(!standing.exceeds(FitchRating::AaPlus));
    }
}
