use super::indicator::Indicator;
use super::thresholds::CriteriaError;
use serde::Serialize;

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = Indicator::COUNT as u8;

/// Importance rank 1 (most important) maps to the largest weight.
pub const fn weight_for_rank(rank: u8) -> u8 {
    MAX_RANK + 1 - rank
}

/// User-assigned importance ranks, guaranteed to be a permutation of 1..=5
/// over the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rankings {
    ranks: [u8; Indicator::COUNT],
}

impl Rankings {
    /// `ranks` is ordered like [`Indicator::ordered`].
    pub fn new(ranks: [u8; Indicator::COUNT]) -> Result<Self, CriteriaError> {
        let mut owners: [Option<Indicator>; Indicator::COUNT] = [None; Indicator::COUNT];

        for (indicator, rank) in Indicator::ordered().into_iter().zip(ranks) {
            if !(MIN_RANK..=MAX_RANK).contains(&rank) {
                return Err(CriteriaError::InvalidRank {
                    indicator: indicator.key(),
                    value: rank.to_string(),
                });
            }

            let slot = &mut owners[usize::from(rank - MIN_RANK)];
            if let Some(first) = *slot {
                return Err(CriteriaError::DuplicateRank {
                    rank,
                    first: first.key(),
                    second: indicator.key(),
                });
            }
            *slot = Some(indicator);
        }

        Ok(Self { ranks })
    }

    /// Parses a comma-separated list such as `1,3,2,5,4`.
    pub fn parse_list(raw: &str) -> Result<Self, CriteriaError> {
        let pieces: Vec<&str> = raw.split(',').map(str::trim).collect();
        if pieces.len() != Indicator::COUNT {
            return Err(CriteriaError::RankCount {
                expected: Indicator::COUNT,
                actual: pieces.len(),
            });
        }

        let mut ranks = [0u8; Indicator::COUNT];
        for ((slot, piece), indicator) in ranks.iter_mut().zip(pieces).zip(Indicator::ordered()) {
            *slot = parse_rank(indicator, piece)?;
        }
        Self::new(ranks)
    }

    pub fn rank(&self, indicator: Indicator) -> u8 {
        self.ranks[indicator.index()]
    }

    pub fn weight(&self, indicator: Indicator) -> u8 {
        weight_for_rank(self.rank(indicator))
    }

    pub fn weights(&self) -> impl Iterator<Item = (Indicator, u8)> + '_ {
        Indicator::ordered()
            .into_iter()
            .map(move |indicator| (indicator, self.weight(indicator)))
    }

    pub fn total_weight(&self) -> u32 {
        self.weights().map(|(_, weight)| u32::from(weight)).sum()
    }
}

/// Parses a single rank answer; range is checked, uniqueness is not.
pub fn parse_rank(indicator: Indicator, raw: &str) -> Result<u8, CriteriaError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|rank| (MIN_RANK..=MAX_RANK).contains(rank))
        .ok_or_else(|| CriteriaError::InvalidRank {
            indicator: indicator.key(),
            value: raw.trim().to_string(),
        })
}
