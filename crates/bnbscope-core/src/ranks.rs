//! Borough rank reference data.
//!
//! Investment and crime ranks are static, externally supplied reference
//! data: one row per borough, each rank column a permutation of 1..=5
//! (1 = best investment / safest). The table is loaded once at process
//! start, validated, and passed through the reconciler as a parameter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::borough::Borough;
use crate::error::{Result, ScopeError};

/// Per-borough rank pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoroughRanks {
    /// 1-5, lower = better investment
    pub investment_rank: u8,
    /// 1-5, lower = safer
    pub crime_rank: u8,
}

/// Validated total lookup from borough to its rank pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Borough, BoroughRanks>")]
#[serde(into = "BTreeMap<Borough, BoroughRanks>")]
pub struct RankTable {
    entries: BTreeMap<Borough, BoroughRanks>,
}

impl RankTable {
    /// Build a table from explicit entries, validating totality and that
    /// both rank columns are permutations of 1..=5.
    pub fn new(entries: BTreeMap<Borough, BoroughRanks>) -> Result<Self> {
        for borough in Borough::ALL {
            if !entries.contains_key(&borough) {
                return Err(ScopeError::InvalidRankTable {
                    reason: format!("missing entry for {}", borough),
                });
            }
        }

        for (label, pick) in [
            ("investment_rank", true),
            ("crime_rank", false),
        ] {
            let mut seen = [false; 5];
            for (borough, ranks) in &entries {
                let rank = if pick {
                    ranks.investment_rank
                } else {
                    ranks.crime_rank
                };
                if !(1..=5).contains(&rank) {
                    return Err(ScopeError::InvalidRankTable {
                        reason: format!("{} {} for {} is out of range 1-5", label, rank, borough),
                    });
                }
                let slot = &mut seen[(rank - 1) as usize];
                if *slot {
                    return Err(ScopeError::InvalidRankTable {
                        reason: format!("duplicate {} {} (ranks must be unique)", label, rank),
                    });
                }
                *slot = true;
            }
        }

        Ok(RankTable { entries })
    }

    /// The ranks for a borough. Total by construction.
    pub fn get(&self, borough: Borough) -> BoroughRanks {
        self.entries[&borough]
    }
}

impl Default for RankTable {
    /// The table the dashboard ships with.
    fn default() -> Self {
        let entries = BTreeMap::from([
            (
                Borough::Manhattan,
                BoroughRanks {
                    investment_rank: 1,
                    crime_rank: 4,
                },
            ),
            (
                Borough::Queens,
                BoroughRanks {
                    investment_rank: 2,
                    crime_rank: 3,
                },
            ),
            (
                Borough::StatenIsland,
                BoroughRanks {
                    investment_rank: 3,
                    crime_rank: 5,
                },
            ),
            (
                Borough::Bronx,
                BoroughRanks {
                    investment_rank: 4,
                    crime_rank: 2,
                },
            ),
            (
                Borough::Brooklyn,
                BoroughRanks {
                    investment_rank: 5,
                    crime_rank: 1,
                },
            ),
        ]);
        RankTable { entries }
    }
}

impl TryFrom<BTreeMap<Borough, BoroughRanks>> for RankTable {
    type Error = ScopeError;

    fn try_from(entries: BTreeMap<Borough, BoroughRanks>) -> Result<Self> {
        RankTable::new(entries)
    }
}

impl From<RankTable> for BTreeMap<Borough, BoroughRanks> {
    fn from(table: RankTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = RankTable::default();
        assert_eq!(table.get(Borough::Manhattan).investment_rank, 1);
        assert_eq!(table.get(Borough::Brooklyn).investment_rank, 5);
        assert_eq!(table.get(Borough::StatenIsland).crime_rank, 5);
    }

    #[test]
    fn test_missing_borough_rejected() {
        let mut entries: BTreeMap<_, _> = BTreeMap::from(RankTable::default());
        entries.remove(&Borough::Queens);
        let err = RankTable::new(entries).unwrap_err();
        assert!(err.to_string().contains("missing entry for Queens"));
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let mut entries: BTreeMap<_, _> = BTreeMap::from(RankTable::default());
        entries.get_mut(&Borough::Bronx).unwrap().investment_rank = 1;
        let err = RankTable::new(entries).unwrap_err();
        assert!(matches!(err, ScopeError::InvalidRankTable { .. }));
    }

    #[test]
    fn test_out_of_range_rank_rejected() {
        let mut entries: BTreeMap<_, _> = BTreeMap::from(RankTable::default());
        entries.get_mut(&Borough::Bronx).unwrap().crime_rank = 0;
        let err = RankTable::new(entries).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_toml_deserialization_validates() {
        let toml = r#"
            [Manhattan]
            investment_rank = 1
            crime_rank = 1

            [Brooklyn]
            investment_rank = 2
            crime_rank = 1

            [Queens]
            investment_rank = 3
            crime_rank = 3

            [Bronx]
            investment_rank = 4
            crime_rank = 4

            ["Staten Island"]
            investment_rank = 5
            crime_rank = 5
        "#;
        // duplicate crime_rank 1 must be rejected at parse time
        let result: std::result::Result<RankTable, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
