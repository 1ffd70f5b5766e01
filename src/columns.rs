//! Column selection: which columns of the grid get translated.

use crate::error::RunError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Columns requested by the user, as 1-based indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnSelection {
    /// Every column of the grid, resolved against the first row's width.
    #[default]
    All,
    /// An explicit list of 1-based column numbers.
    Explicit(Vec<usize>),
}

impl ColumnSelection {
    /// Resolve the selection into a concrete, ascending, de-duplicated list of
    /// 1-based column numbers.
    ///
    /// Resolution happens once, before any task is dispatched. Every index must
    /// fall within `[1, column_count]`.
    pub fn resolve(&self, column_count: usize) -> Result<Vec<usize>, RunError> {
        match self {
            ColumnSelection::All => Ok((1..=column_count).collect()),
            ColumnSelection::Explicit(columns) => {
                let mut resolved = BTreeSet::new();
                for &column in columns {
                    if column == 0 || column > column_count {
                        return Err(RunError::ColumnOutOfRange {
                            column,
                            column_count,
                        });
                    }
                    resolved.insert(column);
                }
                Ok(resolved.into_iter().collect())
            }
        }
    }
}

impl FromStr for ColumnSelection {
    type Err = RunError;

    /// Accepts `all` (case-insensitive) or a comma-separated list like `1,3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(ColumnSelection::All);
        }

        let columns = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| RunError::Config(format!("Invalid column number: '{}'", part)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(RunError::Config(
                "Column selection is empty; use 'all' or a list like '1,2'".to_string(),
            ));
        }

        Ok(ColumnSelection::Explicit(columns))
    }
}

impl fmt::Display for ColumnSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelection::All => f.write_str("all"),
            ColumnSelection::Explicit(columns) => {
                let joined = columns
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_all_sentinel() {
        assert_eq!("all".parse::<ColumnSelection>().unwrap(), ColumnSelection::All);
        assert_eq!(" ALL ".parse::<ColumnSelection>().unwrap(), ColumnSelection::All);
    }

    #[test]
    fn test_parse_explicit_list() {
        assert_eq!(
            "1, 3,2".parse::<ColumnSelection>().unwrap(),
            ColumnSelection::Explicit(vec![1, 3, 2])
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("one".parse::<ColumnSelection>().is_err());
        assert!("1,-2".parse::<ColumnSelection>().is_err());
        assert!("".parse::<ColumnSelection>().is_err());
        assert!(" , ".parse::<ColumnSelection>().is_err());
    }

    #[test]
    fn test_resolve_all_expands_to_every_column() {
        assert_eq!(ColumnSelection::All.resolve(3).unwrap(), vec![1, 2, 3]);
        assert!(ColumnSelection::All.resolve(0).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_sorts_and_deduplicates() {
        let selection = ColumnSelection::Explicit(vec![3, 1, 3]);
        assert_eq!(selection.resolve(3).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_resolve_rejects_zero_and_out_of_range() {
        let zero = ColumnSelection::Explicit(vec![0]);
        assert!(matches!(
            zero.resolve(2),
            Err(RunError::ColumnOutOfRange { column: 0, column_count: 2 })
        ));

        let too_big = ColumnSelection::Explicit(vec![1, 3]);
        assert!(matches!(
            too_big.resolve(2),
            Err(RunError::ColumnOutOfRange { column: 3, column_count: 2 })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ColumnSelection::All.to_string(), "all");
        assert_eq!(ColumnSelection::Explicit(vec![1, 4]).to_string(), "1,4");
    }

    proptest! {
        #[test]
        fn prop_all_matches_explicit_full_range(n in 0usize..64) {
            let explicit = ColumnSelection::Explicit((1..=n).collect());
            let all = ColumnSelection::All.resolve(n).unwrap();
            if n == 0 {
                prop_assert!(all.is_empty());
            } else {
                prop_assert_eq!(all, explicit.resolve(n).unwrap());
            }
        }

        #[test]
        fn prop_resolved_columns_are_in_range(
            columns in proptest::collection::vec(1usize..20, 1..10),
            width in 1usize..20,
        ) {
            let selection = ColumnSelection::Explicit(columns.clone());
            match selection.resolve(width) {
                Ok(resolved) => {
                    prop_assert!(resolved.iter().all(|&c| c >= 1 && c <= width));
                    prop_assert!(resolved.windows(2).all(|w| w[0] < w[1]));
                }
                Err(_) => prop_assert!(columns.iter().any(|&c| c > width)),
            }
        }
    }
}
