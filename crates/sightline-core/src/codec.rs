//! Run-length encoding of grid rows.
//!
//! A row is stored as comma-separated run lengths that alternate between
//! walkable and blocked cells, always starting with a walkable run (which may
//! be `0`). For example `[., ., #, #, #, .]` encodes to `"2,3,1"` and a row
//! starting with a wall encodes with a leading `0`.

use crate::error::GridError;

/// Encode one row of occupancy values.
pub fn encode_row(row: &[bool]) -> String {
    let mut runs: Vec<usize> = Vec::new();
    let mut current = true;
    let mut len = 0;
    for &w in row {
        if w == current {
            len += 1;
        } else {
            runs.push(len);
            current = w;
            len = 1;
        }
    }
    runs.push(len);
    runs.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode one row produced by [`encode_row`].
///
/// `row` is only used for error reporting. The decoded runs must add up to
/// exactly `cols` cells.
pub fn decode_row(encoded: &str, cols: usize, row: usize) -> Result<Vec<bool>, GridError> {
    let mut out = Vec::new();
    let mut walkable = true;
    for token in encoded.split(',') {
        let token = token.trim();
        let n: usize = token.parse().map_err(|_| GridError::InvalidRun {
            row,
            token: token.to_string(),
        })?;
        if n > cols - out.len() {
            return Err(GridError::RowLength {
                row,
                expected: cols,
                found: out.len().saturating_add(n),
            });
        }
        out.extend(std::iter::repeat_n(walkable, n));
        walkable = !walkable;
    }
    if out.len() != cols {
        return Err(GridError::RowLength {
            row,
            expected: cols,
            found: out.len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_mixed_row() {
        let row = [true, true, false, false, false, true];
        assert_eq!(encode_row(&row), "2,3,1");
    }

    #[test]
    fn encode_leading_wall() {
        assert_eq!(encode_row(&[false, false, true]), "0,2,1");
        assert_eq!(encode_row(&[false]), "0,1");
    }

    #[test]
    fn encode_uniform_rows() {
        assert_eq!(encode_row(&[true; 4]), "4");
        assert_eq!(encode_row(&[]), "0");
    }

    #[test]
    fn decode_restores_row() {
        let row = vec![false, true, true, false, true, false, false];
        let enc = encode_row(&row);
        assert_eq!(decode_row(&enc, row.len(), 0).unwrap(), row);
    }

    #[test]
    fn decode_rejects_bad_token() {
        let err = decode_row("2,x,1", 4, 3).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidRun {
                row: 3,
                token: "x".into()
            }
        );
    }

    #[test]
    fn decode_rejects_short_and_long_rows() {
        assert_eq!(
            decode_row("2,1", 5, 0).unwrap_err(),
            GridError::RowLength {
                row: 0,
                expected: 5,
                found: 3
            }
        );
        assert_eq!(
            decode_row("4,4", 5, 1).unwrap_err(),
            GridError::RowLength {
                row: 1,
                expected: 5,
                found: 8
            }
        );
    }

    #[test]
    fn decode_rejects_oversized_run() {
        assert_eq!(
            decode_row("1,18446744073709551615", 4, 2).unwrap_err(),
            GridError::RowLength {
                row: 2,
                expected: 4,
                found: usize::MAX
            }
        );
        assert!(decode_row("18446744073709551615", usize::MAX - 1, 0).is_err());
    }
}
