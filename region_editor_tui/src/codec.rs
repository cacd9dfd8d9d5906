//! `motion encode` / `motion decode`: hex maps to and from a row-per-line
//! grid of `0` and `1`.

use anyhow::{bail, Context, Result};
use region_editor::MotionGrid;

/// Rows of the decoded grid, padding columns left out.
pub fn decode_rows(hex: &str, columns: usize, rows: usize) -> Result<Vec<String>> {
    let grid = MotionGrid::decode(hex.trim(), columns, rows)
        .with_context(|| format!("Cannot decode motion map for a {columns}x{rows} grid"))?;
    let lines = (0..rows)
        .map(|row| {
            (0..columns)
                .map(|column| match grid.get(column, row) {
                    Some(true) => '1',
                    _ => '0',
                })
                .collect()
        })
        .collect();
    Ok(lines)
}

/// Encode rows separated by `/`, `,` or whitespace. Short rows are padded
/// with disabled cells.
pub fn encode_rows(grid: &str, columns: usize) -> Result<String> {
    let lines: Vec<&str> = grid
        .split(|c: char| c == '/' || c == ',' || c.is_whitespace())
        .filter(|line| !line.is_empty())
        .collect();
    let mut motion = MotionGrid::new(columns, lines.len())
        .with_context(|| format!("Cannot build a motion grid with {columns} columns"))?;
    for (row, line) in lines.iter().enumerate() {
        let cells = line.chars().count();
        if cells > columns {
            bail!("Row {row} has {cells} cells, the grid only has {columns} columns");
        }
        for (column, cell) in line.chars().enumerate() {
            let enabled = match cell {
                '1' | '#' => true,
                '0' | '.' => false,
                other => bail!("Unexpected cell {other:?} in row {row}, use 0/1 or ./#"),
            };
            motion.set(column, row, enabled);
        }
    }
    Ok(motion.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_row() {
        assert_eq!(encode_rows("0010", 4).unwrap(), "4");
        assert_eq!(encode_rows("..#.", 4).unwrap(), "4");
    }

    #[test]
    fn test_encode_pads_columns_and_rows() {
        assert_eq!(encode_rows("1/01", 6).unwrap(), "1020");
        assert_eq!(encode_rows("1 1", 3).unwrap(), "11");
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        assert!(encode_rows("00100", 4).is_err());
        assert!(encode_rows("0x10", 4).is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let err = encode_rows("1", usize::MAX).unwrap_err();
        assert!(err.to_string().contains("Cannot build a motion grid"));
        assert!(decode_rows("0", usize::MAX, 1).is_err());
    }

    #[test]
    fn test_decode_rows() {
        let rows = decode_rows("4F", 4, 2).unwrap();
        assert_eq!(rows, vec!["0010", "1111"]);
        // Padding columns are not shown.
        assert_eq!(decode_rows(" 80 ", 3, 2).unwrap(), vec!["000", "000"]);
    }

    #[test]
    fn test_decode_reports_grid_size() {
        let err = decode_rows("FFF", 4, 2).unwrap_err();
        assert!(err.to_string().contains("4x2"));
    }
}
