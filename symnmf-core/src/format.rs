//! Text rendering of result matrices.
//!
//! Consumers expect every value with 4 decimals, comma separated within a row
//! and one newline-terminated line per row, e.g.
//!
//! ```text
//! 0.0000,0.1353
//! 0.1353,0.0000
//! ```

use std::fmt::Write;

use crate::matrix::Matrix;

pub const DECIMALS: usize = 4;

pub fn format_row(row: &[f64]) -> String {
    let mut line = String::with_capacity(row.len() * 8);
    for (j, v) in row.iter().enumerate() {
        if j > 0 {
            line.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(line, "{:.*}", DECIMALS, v);
    }
    line
}

pub fn format_matrix(matrix: &Matrix) -> String {
    let mut out = String::with_capacity(matrix.nrows() * (matrix.ncols() * 8 + 1));
    for row in matrix.rows() {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}
