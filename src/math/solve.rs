//! Dense Gauss-Jordan elimination with partial pivoting.

/// Solves `a * x = b` for a square row-major matrix `a`.
///
/// Works on an augmented `n x (n + 1)` copy. Each pivot column picks the
/// remaining row with the largest magnitude, normalizes it, then eliminates
/// that column from every other row, so the last column ends up holding `x`.
///
/// Singular or near-singular systems are not detected: the pivot division
/// lets `NaN`/`inf` flow into the result.
///
/// # Panics
///
/// Panics if `a` does not have exactly `b.len()` rows of `b.len()` entries.
pub fn solve_linear(a: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = b.len();
    assert_eq!(a.len(), n, "solve_linear: row count must match rhs length");

    let mut m: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, &rhs)| {
            assert_eq!(row.len(), n, "solve_linear: matrix must be square");
            let mut aug = Vec::with_capacity(n + 1);
            aug.extend_from_slice(row);
            aug.push(rhs);
            aug
        })
        .collect();

    for i in 0..n {
        let mut piv = i;
        for r in (i + 1)..n {
            if m[r][i].abs() > m[piv][i].abs() {
                piv = r;
            }
        }
        m.swap(i, piv);

        let diag = m[i][i];
        for c in i..=n {
            m[i][c] /= diag;
        }

        let pivot_row = m[i].clone();
        for (r, row) in m.iter_mut().enumerate() {
            if r == i {
                continue;
            }
            let factor = row[i];
            for c in i..=n {
                row[c] -= factor * pivot_row[c];
            }
        }
    }

    m.into_iter().map(|row| row[n]).collect()
}
