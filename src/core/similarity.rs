//! Character-level string similarity.
//!
//! Used as the location fallback when an address cannot be resolved to
//! coordinates.

/// A similarity measure returning a ratio in [0, 1]
pub trait StringSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Ratcliff/Obershelp "gestalt pattern matching"
///
/// ratio = 2 * M / (len(a) + len(b)), where M is the number of characters in
/// the matching blocks found by repeatedly taking the longest common block
/// and recursing on the pieces to its left and right.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestaltSimilarity;

impl StringSimilarity for GestaltSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        gestalt_ratio(a, b)
    }
}

/// Gestalt ratio over Unicode scalar values. Two empty strings are identical.
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as (i, j, size).
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    let width = bhi - blo;

    // run[col] = length of the common suffix ending at a[i] and b[blo + col - 1]
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let run = previous[col - 1] + 1;
                current[col] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            } else {
                current[col] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_and_empty() {
        assert!(approx(gestalt_ratio("new york", "new york"), 1.0));
        assert!(approx(gestalt_ratio("", ""), 1.0));
        assert!(approx(gestalt_ratio("boston", ""), 0.0));
        assert!(approx(gestalt_ratio("", "boston"), 0.0));
    }

    #[test]
    fn test_disjoint_characters() {
        assert!(approx(gestalt_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_known_ratios() {
        // single shared block "bcd"
        assert!(approx(gestalt_ratio("abcd", "bcde"), 0.75));
        // blocks "ab" and "cd"
        assert!(approx(gestalt_ratio("abxcd", "abcd"), 8.0 / 9.0));
    }

    #[test]
    fn test_block_order_matters() {
        // Longest block "abc" is taken first; nothing can match to its left in b
        // afterwards, so the leading "x" is lost even though an LCS would keep it.
        assert!(approx(gestalt_ratio("xabc", "abcx"), 6.0 / 8.0));
    }

    #[test]
    fn test_case_sensitive_by_itself() {
        assert!(gestalt_ratio("New York", "new york") < 1.0);
    }

    #[test]
    fn test_multibyte_characters() {
        assert!(approx(gestalt_ratio("Zürich", "Zürich"), 1.0));
        assert!(approx(gestalt_ratio("Zürich", "Zurich"), 10.0 / 12.0));
    }

    #[test]
    fn test_trait_object() {
        let similarity: Box<dyn StringSimilarity> = Box::new(GestaltSimilarity);
        assert!(approx(similarity.similarity("abcd", "bcde"), 0.75));
    }
}
