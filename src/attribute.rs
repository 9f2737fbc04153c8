/// The numeric attribute vector of one vertex, ordered by the graph schema.
pub type AttrVector = Vec<f64>;

/// Cosine similarity of two attribute vectors.
/// A pair whose norms multiply to zero has similarity 0.
pub fn cosine_similarity(lhs: &[f64], rhs: &[f64]) -> f64 {
    let mut numerator = 0.0f64;
    let mut lhs_norm = 0.0f64;
    let mut rhs_norm = 0.0f64;
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        numerator += a * b;
        lhs_norm += a * a;
        rhs_norm += b * b;
    }
    let denominator = lhs_norm.sqrt() * rhs_norm.sqrt();
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Per-dimension arithmetic mean of a group of attribute vectors of width `dim`.
/// An empty group yields the zero vector.
pub fn mean_vector<'a>(vectors: impl IntoIterator<Item = &'a AttrVector>, dim: usize) -> AttrVector {
    let mut sum = vec![0.0f64; dim];
    let mut count = 0usize;
    for vector in vectors {
        for (acc, value) in sum.iter_mut().zip(vector.iter()) {
            *acc += value;
        }
        count += 1;
    }
    if count > 0 {
        for acc in sum.iter_mut() {
            *acc /= count as f64;
        }
    }
    sum
}

#[cfg(test)]
mod test_attribute {
    use crate::attribute::{cosine_similarity, mean_vector};

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]) + 1.0).abs() < 1e-12);
        let half = cosine_similarity(&[1.0, 0.0], &[1.0, 3f64.sqrt()]);
        assert!((half - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_mean_vector() {
        let group = vec![vec![1.0, 2.0, 0.0], vec![3.0, 4.0, 1.0]];
        assert_eq!(mean_vector(group.iter(), 3), vec![2.0, 3.0, 0.5]);
        assert_eq!(mean_vector(std::iter::empty(), 2), vec![0.0, 0.0]);
    }
}
