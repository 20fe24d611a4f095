//! This is the vector math module
//! Provide L2 normalization and dot product

/// Euclidean length
/// ||vec|| = sqrt(sum(vec[i]^2))
/// Accumulated in f64: squares of finite f32 values neither overflow nor
/// flush to zero there.
pub fn norm(vector: &[f32]) -> f64 {
    vector.iter()
        .map(|&x| (x as f64) * (x as f64))
        .sum::<f64>()
        .sqrt()
}

/// L2 Normalization, in place
/// vec = vec / ||vec||
/// A zero vector is left untouched, so it scores 0 against everything.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = norm(vector);
    if norm == 0.0 {
        return;
    }

    vector.iter_mut().for_each(|x| *x = (*x as f64 / norm) as f32);
}

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) for i = 0..a.len()
/// Callers guarantee equal lengths; extra trailing components are ignored.
pub fn dot_product(left: &[f32], right: &[f32]) -> f32 {
    debug_assert_eq!(left.len(), right.len());

    left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum()
}

#[cfg(test)]
mod vector_test {
    use super::*;

    // ========== L2 Normalization Tests ==========

    #[test]
    fn test_l2_normalize_basic() {
        // ||[3,4]|| = 5
        let mut vector = vec![3.0, 4.0];
        l2_normalize(&mut vector);

        assert!((vector[0] - 0.6).abs() < 1e-6);
        assert!((vector[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_is_unit_length() {
        let mut vector = vec![1.0, 2.0, 3.0, 4.0];
        l2_normalize(&mut vector);

        assert!((norm(&vector) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_negative_values() {
        let mut vector = vec![-3.0, 4.0];
        l2_normalize(&mut vector);

        assert!((vector[0] - (-0.6)).abs() < 1e-6);
        assert!((vector[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector_unchanged() {
        let mut vector = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut vector);

        assert_eq!(vector, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_l2_normalize_huge_components() {
        // Squares overflow f32
        let mut vector = vec![1e20, 1e20];
        l2_normalize(&mut vector);

        assert!((vector[0] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((vector[1] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_tiny_components() {
        // Squares flush to zero in f32
        let mut vector = vec![1e-30, 0.0];
        l2_normalize(&mut vector);

        assert!((vector[0] - 1.0).abs() < 1e-6);
        assert_eq!(vector[1], 0.0);
    }

    #[test]
    fn test_l2_normalize_empty_vector() {
        let mut vector: Vec<f32> = vec![];
        l2_normalize(&mut vector);

        assert!(vector.is_empty());
    }

    // ========== Dot Product Tests ==========

    #[test]
    fn test_dot_product_basic() {
        // 1*4 + 2*5 + 3*6 = 32
        let result = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert!((result - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        let result = dot_product(&[1.0, 0.0], &[0.0, 1.0]);
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_dot_product_zero_vector() {
        let result = dot_product(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
        assert_eq!(result, 0.0);
    }

    // ========== Integration Test ==========

    #[test]
    fn test_normalize_then_dot_product() {
        let mut v1 = vec![1.0, 0.0, 0.0];
        let mut v2 = vec![0.7, 0.7, 0.0];
        l2_normalize(&mut v1);
        l2_normalize(&mut v2);

        // v2 normalized is ~[0.707, 0.707, 0]
        assert!((dot_product(&v1, &v2) - 0.707).abs() < 0.001);
    }
}
