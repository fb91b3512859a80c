use ndarray::{ArrayD, ArrayViewD, Zip};

use crate::error::DiceError;

/// Overlap of one label between two volumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiceResult {
    pub label: i64,
    pub volume1: u64,
    pub volume2: u64,
    pub intersection: u64,
    pub score: f64,
}

/// Boolean mask, true where the voxel equals `label`.
pub fn label_mask(volume: &ArrayViewD<'_, f64>, label: i64) -> ArrayD<bool> {
    let target = label as f64;
    volume.mapv(|voxel| voxel == target)
}

/// Dice coefficient of `label` between `a` and `b`.
///
/// Empty inputs are rejected before shapes are compared. The score is
/// `0.0` whenever either volume lacks the label.
pub fn compute_dice(
    a: ArrayViewD<'_, f64>,
    b: ArrayViewD<'_, f64>,
    label: i64,
) -> Result<DiceResult, DiceError> {
    if a.is_empty() || b.is_empty() {
        return Err(DiceError::EmptyVolume);
    }
    if a.shape() != b.shape() {
        return Err(DiceError::ShapeMismatch {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }

    let mask1 = label_mask(&a, label);
    let mask2 = label_mask(&b, label);

    let (volume1, volume2, intersection) = Zip::from(&mask1).and(&mask2).fold(
        (0u64, 0u64, 0u64),
        |(v1, v2, both), &m1, &m2| {
            (
                v1 + u64::from(m1),
                v2 + u64::from(m2),
                both + u64::from(m1 && m2),
            )
        },
    );

    Ok(DiceResult {
        label,
        volume1,
        volume2,
        intersection,
        score: dice_ratio(volume1, volume2, intersection),
    })
}

fn dice_ratio(volume1: u64, volume2: u64, intersection: u64) -> f64 {
    if volume1 == 0 || volume2 == 0 {
        return 0.0;
    }
    (2.0 * intersection as f64) / (volume1 + volume2) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn, arr2, arr3};

    fn dyn2(rows: [[f64; 2]; 2]) -> ArrayD<f64> {
        arr2(&rows).into_dyn()
    }

    #[test]
    fn worked_example_two_by_two() {
        let a = dyn2([[1.0, 1.0], [0.0, 0.0]]);
        let b = dyn2([[1.0, 0.0], [0.0, 0.0]]);
        let result = compute_dice(a.view(), b.view(), 1).unwrap();
        assert_eq!(result.label, 1);
        assert_eq!(result.volume1, 2);
        assert_eq!(result.volume2, 1);
        assert_eq!(result.intersection, 1);
        assert!((result.score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_zero_volumes_score_zero_not_nan() {
        let a = Array::<f64, _>::zeros(IxDyn(&[4, 4, 4]));
        let result = compute_dice(a.view(), a.view(), 1).unwrap();
        assert_eq!(result.volume1, 0);
        assert_eq!(result.volume2, 0);
        assert_eq!(result.intersection, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn label_missing_from_one_side_scores_zero() {
        let a = dyn2([[2.0, 2.0], [0.0, 0.0]]);
        let b = dyn2([[0.0, 0.0], [0.0, 0.0]]);
        let result = compute_dice(a.view(), b.view(), 2).unwrap();
        assert_eq!(result.volume1, 2);
        assert_eq!(result.volume2, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn identical_volumes_score_one() {
        let a = arr3(&[[[3.0, 0.0], [3.0, 1.0]], [[0.0, 3.0], [2.0, 2.0]]]).into_dyn();
        let result = compute_dice(a.view(), a.view(), 3).unwrap();
        assert_eq!(result.volume1, 3);
        assert_eq!(result.intersection, 3);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn score_is_symmetric() {
        let a = arr3(&[[[1.0, 1.0], [1.0, 0.0]], [[0.0, 1.0], [4.0, 1.0]]]).into_dyn();
        let b = arr3(&[[[1.0, 0.0], [1.0, 1.0]], [[4.0, 4.0], [4.0, 1.0]]]).into_dyn();
        for label in [0, 1, 4, 7] {
            let ab = compute_dice(a.view(), b.view(), label).unwrap();
            let ba = compute_dice(b.view(), a.view(), label).unwrap();
            assert_eq!(ab.score, ba.score, "label {label}");
            assert_eq!(ab.intersection, ba.intersection);
            assert_eq!(ab.volume1, ba.volume2);
            assert!((0.0..=1.0).contains(&ab.score));
        }
    }

    #[test]
    fn negative_labels_are_matched() {
        let a = dyn2([[-1.0, 0.0], [-1.0, 0.0]]);
        let b = dyn2([[-1.0, -1.0], [0.0, 0.0]]);
        let result = compute_dice(a.view(), b.view(), -1).unwrap();
        assert_eq!(result.intersection, 1);
        assert!((result.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let a = Array::<f64, _>::ones(IxDyn(&[2, 3, 4]));
        let b = Array::<f64, _>::ones(IxDyn(&[2, 4, 3]));
        let err = compute_dice(a.view(), b.view(), 1).unwrap_err();
        match err {
            DiceError::ShapeMismatch { left, right } => {
                assert_eq!(left, vec![2, 3, 4]);
                assert_eq!(right, vec![2, 4, 3]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_volume_is_rejected_before_shape_check() {
        let a = Array::<f64, _>::zeros(IxDyn(&[0, 3, 3]));
        let b = Array::<f64, _>::ones(IxDyn(&[3, 3, 3]));
        let err = compute_dice(a.view(), b.view(), 1).unwrap_err();
        assert!(matches!(err, DiceError::EmptyVolume));
    }

    #[test]
    fn label_mask_marks_matching_voxels() {
        let a = dyn2([[5.0, 1.0], [5.0, 5.5]]);
        let mask = label_mask(&a.view(), 5);
        assert_eq!(mask, arr2(&[[true, false], [true, false]]).into_dyn());
    }
}
