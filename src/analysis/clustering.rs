use itertools::Itertools;

use crate::models::{Level, Pivot, PivotKind};

/// Merge raw pivots into horizontal levels.
///
/// Pivots are split by kind, sorted by price, then swept once: a pivot
/// within `tolerance` of the current level's running centroid is absorbed,
/// anything further away seeds a new level. Support levels come back before
/// resistance levels; within a kind, levels are price-ascending.
pub fn cluster_levels(pivots: &[Pivot], tolerance: f64) -> Vec<Level> {
    let by_kind = pivots
        .iter()
        .copied()
        .into_group_map_by(|p| p.kind);

    let mut levels = Vec::new();
    for kind in [PivotKind::Support, PivotKind::Resistance] {
        let Some(mut group) = by_kind.get(&kind).cloned() else {
            continue;
        };
        group.sort_by(|a, b| a.price.total_cmp(&b.price));

        let mut iter = group.into_iter();
        let Some(first) = iter.next() else { continue };
        let mut current = Level::seed(first);

        for pivot in iter {
            if (pivot.price - current.price).abs() <= tolerance {
                current.absorb(pivot);
            } else {
                levels.push(current);
                current = Level::seed(pivot);
            }
        }
        levels.push(current);
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support(index: usize, price: f64) -> Pivot {
        Pivot {
            index,
            price,
            kind: PivotKind::Support,
        }
    }

    fn resistance(index: usize, price: f64) -> Pivot {
        Pivot {
            index,
            price,
            kind: PivotKind::Resistance,
        }
    }

    #[test]
    fn nearby_same_kind_pivots_merge() {
        let pivots = [
            support(2, 100.00),
            support(8, 100.10),
            support(15, 100.05),
            support(30, 105.00),
        ];
        let levels = cluster_levels(&pivots, 0.20);
        assert_eq!(levels.len(), 2);

        assert_eq!(levels[0].touch_count(), 3);
        assert!((levels[0].price - 100.05).abs() < 1e-9);
        assert_eq!(levels[1].touch_count(), 1);
        assert!((levels[1].price - 105.00).abs() < 1e-9);
    }

    #[test]
    fn kinds_never_mix_even_at_the_same_price() {
        let pivots = [support(2, 100.0), resistance(9, 100.0)];
        let levels = cluster_levels(&pivots, 1.0);
        assert_eq!(levels.len(), 2);
        assert_ne!(levels[0].kind, levels[1].kind);
        assert_eq!(levels[0].touch_count(), 1);
        assert_eq!(levels[1].touch_count(), 1);
    }

    #[test]
    fn centroid_drift_can_pull_in_a_chain() {
        // Each neighbor is within tolerance of the running mean even though
        // the endpoints are further apart than the tolerance itself.
        let pivots = [support(1, 100.0), support(2, 100.9), support(3, 101.3)];
        let levels = cluster_levels(&pivots, 1.0);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].touch_count(), 3);
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(cluster_levels(&[], 0.5).is_empty());
    }

    #[test]
    fn reclustering_the_centroids_changes_nothing() {
        let pivots: Vec<Pivot> = [
            100.0, 100.3, 100.5, 102.0, 102.2, 105.0, 105.4, 109.9, 110.0,
        ]
        .iter()
        .enumerate()
        .map(|(i, &p)| support(i, p))
        .collect();
        let tol = 0.6;
        let levels = cluster_levels(&pivots, tol);

        // No two same-kind centroids within tolerance of each other.
        for pair in levels.windows(2) {
            assert!((pair[1].price - pair[0].price).abs() > tol);
        }

        let singletons: Vec<Pivot> = levels
            .iter()
            .map(|l| support(0, l.price))
            .collect();
        let again = cluster_levels(&singletons, tol);
        assert_eq!(again.len(), levels.len());
    }
}
