use crate::model::{constants::BAND_FALLBACK_SIZE, structures::map_record::MapRecord};
use itertools::Itertools;
use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng
};
use tracing::debug;

/// Tolerance for accumulated floating point error when comparing against band edges
const BAND_EPSILON: f64 = 1e-9;

/// Picks a ranked map for a player at `rating`.
///
/// Candidates are all maps within `band` of the rating. If none exist, the
/// [`BAND_FALLBACK_SIZE`] maps closest to the rating are used instead. One candidate
/// is then drawn uniformly at random.
///
/// Returns `None` only if `pool` is empty.
pub fn select_by_band<'a, R: Rng + ?Sized>(
    pool: &'a [MapRecord],
    rating: f64,
    band: f64,
    rng: &mut R
) -> Option<&'a MapRecord> {
    let lo = rating - band;
    let hi = rating + band;

    let mut candidates: Vec<&MapRecord> = pool
        .iter()
        .filter(|m| m.difficulty >= lo && m.difficulty <= hi)
        .collect();

    if candidates.is_empty() {
        debug!(rating, band, "No maps inside the rating band, using closest maps");
        candidates = closest(pool, rating, BAND_FALLBACK_SIZE);
    }

    candidates.choose(rng).copied()
}

/// Picks the map closest to `target`, searching outward in bands of
/// `start_band`, `start_band + step`, ... up to and including `max_band`.
/// Ties in distance are broken randomly.
///
/// Returns `None` if no map lies within `max_band` of the target.
pub fn select_near<'a, R: Rng + ?Sized>(
    pool: &'a [MapRecord],
    target: f64,
    start_band: f64,
    max_band: f64,
    step: f64,
    rng: &mut R
) -> Option<&'a MapRecord> {
    for band in bands(start_band, max_band, step) {
        let mut candidates: Vec<&MapRecord> = pool
            .iter()
            .filter(|m| m.distance_to(target) <= band + BAND_EPSILON)
            .collect();

        if candidates.is_empty() {
            continue;
        }

        // Shuffling before the stable sort leaves equal distances in random order
        candidates.shuffle(rng);
        candidates.sort_by(|a, b| a.distance_to(target).total_cmp(&b.distance_to(target)));

        return candidates.first().copied();
    }

    debug!(target_difficulty = target, max_band, "No map within the widest band");
    None
}

/// The single map closest to `target`. The first one in pool order wins ties.
pub fn nearest(pool: &[MapRecord], target: f64) -> Option<&MapRecord> {
    pool.iter()
        .min_by(|a, b| a.distance_to(target).total_cmp(&b.distance_to(target)))
}

/// Up to `n` maps ordered by distance to `target`, keeping pool order among equals
fn closest(pool: &[MapRecord], target: f64, n: usize) -> Vec<&MapRecord> {
    pool.iter()
        .sorted_by(|a, b| a.distance_to(target).total_cmp(&b.distance_to(target)))
        .take(n)
        .collect()
}

/// Band widths to try, computed from the step index so that repeated
/// additions never drift past `max_band`
fn bands(start_band: f64, max_band: f64, step: f64) -> impl Iterator<Item = f64> {
    let steps = if step > 0.0 && max_band >= start_band {
        ((max_band - start_band) / step + BAND_EPSILON).floor() as usize
    } else {
        0
    };

    (0..=steps)
        .map(move |i| start_band + step * i as f64)
        .filter(move |band| *band <= max_band + BAND_EPSILON)
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{
            constants::{MATCHMAKING_BAND, NEAR_BAND_STEP, NEAR_MAX_BAND, NEAR_START_BAND},
            map_selection::{bands, closest, nearest, select_by_band, select_near}
        },
        utils::test_utils::{generate_pool, seeded_rng}
    };
    use approx::assert_abs_diff_eq;
    use std::collections::HashSet;

    #[test]
    fn test_bands_include_max() {
        let widths: Vec<f64> = bands(NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP).collect();

        assert_eq!(widths.len(), 9);
        assert_abs_diff_eq!(widths[0], 0.1);
        assert_abs_diff_eq!(*widths.last().unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_bands_empty_when_start_exceeds_max() {
        let widths: Vec<f64> = bands(0.6, 0.5, 0.05).collect();

        assert!(widths.is_empty());
    }

    #[test]
    fn test_select_by_band_within_band() {
        let pool = generate_pool(&[5.0, 5.9, 6.1, 6.3, 7.5]);
        let mut rng = seeded_rng(7);

        for _ in 0..50 {
            let map = select_by_band(&pool, 6.0, MATCHMAKING_BAND, &mut rng).unwrap();
            assert!((map.difficulty - 6.0).abs() <= MATCHMAKING_BAND);
        }
    }

    #[test]
    fn test_select_by_band_covers_all_candidates() {
        let pool = generate_pool(&[5.9, 6.0, 6.1]);
        let mut rng = seeded_rng(11);

        let seen: HashSet<String> = (0..100)
            .map(|_| select_by_band(&pool, 6.0, MATCHMAKING_BAND, &mut rng).unwrap().name.clone())
            .collect();

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_select_by_band_falls_back_to_closest() {
        let difficulties: Vec<f64> = (0..30).map(|i| 8.0 + i as f64 * 0.1).collect();
        let pool = generate_pool(&difficulties);
        let mut rng = seeded_rng(3);

        for _ in 0..50 {
            let map = select_by_band(&pool, 1.0, MATCHMAKING_BAND, &mut rng).unwrap();
            // Only the 20 closest maps (8.0 ..= 9.9) are eligible
            assert!(map.difficulty < 9.95);
        }
    }

    #[test]
    fn test_select_by_band_never_none_on_non_empty_pool() {
        let pool = generate_pool(&[5.5, 9.0]);
        let mut rng = seeded_rng(1);

        for r in 0..60 {
            let rating = r as f64 * 0.25;
            assert!(select_by_band(&pool, rating, MATCHMAKING_BAND, &mut rng).is_some());
        }
    }

    #[test]
    fn test_select_by_band_empty_pool() {
        let mut rng = seeded_rng(1);

        assert!(select_by_band(&[], 6.0, MATCHMAKING_BAND, &mut rng).is_none());
    }

    #[test]
    fn test_select_near_returns_closest() {
        let pool = generate_pool(&[5.8, 6.05, 6.3]);
        let mut rng = seeded_rng(5);

        let map = select_near(&pool, 6.0, NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP, &mut rng).unwrap();
        assert_abs_diff_eq!(map.difficulty, 6.05);
    }

    #[test]
    fn test_select_near_widens_band() {
        let pool = generate_pool(&[5.0, 6.4]);
        let mut rng = seeded_rng(5);

        let map = select_near(&pool, 6.0, NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP, &mut rng).unwrap();
        assert_abs_diff_eq!(map.difficulty, 6.4);
    }

    #[test]
    fn test_select_near_accepts_widest_band_edge() {
        let pool = generate_pool(&[6.5]);
        let mut rng = seeded_rng(5);

        let map = select_near(&pool, 6.0, NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP, &mut rng);
        assert!(map.is_some());
    }

    #[test]
    fn test_select_near_exhausted() {
        let pool = generate_pool(&[4.0, 8.0]);
        let mut rng = seeded_rng(5);

        let map = select_near(&pool, 6.0, NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP, &mut rng);
        assert!(map.is_none());
    }

    #[test]
    fn test_select_near_breaks_ties_randomly() {
        let pool = generate_pool(&[5.95, 6.05]);
        let mut rng = seeded_rng(19);

        let seen: HashSet<String> = (0..100)
            .map(|_| {
                select_near(&pool, 6.0, NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP, &mut rng)
                    .unwrap()
                    .name
                    .clone()
            })
            .collect();

        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_nearest() {
        let pool = generate_pool(&[4.0, 8.0, 7.1]);

        assert_abs_diff_eq!(nearest(&pool, 6.0).unwrap().difficulty, 7.1);
        assert!(nearest(&[], 6.0).is_none());
    }

    #[test]
    fn test_closest_is_stable() {
        let pool = generate_pool(&[6.5, 5.5, 6.0, 7.0]);
        let picked = closest(&pool, 6.0, 3);

        let names: Vec<&str> = picked.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Map 2", "Map 0", "Map 1"]);
    }
}
