//=========================================================================
// Layout & Random Utilities
//=========================================================================
//
// Shuffling, selection, collision and letter placement. Every function
// takes its randomness as an argument so callers can seed it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Point, Rect};

//=== Shuffle & Selection =================================================

/// Uniformly shuffled copy of `items` (Fisher–Yates, last index down).
pub fn fisher_yates_shuffle<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Uniformly chosen element, `None` for an empty slice.
pub fn select_random<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Strict AABB overlap. Edge contact is not a collision.
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

//=== Distributed Positions ===============================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub min_spacing: f32,
    pub letter_size: f32,
    pub margin: f32,
    pub max_attempts: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            min_spacing: 120.0,
            letter_size: 60.0,
            margin: 100.0,
            max_attempts: 1000,
        }
    }
}

impl LayoutParams {
    /// Region top-left corners are drawn from, for a `width × height` area.
    /// `None` when the area is too small to fit a letter inside the margin.
    pub fn bounds(&self, width: f32, height: f32) -> Option<(Point, Point)> {
        let min = Point::new(self.margin, self.margin);
        let max = Point::new(
            width - self.margin - self.letter_size,
            height - self.margin - self.letter_size,
        );
        (max.x >= min.x && max.y >= min.y).then_some((min, max))
    }
}

/// Up to `count` points inside the margin-inset area, pairwise at least
/// `min_spacing` apart, using the default parameters.
pub fn generate_distributed_positions<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
) -> Vec<Point> {
    generate_distributed_positions_with(rng, count, width, height, &LayoutParams::default(), &[])
}

/// Rejection sampling: draw a point, keep it if it is far enough from
/// every kept point and its letter square stays off every `keep_clear`
/// rect. Stops at `count` points or `max_attempts` draws, so the result
/// may be short.
pub fn generate_distributed_positions_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
    params: &LayoutParams,
    keep_clear: &[Rect],
) -> Vec<Point> {
    let Some((min, max)) = params.bounds(width, height) else {
        return Vec::new();
    };

    let mut positions: Vec<Point> = Vec::with_capacity(count);
    let mut attempts = 0;

    while positions.len() < count && attempts < params.max_attempts {
        let candidate = Point::new(
            rng.gen::<f32>() * (max.x - min.x) + min.x,
            rng.gen::<f32>() * (max.y - min.y) + min.y,
        );

        let square = Rect::new(candidate.x, candidate.y, params.letter_size, params.letter_size);
        let spaced = positions
            .iter()
            .all(|placed| placed.distance(candidate) >= params.min_spacing);
        let clear = !keep_clear.iter().any(|zone| check_collision(&square, zone));

        if spaced && clear {
            positions.push(candidate);
        }

        attempts += 1;
    }

    positions
}

//=== Letter Layout =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("only {placed} of {requested} letters fit on screen")]
    InsufficientSpace { requested: usize, placed: usize },
}

/// Shrink factor applied to the spacing between retries.
const RELAX_FACTOR: f32 = 0.75;

/// Places exactly `count` letters, none of them overlapping `keep_clear`,
/// or fails.
///
/// A short result is retried with progressively relaxed spacing, never
/// below the letter size so letters still do not overlap.
pub fn layout_letters<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
    params: &LayoutParams,
    keep_clear: &[Rect],
) -> Result<Vec<Point>, LayoutError> {
    let mut attempt = *params;
    let mut best = 0;

    loop {
        let positions = generate_distributed_positions_with(rng, count, width, height, &attempt, keep_clear);
        if positions.len() == count {
            return Ok(positions);
        }
        best = best.max(positions.len());

        if attempt.min_spacing <= params.letter_size {
            return Err(LayoutError::InsufficientSpace {
                requested: count,
                placed: best,
            });
        }

        attempt.min_spacing = (attempt.min_spacing * RELAX_FACTOR).max(params.letter_size);
        debug!(
            "Placed {}/{} letters, retrying with spacing {}",
            positions.len(),
            count,
            attempt.min_spacing
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    //--- Shuffle ----------------------------------------------------------

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<char> = "BANANA".chars().collect();

        let mut shuffled = fisher_yates_shuffle(&mut rng, &input);

        assert_eq!(shuffled.len(), input.len());
        let mut sorted = input.clone();
        sorted.sort_unstable();
        shuffled.sort_unstable();
        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let input = [1, 2, 3, 4, 5, 6, 7, 8];
        let a = fisher_yates_shuffle(&mut StdRng::seed_from_u64(42), &input);
        let b = fisher_yates_shuffle(&mut StdRng::seed_from_u64(42), &input);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_with_zero_source_rotates_left() {
        // A source that always yields 0 picks j = 0 at every step.
        let mut rng = StepRng::new(0, 0);
        let shuffled = fisher_yates_shuffle(&mut rng, &['A', 'B', 'C', 'D']);
        assert_eq!(shuffled, vec!['B', 'C', 'D', 'A']);
    }

    #[test]
    fn shuffle_leaves_input_untouched() {
        let input = vec!['C', 'A', 'T'];
        let _ = fisher_yates_shuffle(&mut StdRng::seed_from_u64(1), &input);
        assert_eq!(input, vec!['C', 'A', 'T']);
    }

    #[test]
    fn shuffle_handles_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(fisher_yates_shuffle::<u8, _>(&mut rng, &[]).is_empty());
        assert_eq!(fisher_yates_shuffle(&mut rng, &[9]), vec![9]);
    }

    //--- Selection --------------------------------------------------------

    #[test]
    fn select_random_returns_member_or_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = ['C', 'A', 'T'];
        let picked = select_random(&mut rng, &items).copied();
        assert!(picked.is_some_and(|c| items.contains(&c)));
        assert_eq!(select_random::<char, _>(&mut rng, &[]), None);
    }

    //--- Collision --------------------------------------------------------

    #[test]
    fn collision_requires_strict_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(check_collision(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!check_collision(&a, &Rect::new(10.0, 5.0, 10.0, 10.0)));
    }

    //--- Positions --------------------------------------------------------

    fn assert_valid(points: &[Point], width: f32, height: f32, params: &LayoutParams) {
        let (min, max) = params.bounds(width, height).expect("bounds");
        for (i, p) in points.iter().enumerate() {
            assert!(p.x >= min.x && p.x <= max.x, "x out of bounds: {:?}", p);
            assert!(p.y >= min.y && p.y <= max.y, "y out of bounds: {:?}", p);
            for q in &points[i + 1..] {
                assert!(p.distance(*q) >= params.min_spacing);
            }
        }
    }

    #[test]
    fn positions_respect_spacing_and_bounds() {
        let params = LayoutParams::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = generate_distributed_positions(&mut rng, 6, 1280.0, 520.0);
            assert!(points.len() <= 6);
            assert_valid(&points, 1280.0, 520.0, &params);
        }
    }

    #[test]
    fn crowded_area_returns_fewer_points() {
        let mut rng = StdRng::seed_from_u64(5);
        // 60×60 sampling region fits a single point at spacing 120.
        let points = generate_distributed_positions(&mut rng, 5, 320.0, 320.0);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn area_smaller_than_margins_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(generate_distributed_positions(&mut rng, 3, 200.0, 200.0).is_empty());
    }

    #[test]
    fn layout_relaxes_spacing_to_fit() {
        let params = LayoutParams::default();
        let mut rng = StdRng::seed_from_u64(11);
        // 200×200 region: four letters fit at spacing 60 but hardly at 120.
        let points = layout_letters(&mut rng, 4, 460.0, 460.0, &params, &[]).expect("fits");

        assert_eq!(points.len(), 4);
        let relaxed = LayoutParams {
            min_spacing: params.letter_size,
            ..params
        };
        assert_valid(&points, 460.0, 460.0, &relaxed);
    }

    #[test]
    fn letters_stay_off_keep_clear_zone() {
        let params = LayoutParams::default();
        let zone = Rect::new(50.0, 50.0, 80.0, 80.0);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = layout_letters(&mut rng, 9, 1280.0, 520.0, &params, &[zone]).expect("fits");

            for p in &points {
                let square = Rect::new(p.x, p.y, params.letter_size, params.letter_size);
                assert!(!check_collision(&square, &zone), "seed {}: {:?} under zone", seed, p);
            }
        }
    }

    #[test]
    fn zone_covering_field_places_nothing() {
        let mut rng = StdRng::seed_from_u64(4);
        let zone = Rect::new(0.0, 0.0, 1280.0, 720.0);

        let points = generate_distributed_positions_with(
            &mut rng,
            3,
            1280.0,
            520.0,
            &LayoutParams::default(),
            &[zone],
        );

        assert!(points.is_empty());
    }

    #[test]
    fn layout_fails_when_letters_cannot_fit() {
        let mut rng = StdRng::seed_from_u64(2);
        let result = layout_letters(&mut rng, 30, 320.0, 320.0, &LayoutParams::default(), &[]);

        assert!(matches!(
            result,
            Err(LayoutError::InsufficientSpace { requested: 30, .. })
        ));
    }
}
