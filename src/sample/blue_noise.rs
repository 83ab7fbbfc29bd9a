//! Blue-noise surface sampling by weighted sample elimination.
//!
//! Starting from an oversampled pool of random surface points, the most
//! "crowded" candidates are removed one at a time until the target count
//! remains. Crowding is measured by a decayed-distance weight over each
//! candidate's `2·rmax` neighborhood, where `rmax` is the Poisson-disc
//! packing radius for the target count on the given surface area. The
//! surviving points have minimal short-range pair correlation: no clumps, no
//! grid.
//!
//! The candidate pool comes from any random surface source, typically a
//! [`SurfaceSampler`](super::SurfaceSampler).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::mesh::{MeshIndex, SurfacePoint};

use super::spatial::PointIndex;
use super::surface::SurfaceSampler;

/// Options for blue-noise sample elimination.
#[derive(Debug, Clone)]
pub struct BlueNoiseOptions {
    /// Candidate oversampling factor: `multiplier × count` random points are
    /// drawn before elimination (default: 4).
    pub multiplier: usize,

    /// Weight decay exponent α (default: 8).
    pub alpha: f64,

    /// Whether the initial weight-accumulation pass runs in parallel
    /// (default: true). The elimination loop itself is inherently
    /// sequential.
    pub parallel: bool,
}

impl Default for BlueNoiseOptions {
    fn default() -> Self {
        Self {
            multiplier: 4,
            alpha: 8.0,
            parallel: true,
        }
    }
}

impl BlueNoiseOptions {
    /// Set the candidate oversampling factor.
    pub fn with_multiplier(mut self, multiplier: usize) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the weight decay exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Run the weight-accumulation pass single-threaded.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// The Poisson-disc packing radius for `count` points on `surface_area`.
///
/// Survivors of the elimination end up roughly this far apart; callers using
/// the sampled points for force layouts or instancing use it as the natural
/// spacing unit.
pub fn target_spacing(surface_area: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (surface_area / (2.0 * count as f64 * 3.0f64.sqrt())).sqrt()
}

/// Entry in the elimination max-heap.
///
/// Weights decrease as neighbors are removed, so entries go stale; each
/// candidate carries a generation counter and stale entries are skipped on
/// pop.
#[derive(Debug, Clone, Copy)]
struct CandidateEntry {
    weight: f64,
    generation: u32,
    index: usize,
}

impl PartialEq for CandidateEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CandidateEntry {}

impl PartialOrd for CandidateEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on weight; ties broken by candidate index so removal
        // order is deterministic
        self.weight
            .partial_cmp(&other.weight)
            .unwrap_or(Ordering::Equal)
            .then(self.index.cmp(&other.index))
    }
}

/// Eliminate candidates down to `count` survivors with blue-noise spacing.
///
/// `surface_area` is the total area the candidates were drawn from; it sets
/// the elimination radius. Survivors are returned in ascending candidate
/// order, and the same candidates always produce the same survivors.
///
/// If `count >= candidates.len()` the candidates are returned unchanged; if
/// `count == 0` the result is empty.
pub fn eliminate<I: MeshIndex>(
    candidates: &[SurfacePoint<I>],
    surface_area: f64,
    count: usize,
    options: &BlueNoiseOptions,
) -> Vec<SurfacePoint<I>> {
    if count == 0 {
        return Vec::new();
    }
    if count >= candidates.len() {
        return candidates.to_vec();
    }

    let rmax = target_spacing(surface_area, count);
    if rmax <= 0.0 || !rmax.is_finite() {
        // Degenerate surface area: no meaningful spacing exists, keep the
        // first `count` candidates.
        return candidates[..count].to_vec();
    }
    let radius = 2.0 * rmax;
    let alpha = options.alpha;

    debug!(
        candidates = candidates.len(),
        count, rmax, "eliminating surface samples"
    );

    let positions: Vec<_> = candidates.iter().map(|c| c.position).collect();
    let index = PointIndex::build(&positions);

    let pair_weight = |i: usize, j: usize| -> f64 {
        let d = (positions[i] - positions[j]).norm();
        (1.0 - d.min(radius) / radius).powf(alpha)
    };

    // Initial crowding weights. The pair weight is a function of distance
    // only, so the accumulation is symmetric; each candidate's sum is
    // independent of the others' and safe to compute in parallel.
    let accumulate = |i: usize| -> f64 {
        index
            .query_ball(&positions[i], radius)
            .into_iter()
            .filter(|&j| j != i)
            .map(|j| pair_weight(i, j))
            .sum()
    };

    let mut weights: Vec<f64> = if options.parallel {
        (0..candidates.len()).into_par_iter().map(accumulate).collect()
    } else {
        (0..candidates.len()).map(accumulate).collect()
    };

    let mut heap: BinaryHeap<CandidateEntry> = weights
        .iter()
        .enumerate()
        .map(|(index, &weight)| CandidateEntry {
            weight,
            generation: 0,
            index,
        })
        .collect();
    let mut generations = vec![0u32; candidates.len()];
    let mut alive = vec![true; candidates.len()];
    let mut remaining = candidates.len();
    let mut neighbors = Vec::new();

    while remaining > count {
        let Some(entry) = heap.pop() else { break };

        // Skip stale entries (the candidate was removed, or its weight has
        // changed since this entry was pushed)
        if !alive[entry.index] || entry.generation != generations[entry.index] {
            continue;
        }

        alive[entry.index] = false;
        remaining -= 1;

        // Removing the most crowded point relieves its neighbors
        index.query_ball_into(&positions[entry.index], radius, &mut neighbors);
        for &j in &neighbors {
            if j == entry.index || !alive[j] {
                continue;
            }
            weights[j] -= pair_weight(entry.index, j);
            generations[j] += 1;
            heap.push(CandidateEntry {
                weight: weights[j],
                generation: generations[j],
                index: j,
            });
        }
    }

    candidates
        .iter()
        .zip(alive.iter())
        .filter_map(|(c, &keep)| keep.then_some(*c))
        .collect()
}

/// Draw `multiplier × count` candidates from a surface sampler and eliminate
/// down to `count` blue-noise points.
pub fn blue_noise<I: MeshIndex, R: Rng>(
    sampler: &mut SurfaceSampler<'_, I, R>,
    count: usize,
    options: &BlueNoiseOptions,
) -> Vec<SurfacePoint<I>> {
    let pool = options.multiplier.max(1).saturating_mul(count);
    let candidates: Vec<SurfacePoint<I>> = (0..pool).map(|_| sampler.sample()).collect();
    eliminate(&candidates, sampler.mesh().surface_area(), count, options)
}
