//! Molecule reactions
//!
//! A colliding pair turns into a new set of molecules:
//! - round + round  -> one square (merge)
//! - round + square -> a heavier square (absorb)
//! - square + square -> a ring of rounds (fission)
//!
//! Rules never touch the particle list. Each returns a [`ReactionOutcome`]
//! describing slots to overwrite, slots to drop and molecules to append. The
//! tick folds all outcomes into a [`ReactionPlan`] and commits it once, so an
//! index read from the collision scan means the same molecule for the whole
//! pass.

use std::f32::consts::TAU;

use glam::Vec2;

use super::bounds::ReactorBounds;
use super::particle::{Particle, Variant};
use crate::consts::FISSION_SPREAD;
use crate::settings::Settings;
use crate::{clamp_or_center, polar_to_cartesian, safe_divisor};

/// Which transformation a variant pair undergoes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionRule {
    /// Round + round -> square
    Merge,
    /// Round + square -> square
    Absorb,
    /// Square + square -> rounds
    Fission,
}

impl ReactionRule {
    /// Rule table. Order of the pair does not matter.
    pub fn for_pair(a: Variant, b: Variant) -> Self {
        match (a, b) {
            (Variant::Round, Variant::Round) => ReactionRule::Merge,
            (Variant::Round, Variant::Square) | (Variant::Square, Variant::Round) => {
                ReactionRule::Absorb
            }
            (Variant::Square, Variant::Square) => ReactionRule::Fission,
        }
    }
}

/// Sizes and masses reaction products are built with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionParams {
    pub round_radius: f32,
    /// Unit mass
    pub round_mass: f32,
    pub square_edge: f32,
    /// Fission products spread at `FISSION_SPREAD` times this speed
    pub reference_speed: f32,
    pub max_fission_products: usize,
}

impl ReactionParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            round_radius: settings.round_radius,
            round_mass: settings.round_mass,
            square_edge: settings.square_edge,
            reference_speed: settings.reference_speed,
            max_fission_products: settings.max_fission_products,
        }
    }
}

impl Default for ReactionParams {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Edits one reaction wants applied to the particle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionOutcome {
    /// Slots to drop
    pub removals: Vec<usize>,
    /// Slots to overwrite in place
    pub replacements: Vec<(usize, Particle)>,
    /// New molecules appended at the end
    pub insertions: Vec<Particle>,
}

/// Compute the reaction for pair `(i, j)`.
///
/// Returns `None` when an index is out of range, `i == j`, or the rule
/// declines to fire (fission with a combined mass under one unit).
pub fn react(
    particles: &[Particle],
    i: usize,
    j: usize,
    bounds: &ReactorBounds,
    params: &ReactionParams,
) -> Option<ReactionOutcome> {
    if i == j {
        return None;
    }
    let a = particles.get(i)?;
    let b = particles.get(j)?;
    let collision_point = (a.pos + b.pos) * 0.5;

    match ReactionRule::for_pair(a.variant(), b.variant()) {
        ReactionRule::Merge => Some(merge(i, a, j, b, collision_point, params)),
        ReactionRule::Absorb => Some(if a.variant() == Variant::Round {
            absorb(i, a, j, b, params)
        } else {
            absorb(j, b, i, a, params)
        }),
        ReactionRule::Fission => fission(i, a, j, b, collision_point, bounds, params),
    }
}

/// Two rounds fuse into one square of twice the unit mass at their midpoint,
/// moving at their average velocity.
fn merge(
    i: usize,
    a: &Particle,
    j: usize,
    b: &Particle,
    collision_point: Vec2,
    params: &ReactionParams,
) -> ReactionOutcome {
    let vel = (a.vel + b.vel) * 0.5;
    ReactionOutcome {
        removals: vec![i, j],
        replacements: Vec::new(),
        insertions: vec![Particle::square(
            collision_point,
            vel,
            params.square_edge,
            2.0 * params.round_mass,
        )],
    }
}

/// A square swallows a round. Mass adds up and momentum is conserved; the
/// square keeps its slot and position.
fn absorb(
    round_idx: usize,
    round: &Particle,
    square_idx: usize,
    square: &Particle,
    params: &ReactionParams,
) -> ReactionOutcome {
    let momentum = round.momentum() + square.momentum();
    let mass = round.mass + square.mass;
    let vel = momentum / safe_divisor(mass);
    ReactionOutcome {
        removals: vec![round_idx],
        replacements: vec![(
            square_idx,
            Particle::square(square.pos, vel, params.square_edge, mass),
        )],
        insertions: Vec::new(),
    }
}

/// Number of rounds a fission of `total_mass` produces, or `None` below one unit
pub fn fission_product_count(total_mass: f32, cap: usize) -> Option<usize> {
    let whole = total_mass.floor();
    // Also rejects NaN
    if !(whole >= 1.0) {
        return None;
    }
    Some((whole as usize).min(cap.max(1)))
}

/// Two squares shatter into a ring of rounds.
///
/// The ring is centered on the collision point, pulled inward so it fits the
/// interior. Every product shares the momentum equally and gets an outward
/// kick; the mean kick is subtracted so the kicks carry no net momentum.
fn fission(
    i: usize,
    a: &Particle,
    j: usize,
    b: &Particle,
    collision_point: Vec2,
    bounds: &ReactorBounds,
    params: &ReactionParams,
) -> Option<ReactionOutcome> {
    let n = fission_product_count(a.mass + b.mass, params.max_fission_products)?;
    let r = params.round_radius;
    let momentum = a.momentum() + b.momentum();

    let interior = bounds.interior_size();
    let safe_radius = (interior.x.min(interior.y) * 0.5 - r)
        .min(n as f32 * r * 2.0)
        .max(0.0);

    let lo = bounds.interior_min() + Vec2::splat(r);
    let hi = bounds.interior_max() - Vec2::splat(r);
    let center = Vec2::new(
        clamp_or_center(collision_point.x, lo.x + safe_radius, hi.x - safe_radius),
        clamp_or_center(collision_point.y, lo.y + safe_radius, hi.y - safe_radius),
    );

    let common_vel = momentum / safe_divisor(n as f32 * params.round_mass);
    let radials: Vec<Vec2> = (0..n)
        .map(|k| polar_to_cartesian(1.0, TAU * k as f32 / n as f32))
        .collect();
    let mean_radial = radials.iter().copied().sum::<Vec2>() / n as f32;
    let spread = FISSION_SPREAD * params.reference_speed;

    let insertions = radials
        .iter()
        .map(|&radial| {
            let offset = center + radial * safe_radius;
            let pos = Vec2::new(
                clamp_or_center(offset.x, lo.x, hi.x),
                clamp_or_center(offset.y, lo.y, hi.y),
            );
            let vel = common_vel + (radial - mean_radial) * spread;
            Particle::round(pos, vel, r, params.round_mass)
        })
        .collect();

    Some(ReactionOutcome {
        removals: vec![i, j],
        replacements: Vec::new(),
        insertions,
    })
}

/// Indices queued for removal at the end of a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalQueue {
    indices: Vec<usize>,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, index: usize) {
        self.indices.push(index);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Drop every marked slot. Duplicates collapse; slots are erased highest
    /// first so lower indices keep their meaning; out-of-range marks are
    /// ignored. Returns how many molecules were removed.
    pub fn commit(&mut self, particles: &mut Vec<Particle>) -> usize {
        self.indices.sort_unstable_by(|a, b| b.cmp(a));
        self.indices.dedup();
        let mut removed = 0;
        for &index in &self.indices {
            if index < particles.len() {
                particles.remove(index);
                removed += 1;
            }
        }
        self.indices.clear();
        removed
    }
}

/// What a committed plan did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub reactions: usize,
    pub replaced: usize,
    pub removed: usize,
    pub inserted: usize,
}

/// All reactions of one tick, ready to apply in a single pass
#[derive(Debug, Clone, Default)]
pub struct ReactionPlan {
    removals: Vec<usize>,
    replacements: Vec<(usize, Particle)>,
    insertions: Vec<Particle>,
    reactions: usize,
}

impl ReactionPlan {
    /// Resolve every colliding pair against the current particle list.
    ///
    /// Pairs run last-discovered first. A molecule reacts at most once per
    /// tick: a pair whose member was already used by a previous reaction is
    /// skipped.
    pub fn build(
        particles: &[Particle],
        pairs: &[(usize, usize)],
        bounds: &ReactorBounds,
        params: &ReactionParams,
    ) -> Self {
        let mut plan = Self::default();
        let mut consumed = vec![false; particles.len()];

        for &(i, j) in pairs.iter().rev() {
            if consumed.get(i).copied().unwrap_or(true) || consumed.get(j).copied().unwrap_or(true)
            {
                continue;
            }
            let Some(outcome) = react(particles, i, j, bounds, params) else {
                continue;
            };
            log::trace!(
                "reaction {} + {}: -{} ~{} +{}",
                i,
                j,
                outcome.removals.len(),
                outcome.replacements.len(),
                outcome.insertions.len()
            );
            consumed[i] = true;
            consumed[j] = true;
            plan.push(outcome);
        }
        plan
    }

    pub fn push(&mut self, outcome: ReactionOutcome) {
        self.removals.extend(outcome.removals);
        self.replacements.extend(outcome.replacements);
        self.insertions.extend(outcome.insertions);
        self.reactions += 1;
    }

    pub fn reactions(&self) -> usize {
        self.reactions
    }

    pub fn is_empty(&self) -> bool {
        self.reactions == 0
    }

    /// Apply the plan: overwrite slots, then remove, then append.
    ///
    /// Replacements land first, while indices still refer to the list the
    /// plan was built from. Removals go through `queue`, which is left empty.
    pub fn commit(
        mut self,
        particles: &mut Vec<Particle>,
        queue: &mut RemovalQueue,
    ) -> CommitSummary {
        let mut replaced = 0;
        for (index, particle) in self.replacements {
            if let Some(slot) = particles.get_mut(index) {
                *slot = particle;
                replaced += 1;
            }
        }
        for index in self.removals {
            queue.mark(index);
        }
        let removed = queue.commit(particles);
        let inserted = self.insertions.len();
        particles.append(&mut self.insertions);

        CommitSummary {
            reactions: self.reactions,
            replaced,
            removed,
            inserted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn bounds() -> ReactorBounds {
        ReactorBounds::new(0.0, 0.0, 200.0, 200.0, 10.0)
    }

    fn round(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::round(Vec2::new(x, y), Vec2::new(vx, vy), 1.0, 1.0)
    }

    fn square(x: f32, y: f32, vx: f32, vy: f32, mass: f32) -> Particle {
        Particle::square(Vec2::new(x, y), Vec2::new(vx, vy), 2.0, mass)
    }

    fn total_momentum(particles: &[Particle]) -> Vec2 {
        particles.iter().map(Particle::momentum).sum()
    }

    #[test]
    fn test_rule_table_is_order_independent() {
        use Variant::*;
        assert_eq!(ReactionRule::for_pair(Round, Round), ReactionRule::Merge);
        assert_eq!(ReactionRule::for_pair(Round, Square), ReactionRule::Absorb);
        assert_eq!(ReactionRule::for_pair(Square, Round), ReactionRule::Absorb);
        assert_eq!(ReactionRule::for_pair(Square, Square), ReactionRule::Fission);
    }

    #[test]
    fn test_merge_makes_square_at_midpoint() {
        let particles = vec![round(100.0, 100.0, 10.0, 0.0), round(101.0, 100.0, -4.0, 2.0)];
        let out = react(&particles, 0, 1, &bounds(), &ReactionParams::default()).unwrap();
        assert_eq!(out.removals, vec![0, 1]);
        assert!(out.replacements.is_empty());
        assert_eq!(out.insertions.len(), 1);
        let sq = &out.insertions[0];
        assert_eq!(sq.variant(), Variant::Square);
        assert_eq!(sq.pos, Vec2::new(100.5, 100.0));
        assert_eq!(sq.vel, Vec2::new(3.0, 1.0));
        assert_eq!(sq.mass, 2.0);
    }

    #[test]
    fn test_absorb_conserves_momentum_either_order() {
        let params = ReactionParams::default();
        let sq = square(50.0, 50.0, 2.0, -1.0, 3.0);
        let rd = round(51.5, 50.0, -6.0, 4.0);
        let before = sq.momentum() + rd.momentum();

        for (particles, sq_idx, rd_idx) in [
            (vec![sq.clone(), rd.clone()], 0, 1),
            (vec![rd.clone(), sq.clone()], 1, 0),
        ] {
            let out = react(&particles, 0, 1, &bounds(), &params).unwrap();
            assert_eq!(out.removals, vec![rd_idx]);
            assert_eq!(out.replacements.len(), 1);
            let (idx, merged) = &out.replacements[0];
            assert_eq!(*idx, sq_idx);
            assert_eq!(merged.mass, 4.0);
            assert_eq!(merged.pos, sq.pos);
            assert!((merged.momentum() - before).length() < EPS);
        }
    }

    #[test]
    fn test_fission_count_and_momentum() {
        let particles = vec![square(100.0, 100.0, 5.0, 0.0, 3.0), square(101.0, 100.0, -2.0, 3.0, 3.0)];
        let before = total_momentum(&particles);
        let out = react(&particles, 0, 1, &bounds(), &ReactionParams::default()).unwrap();
        assert_eq!(out.removals, vec![0, 1]);
        assert_eq!(out.insertions.len(), 6);
        assert!(out.insertions.iter().all(Particle::is_round));
        assert!((total_momentum(&out.insertions) - before).length() < EPS);
    }

    #[test]
    fn test_fission_ring_is_radial() {
        let particles = vec![square(100.0, 100.0, 0.0, 0.0, 2.0), square(101.0, 100.0, 0.0, 0.0, 2.0)];
        let out = react(&particles, 0, 1, &bounds(), &ReactionParams::default()).unwrap();
        // 4 products, ring radius min(180/2 - 1, 4 * 2) = 8 around (100.5, 100)
        assert_eq!(out.insertions.len(), 4);
        let center = Vec2::new(100.5, 100.0);
        for p in &out.insertions {
            assert!((p.pos.distance(center) - 8.0).abs() < EPS);
            // Kick points outward
            assert!(p.vel.dot(p.pos - center) > 0.0);
        }
    }

    #[test]
    fn test_fission_ring_pulled_inside_walls() {
        // Collision right against the top-left corner of the interior
        let particles = vec![square(11.0, 11.0, 0.0, 0.0, 5.0), square(12.0, 11.0, 0.0, 0.0, 5.0)];
        let b = bounds();
        let out = react(&particles, 0, 1, &b, &ReactionParams::default()).unwrap();
        assert_eq!(out.insertions.len(), 10);
        for p in &out.insertions {
            assert!(b.contains(p.pos, p.half_extent()), "{:?} escaped", p.pos);
        }
    }

    #[test]
    fn test_fission_caps_product_count() {
        let particles = vec![square(100.0, 100.0, 1.0, 0.0, 40.0), square(101.0, 100.0, 0.0, 0.0, 40.0)];
        let out = react(&particles, 0, 1, &bounds(), &ReactionParams::default()).unwrap();
        assert_eq!(out.insertions.len(), 50);
        assert!((total_momentum(&out.insertions) - Vec2::new(40.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_fission_below_unit_mass_is_noop() {
        let particles = vec![square(100.0, 100.0, 1.0, 0.0, 0.3), square(101.0, 100.0, 0.0, 0.0, 0.4)];
        assert!(react(&particles, 0, 1, &bounds(), &ReactionParams::default()).is_none());
    }

    #[test]
    fn test_fission_in_tiny_reactor_does_not_panic() {
        // Interior 4x4: the ring cannot fit, positions collapse toward the center
        let tiny = ReactorBounds::new(0.0, 0.0, 24.0, 24.0, 10.0);
        let particles = vec![square(12.0, 12.0, 0.0, 0.0, 3.0), square(12.5, 12.0, 0.0, 0.0, 3.0)];
        let out = react(&particles, 0, 1, &tiny, &ReactionParams::default()).unwrap();
        for p in &out.insertions {
            assert!(p.pos.is_finite());
            assert!(p.pos.x >= 11.0 && p.pos.x <= 13.0);
        }
    }

    #[test]
    fn test_fission_product_count() {
        assert_eq!(fission_product_count(6.0, 50), Some(6));
        assert_eq!(fission_product_count(6.9, 50), Some(6));
        assert_eq!(fission_product_count(120.0, 50), Some(50));
        assert_eq!(fission_product_count(0.99, 50), None);
        assert_eq!(fission_product_count(f32::NAN, 50), None);
    }

    #[test]
    fn test_react_rejects_bad_indices() {
        let particles = vec![round(0.0, 0.0, 0.0, 0.0)];
        let params = ReactionParams::default();
        assert!(react(&particles, 0, 0, &bounds(), &params).is_none());
        assert!(react(&particles, 0, 5, &bounds(), &params).is_none());
    }

    #[test]
    fn test_removal_queue_descending_dedup() {
        let mut particles: Vec<Particle> =
            (0..5).map(|k| round(k as f32 * 10.0, 0.0, 0.0, 0.0)).collect();
        let mut queue = RemovalQueue::new();
        for index in [1, 3, 1, 42] {
            queue.mark(index);
        }
        assert_eq!(queue.commit(&mut particles), 2);
        assert!(queue.is_empty());
        let xs: Vec<f32> = particles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![0.0, 20.0, 40.0]);
    }

    #[test]
    fn test_plan_absorb_with_round_before_square() {
        // Round at the lower index: the square must survive with the merged mass
        let mut particles = vec![
            round(0.0, 0.0, 0.0, 0.0),
            round(50.0, 50.0, 4.0, 0.0),
            square(51.5, 50.0, 0.0, 2.0, 2.0),
        ];
        let pairs = vec![(1, 2)];
        let plan = ReactionPlan::build(&particles, &pairs, &bounds(), &ReactionParams::default());
        let summary = plan.commit(&mut particles, &mut RemovalQueue::new());
        assert_eq!(summary.reactions, 1);
        assert_eq!(summary.replaced, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(particles.len(), 2);
        assert_eq!(particles[0].pos, Vec2::ZERO);
        assert_eq!(particles[1].variant(), Variant::Square);
        assert_eq!(particles[1].mass, 3.0);
        assert!((particles[1].momentum() - Vec2::new(4.0, 4.0)).length() < EPS);
    }

    #[test]
    fn test_plan_molecule_reacts_once() {
        // 0-2 and 1-2 both collide; the later pair (1, 2) runs first and uses up 2
        let mut particles = vec![
            round(0.0, 0.0, 0.0, 0.0),
            round(3.0, 0.0, 0.0, 0.0),
            round(1.5, 0.0, 0.0, 0.0),
        ];
        let pairs = vec![(0, 2), (1, 2)];
        let plan = ReactionPlan::build(&particles, &pairs, &bounds(), &ReactionParams::default());
        assert_eq!(plan.reactions(), 1);
        plan.commit(&mut particles, &mut RemovalQueue::new());
        assert_eq!(particles.len(), 2);
        assert_eq!(particles[0].pos, Vec2::ZERO);
        assert_eq!(particles[1].variant(), Variant::Square);
        assert_eq!(particles[1].pos, Vec2::new(2.25, 0.0));
    }

    #[test]
    fn test_plan_insertions_follow_processing_order() {
        let mut particles = vec![
            round(0.0, 0.0, 0.0, 0.0),
            round(1.0, 0.0, 0.0, 0.0),
            square(100.0, 100.0, 0.0, 0.0, 2.0),
            square(101.0, 100.0, 0.0, 0.0, 2.0),
        ];
        let pairs = vec![(0, 1), (2, 3)];
        let plan = ReactionPlan::build(&particles, &pairs, &bounds(), &ReactionParams::default());
        let summary = plan.commit(&mut particles, &mut RemovalQueue::new());
        assert_eq!(summary.removed, 4);
        // Fission rounds first (pair processed first), then the merged square
        assert_eq!(particles.len(), 5);
        assert!(particles[..4].iter().all(Particle::is_round));
        assert_eq!(particles[4].variant(), Variant::Square);
    }

    #[test]
    fn test_empty_plan_commit_is_noop() {
        let mut particles = vec![round(0.0, 0.0, 1.0, 0.0)];
        let plan = ReactionPlan::build(&particles, &[], &bounds(), &ReactionParams::default());
        assert!(plan.is_empty());
        let summary = plan.commit(&mut particles, &mut RemovalQueue::new());
        assert_eq!(summary, CommitSummary::default());
        assert_eq!(particles.len(), 1);
    }
}
