//! Simulation tick
//!
//! One tick runs to completion in a fixed order:
//! integrate -> walls -> detect -> react -> commit -> statistics.

use super::collision::detect_collisions;
use super::reaction::{CommitSummary, ReactionPlan};
use super::state::Reactor;
use super::stats::StatSample;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Colliding pairs found by the scan
    pub collisions: usize,
    /// Result of applying the reactions
    pub reactions: CommitSummary,
    /// Right wall impacts during this tick
    pub right_hits: u32,
    /// Statistics sample recorded at the end of the tick
    pub sample: StatSample,
}

/// Clamp a frame delta before handing it to [`tick`].
///
/// The engine integrates whatever `dt` it is given; long frame hitches must
/// be cut down by the caller. Negative and NaN deltas become zero.
pub fn clamp_frame_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, max_dt.max(0.0))
}

/// Advance the reactor by `dt` simulated seconds
pub fn tick(reactor: &mut Reactor, dt: f32) -> TickReport {
    reactor.wall.advance_window(dt);
    let hits_before = reactor.wall.right_hits();

    // Move, then bounce off the walls
    for particle in reactor.particles.iter_mut() {
        particle.integrate(dt);
        reactor.wall.reflect(particle, &reactor.bounds);
    }
    let right_hits = reactor.wall.right_hits().saturating_sub(hits_before);

    // Resolve reactions against a stable index space, then commit once
    let pairs = detect_collisions(&reactor.particles);
    let reactions = if pairs.is_empty() {
        CommitSummary::default()
    } else {
        let plan = ReactionPlan::build(
            &reactor.particles,
            &pairs,
            &reactor.bounds,
            &reactor.params,
        );
        plan.commit(&mut reactor.particles, &mut reactor.removals)
    };

    let sample = reactor.stats.record(&reactor.particles);
    reactor.time += dt as f64;
    reactor.ticks += 1;

    if reactions.reactions > 0 {
        log::debug!(
            "tick {}: {} collisions, {} reactions (-{} ~{} +{}), {} molecules",
            reactor.ticks,
            pairs.len(),
            reactions.reactions,
            reactions.removed,
            reactions.replaced,
            reactions.inserted,
            sample.count
        );
    }

    TickReport {
        collisions: pairs.len(),
        reactions,
        right_hits,
        sample,
    }
}
