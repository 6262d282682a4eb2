//! Reactor simulation module
//!
//! All engine logic lives here. This module stays free of rendering and
//! platform code:
//! - Single-threaded, one tick runs to completion
//! - Stable iteration order (creation order)
//! - Mutation of the molecule list happens only in the commit phase

pub mod bounds;
pub mod collision;
pub mod command;
pub mod particle;
pub mod reaction;
pub mod state;
pub mod stats;
pub mod tick;
pub mod wall;

pub use bounds::ReactorBounds;
pub use collision::{
    aabb_aabb_overlap, circle_aabb_overlap, circle_circle_overlap, detect_collisions,
};
pub use command::{ReactorCommand, apply_command};
pub use particle::{Particle, Shape, Variant};
pub use reaction::{
    CommitSummary, ReactionOutcome, ReactionParams, ReactionPlan, ReactionRule, RemovalQueue,
    fission_product_count, react,
};
pub use state::{Reactor, ReactorSnapshot};
pub use stats::{SeriesKind, StatSample, StatisticsSeries};
pub use tick::{TickReport, clamp_frame_dt, tick};
pub use wall::{WallContact, WallState};
