//! Rolling reactor statistics
//!
//! One sample per tick, kept in a fixed-capacity ring so long runs do not
//! grow without bound. Every sample carries all five readings, so index `i`
//! refers to the same tick in every series.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::particle::{Particle, Variant};

/// Aggregate readings for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSample {
    /// All molecules
    pub count: u32,
    pub round_count: u32,
    pub square_count: u32,
    /// Sum of 1/2 m v^2
    pub total_energy: f32,
    /// Mean energy per molecule (temperature proxy)
    pub mean_energy: f32,
}

impl StatSample {
    /// Measure a particle set
    pub fn measure(particles: &[Particle]) -> Self {
        let mut sample = StatSample::default();
        for particle in particles {
            sample.total_energy += particle.kinetic_energy();
            match particle.variant() {
                Variant::Round => sample.round_count += 1,
                Variant::Square => sample.square_count += 1,
            }
        }
        sample.count = sample.round_count + sample.square_count;
        sample.mean_energy = sample.total_energy / sample.count.max(1) as f32;
        sample
    }

    /// Reading for one series
    pub fn get(&self, kind: SeriesKind) -> f32 {
        match kind {
            SeriesKind::Count => self.count as f32,
            SeriesKind::Round => self.round_count as f32,
            SeriesKind::Square => self.square_count as f32,
            SeriesKind::Energy => self.total_energy,
            SeriesKind::Temperature => self.mean_energy,
        }
    }
}

/// The five plotted series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Count,
    Round,
    Square,
    Energy,
    Temperature,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 5] = [
        SeriesKind::Count,
        SeriesKind::Round,
        SeriesKind::Square,
        SeriesKind::Energy,
        SeriesKind::Temperature,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeriesKind::Count => "Total",
            SeriesKind::Round => "Round",
            SeriesKind::Square => "Square",
            SeriesKind::Energy => "Energy",
            SeriesKind::Temperature => "Temp",
        }
    }
}

/// Bounded statistics history. Never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsSeries {
    samples: VecDeque<StatSample>,
    capacity: usize,
}

impl StatisticsSeries {
    /// Create a history holding at most `capacity` samples (at least 1),
    /// starting from a single zero sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut samples = VecDeque::with_capacity(capacity);
        samples.push_back(StatSample::default());
        Self { samples, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample, evicting the oldest when full
    pub fn push(&mut self, sample: StatSample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Measure `particles` and append the result
    pub fn record(&mut self, particles: &[Particle]) -> StatSample {
        let sample = StatSample::measure(particles);
        self.push(sample);
        sample
    }

    /// Truncate to a single zero sample
    pub fn reset(&mut self) {
        self.samples.clear();
        self.samples.push_back(StatSample::default());
    }

    /// Most recent sample
    pub fn latest(&self) -> StatSample {
        self.samples.back().copied().unwrap_or_default()
    }

    /// Samples oldest first
    pub fn samples(&self) -> impl Iterator<Item = &StatSample> {
        self.samples.iter()
    }

    /// One series, oldest first
    pub fn values(&self, kind: SeriesKind) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(move |s| s.get(kind))
    }

    /// Largest value in a series, or 1.0 when it peaks at zero (graph scale)
    pub fn peak(&self, kind: SeriesKind) -> f32 {
        let max = self.values(kind).fold(0.0_f32, f32::max);
        if max > 0.0 { max } else { 1.0 }
    }
}
