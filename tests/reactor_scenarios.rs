use glam::Vec2;
use reactor_sim::Settings;
use reactor_sim::sim::{
    Reactor, ReactorCommand, SeriesKind, StatSample, Variant, apply_command, tick,
};

const EPS: f32 = 1e-3;

fn reactor() -> Reactor {
    Reactor::new(Settings::seeded(2024)).expect("default settings are valid")
}

/// Two rounds on a head-on course fuse into one square at their midpoint.
#[test]
fn round_pair_becomes_one_square() {
    let mut r = reactor();
    let unit_mass = r.settings().round_mass;
    r.add_round_at(Vec2::new(200.0, 500.0), Vec2::new(20.0, 5.0));
    r.add_round_at(Vec2::new(201.8, 500.0), Vec2::new(-20.0, 5.0));

    let dt = 0.01;
    let report = tick(&mut r, dt);

    assert_eq!(report.reactions.reactions, 1);
    assert_eq!(r.len(), 1);
    let sq = &r.particles()[0];
    assert_eq!(sq.variant(), Variant::Square);
    assert_eq!(sq.mass, 2.0 * unit_mass);
    // Midpoint of the pre-collision centers, shifted by one step of the shared drift
    let expected = Vec2::new(200.9, 500.0) + Vec2::new(0.0, 5.0) * dt;
    assert!((sq.pos - expected).length() < EPS, "{:?}", sq.pos);
    assert_eq!(sq.vel, Vec2::new(0.0, 5.0));
    assert!(r.particles().iter().all(|p| !p.is_round()));
}

/// Two mass-3 squares shatter into six rounds carrying the same momentum.
#[test]
fn square_pair_fissions_into_six_rounds() {
    let mut r = reactor();
    r.add_square_at(Vec2::new(300.0, 500.0), Vec2::new(12.0, -3.0), 3.0);
    r.add_square_at(Vec2::new(301.5, 500.0), Vec2::new(-4.0, 7.0), 3.0);

    let dt = 0.001;
    let before = r.total_momentum();
    tick(&mut r, dt);

    assert_eq!(r.len(), 6);
    assert!(r.particles().iter().all(|p| p.is_round()));
    assert!((r.total_momentum() - before).length() < EPS);

    // Products sit on a ring around the collision point
    let center: Vec2 = r.particles().iter().map(|p| p.pos).sum::<Vec2>() / 6.0;
    let radius = r.particles()[0].pos.distance(center);
    assert!(radius > 0.0);
    for p in r.particles() {
        assert!((p.pos.distance(center) - radius).abs() < EPS);
    }

    let sample = r.stats().latest();
    assert_eq!(sample.round_count, 6);
    assert_eq!(sample.square_count, 0);
}

/// A round hitting a square is swallowed; the square keeps its place in the list.
#[test]
fn round_absorbed_by_square() {
    let mut r = reactor();
    r.add_round_at(Vec2::new(100.0, 400.0), Vec2::ZERO);
    r.add_round_at(Vec2::new(250.0, 500.0), Vec2::new(30.0, 0.0));
    r.add_square_at(Vec2::new(252.0, 500.0), Vec2::new(0.0, -10.0), 2.0);
    r.add_round_at(Vec2::new(400.0, 600.0), Vec2::ZERO);

    let before = r.total_momentum();
    tick(&mut r, 0.001);

    assert_eq!(r.len(), 3);
    assert_eq!(r.particles()[0].pos, Vec2::new(100.0, 400.0));
    let sq = &r.particles()[1];
    assert_eq!(sq.variant(), Variant::Square);
    assert_eq!(sq.mass, 3.0);
    assert_eq!(r.particles()[2].pos, Vec2::new(400.0, 600.0));
    assert!((r.total_momentum() - before).length() < EPS);
}

/// Heated left wall doubles both velocity components on bounce.
#[test]
fn heated_left_wall_scales_velocity() {
    let mut r = reactor();
    apply_command(&mut r, ReactorCommand::SetTemperature(2.0));
    let left = r.bounds().inner_left();
    r.add_round_at(Vec2::new(left + 1.2, 500.0), Vec2::new(-40.0, 10.0));

    tick(&mut r, 0.01);
    let p = &r.particles()[0];
    assert!((p.vel - Vec2::new(80.0, 20.0)).length() < EPS);
    assert!((p.pos.x - (left + 1.0)).abs() < EPS);
}

/// The right-wall counter restarts after each simulated second.
#[test]
fn right_wall_window_restarts_every_second() {
    let mut r = reactor();
    let right = r.bounds().inner_right();
    // Pinned against the right wall: hits every tick
    r.add_round_at(Vec2::new(right - 1.0, 500.0), Vec2::ZERO);

    let dt = 0.25;
    let mut seen = Vec::new();
    for _ in 0..8 {
        tick(&mut r, dt);
        seen.push(r.wall().right_hits());
    }
    // Window resets at the start of ticks 4 and 8
    assert_eq!(seen, vec![1, 2, 3, 1, 2, 3, 4, 1]);
    assert_eq!(r.wall().last_window_hits(), 4);
}

/// Clearing twice leaves the same single zero sample.
#[test]
fn clear_all_is_idempotent() {
    let mut r = reactor();
    r.populate(50);
    for _ in 0..10 {
        tick(&mut r, 1.0 / 60.0);
    }
    assert!(r.stats().len() > 1);

    apply_command(&mut r, ReactorCommand::ClearAll);
    let once: Vec<StatSample> = r.stats().samples().copied().collect();
    apply_command(&mut r, ReactorCommand::ClearAll);
    let twice: Vec<StatSample> = r.stats().samples().copied().collect();

    assert_eq!(once, vec![StatSample::default()]);
    assert_eq!(once, twice);
    assert!(r.is_empty());
}

/// Statistics history stays within its configured capacity.
#[test]
fn history_is_bounded() {
    let settings = Settings {
        history_capacity: 16,
        ..Settings::seeded(5)
    };
    let mut r = Reactor::new(settings).unwrap();
    r.populate(20);
    for _ in 0..100 {
        tick(&mut r, 1.0 / 60.0);
    }
    assert_eq!(r.stats().len(), 16);
    for kind in SeriesKind::ALL {
        assert_eq!(r.stats().values(kind).count(), 16);
    }
}

/// A busy reactor keeps every molecule inside and every reading finite.
#[test]
fn crowded_reactor_stays_consistent() {
    let mut r = reactor();
    r.populate(1000);
    for _ in 0..10 {
        apply_command(&mut r, ReactorCommand::AddSquare);
    }
    for step in 0..300 {
        if step == 100 {
            apply_command(&mut r, ReactorCommand::IncreaseTemperature);
        }
        if step == 200 {
            apply_command(&mut r, ReactorCommand::NarrowReactor);
        }
        let report = tick(&mut r, 1.0 / 60.0);
        assert_eq!(report.sample.count as usize, r.len());
        assert!(report.sample.total_energy.is_finite());
        assert!(report.sample.mean_energy.is_finite());
    }
    for p in r.particles() {
        assert!(r.bounds().contains(p.pos, p.half_extent()), "{:?}", p.pos);
        assert!(p.mass > 0.0);
    }
}
