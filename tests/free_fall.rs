//! Integration tests for the fall, drag and floor-contact behaviour of a run.
use approx::assert_relative_eq;
use glam::DVec2;
use gravr::{Control, Phase, PhysicsConfig, Simulation, StepEvent};
use rstest::rstest;
use test_utils::assert_close;
use test_utils::physics::{
    drag_free_config, dropped, free_fall_time, metre_config, run_to_first_contact, run_until,
};

const G: f64 = 9.81;

#[rstest]
#[case::coarse(1e-3)]
#[case::fine(1e-4)]
fn drag_free_fall_matches_kinematics(#[case] dt: f64) {
    let mut sim = dropped(metre_config(), 1.0, 10.0);
    let steps = 5_000_usize.min((0.5 / dt).round() as usize);
    for _ in 0..steps {
        assert_eq!(sim.step(dt), StepEvent::Moved);
    }
    let t = sim.elapsed();
    assert_close("elapsed", t, 0.5, 1e-9);
    assert_close("velocity", sim.body().velocity().y, G * t, 1e-9);
    let fallen = sim.body().position().y - sim.initial_position().y;
    assert_close("displacement", fallen, 0.5 * G * t * t, G * t * dt);
}

#[rstest]
fn drag_converges_as_step_shrinks() {
    let config = PhysicsConfig {
        drag_multiplier: 8.0,
        ..metre_config()
    };
    let position_after = |dt: f64| {
        let mut sim = dropped(config.clone(), 0.056, 100.0);
        let steps = (1.0 / dt).round() as usize;
        for _ in 0..steps {
            let _ = sim.step(dt);
        }
        sim.body().position().y
    };
    let reference = position_after(1e-5);
    let coarse = (position_after(1e-2) - reference).abs();
    let medium = (position_after(1e-3) - reference).abs();
    let fine = (position_after(1e-4) - reference).abs();
    assert!(coarse > medium && medium > fine, "{coarse} {medium} {fine}");
    assert!(fine < 1e-3);
}

#[rstest]
fn terminal_velocity_balances_weight() {
    let config = PhysicsConfig {
        drag_multiplier: 1.0,
        ..metre_config()
    };
    let mass = 0.056;
    let mut sim = dropped(config.clone(), mass, 1_000.0);
    for _ in 0..3_000 {
        let _ = sim.step(0.01);
    }
    let area = std::f64::consts::PI * config.ball_radius.powi(2);
    let terminal = (2.0 * mass * G / (config.air_density * 0.44 * area)).sqrt();
    assert_relative_eq!(sim.body().velocity().y, terminal, max_relative = 0.01);
}

#[rstest]
fn first_contact_matches_free_fall_time() {
    let mut sim = dropped(drag_free_config(), 1.0, 2.0);
    let frames = (0..600).find(|_| {
        let _ = sim.advance(1.0 / 60.0);
        sim.has_touched_ground()
    });
    assert!(frames.is_some(), "ball never reached the floor");
    let first = sim.first_contact().expect("contact time latched");
    assert_close("first contact", first, free_fall_time(2.0, G), 0.005);
    assert_close("first contact", first, 0.638, 0.005);
}

#[rstest]
fn frame_rate_steps_reach_the_floor_in_real_time() {
    let frame = 1.0 / 60.0;
    let mut sim = dropped(drag_free_config(), 1.0, 2.0);
    let calls = run_until(&mut sim, frame, 600, StepEvent::is_contact)
        .expect("ball never reached the floor");
    let first = sim.first_contact().expect("contact time latched");
    assert_close("first contact", first, free_fall_time(2.0, G), 0.005);
    assert!((38..=40).contains(&calls), "{calls} frames");
    assert!(sim.elapsed() <= calls as f64 * frame + 1e-9);
    assert!(sim.elapsed() > (calls - 1) as f64 * frame);
}

#[rstest]
fn bounce_keeps_seventy_percent_of_impact_speed() {
    let mut sim = dropped(drag_free_config(), 1.0, 2.0);
    let Some(StepEvent::Bounced { impact_speed }) = run_to_first_contact(&mut sim, 0.001, 10_000)
    else {
        panic!("expected a bounce");
    };
    assert!(impact_speed > sim.config().settle_speed);
    assert_relative_eq!(sim.body().velocity().y, -0.7 * impact_speed);
    assert_eq!(sim.body().position().y, sim.config().floor_y);
    assert_eq!(sim.phase(), Phase::Running);
}

#[rstest]
fn slow_impact_ends_the_run() {
    let config = PhysicsConfig {
        settle_speed: 1e6,
        ..drag_free_config()
    };
    let mut sim = dropped(config, 1.0, 1.0);
    let Some(StepEvent::Settled(summary)) = run_to_first_contact(&mut sim, 0.001, 10_000) else {
        panic!("expected the ball to settle on first contact");
    };
    assert_eq!(sim.body().velocity().y, 0.0);
    assert_eq!(sim.phase(), Phase::Finished);
    assert_eq!(summary.first_contact, summary.total_time);
    assert_eq!(sim.step(0.001), StepEvent::Idle);
}

#[rstest]
fn first_contact_is_not_overwritten_by_later_bounces() {
    let mut sim = dropped(PhysicsConfig::default(), 0.056, 2.0);
    let mut bounces = 0;
    let steps = run_until(&mut sim, 0.002, 100_000, |event| {
        if matches!(event, StepEvent::Bounced { .. }) {
            bounces += 1;
        }
        matches!(event, StepEvent::Settled(_))
    });
    assert!(steps.is_some(), "ball never settled");
    assert!(bounces > 1);
    let summary = sim.summary().expect("settled run has a summary");
    assert_eq!(sim.first_contact(), Some(summary.first_contact));
    assert!(summary.first_contact < summary.total_time);
    assert_close("total time", summary.total_time, sim.elapsed(), 1e-12);
}

#[rstest]
fn reset_round_trip_restores_the_drop() {
    let mut sim = dropped(PhysicsConfig::default(), 0.056, 2.0);
    let _ = run_to_first_contact(&mut sim, 0.002, 10_000);
    assert!(sim.has_touched_ground());

    assert!(sim.apply(Control::Reset));
    assert_eq!(sim.phase(), Phase::Running);
    assert_eq!(sim.body().position(), sim.initial_position());
    assert_eq!(sim.body().velocity(), DVec2::ZERO);
    assert_eq!(sim.elapsed(), 0.0);
    assert_eq!(sim.first_contact(), None);
    assert_eq!(sim.summary(), None);
}

#[rstest]
fn heavier_balls_fall_faster_with_drag() {
    let time_to_floor = |mass: f64| {
        let mut sim = dropped(PhysicsConfig::default(), mass, 5.0);
        let _ = run_to_first_contact(&mut sim, 0.002, 100_000);
        sim.first_contact().expect("ball reaches the floor")
    };
    let light = time_to_floor(0.003);
    let heavy = time_to_floor(7.0);
    assert!(light > heavy, "light {light} s, heavy {heavy} s");
    assert_close("heavy ball", heavy, free_fall_time(5.0, G), 0.02);
}

#[rstest]
fn simulation_starts_at_drop_position() {
    let sim = Simulation::new(PhysicsConfig::default(), 1.0, 3.0).expect("valid simulation");
    let config = sim.config();
    assert_eq!(sim.initial_position().x, config.drop_x);
    assert_close(
        "start height",
        config.floor_y - sim.initial_position().y,
        3.0 * config.pixels_per_metre,
        1e-9,
    );
}
