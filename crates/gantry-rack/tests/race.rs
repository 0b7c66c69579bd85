//! End-to-end comparison sessions.

use gantry_rack::{
    CABLES, ComparisonEngine, HumanPhase, RackError, RobotPhase,
};

/// Drive the engine in frame-sized steps.
fn run_ms(engine: &mut ComparisonEngine, total_ms: f64) {
    let mut elapsed = 0.0;
    while elapsed < total_ms {
        engine.tick(16.0);
        elapsed += 16.0;
    }
}

#[test]
fn quick_human_beats_robot_but_robot_is_flawless() {
    let mut engine = ComparisonEngine::new(4);
    engine.start_both();

    // Human rushes through, fat-fingering the middle cable.
    for port in [5, 13, 18] {
        engine.human_grab().unwrap();
        engine.human_plug(port).unwrap();
    }
    run_ms(&mut engine, 600.0);

    assert!(engine.human().is_complete());
    assert!(!engine.robot().is_complete());
    let outcome = engine.human_outcome().unwrap();
    assert_eq!(outcome.error_count, 1);

    // Let the robot finish its ten seconds.
    run_ms(&mut engine, 11_000.0);
    assert!(engine.robot().is_complete());
    for (plug, cable) in engine.robot().plugged().iter().zip(CABLES) {
        assert_eq!(plug.port, cable.target_port);
        assert!(plug.correct);
    }

    let report = engine.fast_forward_30_days().unwrap();
    assert!(report.robot.mttr_minutes < report.human.mttr_minutes);
}

#[test]
fn slow_human_watches_robot_phases() {
    let mut engine = ComparisonEngine::new(8);
    engine.start_both();

    // The human never touches a cable; the robot works through all three
    // segments and every phase along the way.
    let mut phases = Vec::new();
    let mut elapsed = 0.0;
    while elapsed < 11_000.0 {
        engine.tick(16.0);
        elapsed += 16.0;
        if let Some(phase) = engine.robot().phase()
            && phases.last() != Some(&phase)
        {
            phases.push(phase);
        }
    }

    assert!(engine.robot().is_complete());
    assert_eq!(engine.human().phase(), HumanPhase::Idle);
    assert_eq!(engine.human().elapsed_ms(), 0.0);
    // Three cables, five phases each.
    assert_eq!(phases.len(), 15);
    assert_eq!(phases[0], RobotPhase::Scanning);
    assert_eq!(phases[4], RobotPhase::Verifying);
    assert_eq!(phases[5], RobotPhase::Scanning);

    assert!(matches!(
        engine.fast_forward_30_days(),
        Err(RackError::NotComplete)
    ));
}

#[test]
fn identical_sessions_are_identical() {
    let script = |seed: u64| {
        let mut engine = ComparisonEngine::new(seed);
        engine.start_both();
        engine.human_grab().unwrap();
        engine.human_plug(5).unwrap();
        run_ms(&mut engine, 3_000.0);
        engine.human_grab().unwrap();
        engine.human_plug(12).unwrap();
        engine.human_grab().unwrap();
        engine.human_plug(18).unwrap();
        run_ms(&mut engine, 9_000.0);
        let report = *engine.fast_forward_30_days().unwrap();
        (engine.snapshot(), report)
    };

    let (snap_a, report_a) = script(123);
    let (snap_b, report_b) = script(123);
    assert_eq!(snap_a, snap_b);
    assert_eq!(report_a, report_b);
}
