//! Testes integrados para qel-orchestration

use qel_dispatch::{DispatchError, DispatchPolicy, ElevatorMotionState, FixedPresence, PresenceSource};
use qel_quantum::{GateKind, GateOp};
use crate::*;

fn fixed_sim(config: SimulationConfig) -> ElevatorSimulation<FixedPresence> {
    let presence = FixedPresence::new(config.building.clone());
    ElevatorSimulation::with_presence(config, presence).unwrap()
}

fn messages(sim: &ElevatorSimulation<FixedPresence>) -> Vec<String> {
    sim.logs().entries().map(|e| e.message.clone()).collect()
}

#[test]
fn test_submit_logs_call_and_sensor() {
    let mut sim = fixed_sim(SimulationConfig::default());
    sim.submit_request(3).unwrap();

    let entries: Vec<_> = sim.logs().entries().collect();
    assert_eq!(entries[0].kind, EventKind::Sensor);
    assert_eq!(entries[0].message, "Sensor: Enhanced detection triggered at Floor 3");
    assert_eq!(entries[1].kind, EventKind::Info);
    assert_eq!(entries[1].message, "Call received from Floor 3");
    assert!(sim.presence().snapshot(3).unwrap().detected);
}

#[test]
fn test_duplicate_submit_warns() {
    let mut sim = fixed_sim(SimulationConfig::default());
    sim.submit_request(3).unwrap();

    let result = sim.submit_request(3);
    assert_eq!(
        result,
        Err(OrchestrationError::Dispatch(DispatchError::DuplicateRequest(3)))
    );
    assert_eq!(sim.active_requests().len(), 1);

    let latest = sim.logs().latest().unwrap();
    assert_eq!(latest.kind, EventKind::Warning);
    assert_eq!(latest.message, "Floor 3 already has an active call");
}

#[test]
fn test_submit_outside_building() {
    let mut sim = fixed_sim(SimulationConfig::default());
    assert!(matches!(
        sim.submit_request(0),
        Err(OrchestrationError::Dispatch(DispatchError::UnknownLocation { .. }))
    ));
    assert!(sim.active_requests().is_empty());
}

#[test]
fn test_invalid_gate_leaves_state_unchanged() {
    let mut sim = fixed_sim(SimulationConfig::default());
    let before = sim.probabilities();

    assert!(sim.apply_gate(GateOp::single(GateKind::X, 5)).is_err());
    assert!(sim.apply_gate(GateOp::cnot(1, 1)).is_err());

    assert_eq!(sim.probabilities(), before);
    assert!(sim.register().history().is_empty());
    assert_eq!(sim.logs().latest().unwrap().kind, EventKind::Warning);
}

#[test]
fn test_gate_and_measure() {
    let mut config = SimulationConfig::default();
    config.seed = Some(11);
    let mut sim = fixed_sim(config);

    sim.apply_gate(GateOp::single(GateKind::H, 0)).unwrap();
    let probs = sim.probabilities();
    assert!((probs[0] - 0.5).abs() < 1e-12);
    assert!((probs[1] - 0.5).abs() < 1e-12);
    assert_eq!(sim.logs().latest().unwrap().kind, EventKind::Quantum);

    let outcome = sim.measure();
    assert!(outcome == 0 || outcome == 1);
    assert!((sim.probabilities()[outcome] - 1.0).abs() < 1e-12);
    assert!(sim.logs().latest().unwrap().message.starts_with("Measurement collapsed to |"));

    sim.reset_circuit();
    assert_eq!(sim.probabilities()[0], 1.0);
    assert!(sim.register().history().is_empty());
}

#[test]
fn test_measurement_stream_independent_from_sensor_seed() {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::simulation::measurement_seed;

    assert_ne!(measurement_seed(11), 11);
    assert_ne!(measurement_seed(0), 0);

    let mut config = SimulationConfig::default();
    config.seed = Some(11);
    let mut sim = fixed_sim(config);
    let mut expected = sim.register().clone();

    for qubit in 0..3 {
        sim.apply_gate(GateOp::single(GateKind::H, qubit)).unwrap();
        expected.apply(GateOp::single(GateKind::H, qubit)).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(measurement_seed(11));
    assert_eq!(sim.measure(), expected.measure_with(&mut rng));
}

#[test]
fn test_tick_serves_call() {
    let mut sim = fixed_sim(SimulationConfig::default());
    sim.submit_request(3).unwrap();

    let report = sim.tick();
    assert_eq!(report.tick, 1);
    assert_eq!(report.now, 1000);
    assert_eq!(report.dispatched.as_ref().map(|r| r.location), Some(3));
    assert!(sim.active_requests().is_empty());

    let log = messages(&sim);
    assert_eq!(log[0], "FCFS routing: Moving to Floor 3");
    assert_eq!(log[1], "Next destination: Floor 3 (FCFS)");

    sim.tick();
    assert_eq!(sim.motion_state().position, 2);

    sim.tick();
    assert!(sim.motion_state().doors_open);
    assert_eq!(sim.logs().latest().unwrap().kind, EventKind::Success);
    assert_eq!(sim.logs().latest().unwrap().message, "Arrived at Floor 3 - Doors opening");

    // Portas fecham em 3000 + 2500
    sim.tick();
    sim.tick();
    assert!(sim.motion_state().doors_open);
    sim.tick();
    assert!(!sim.motion_state().doors_open);
    assert_eq!(sim.logs().latest().unwrap().message, "Floor 3 service complete - Doors closed");
}

#[test]
fn test_call_at_current_floor_is_consumed() {
    let mut sim = fixed_sim(SimulationConfig::default());
    sim.submit_request(1).unwrap();

    let report = sim.tick();
    assert_eq!(report.dispatched.map(|r| r.location), Some(1));
    assert!(sim.active_requests().is_empty());
    assert_eq!(sim.motion_state(), ElevatorMotionState::parked(1));
    assert_eq!(sim.logs().latest().unwrap().message, "Already at Floor 1 - Request served");
}

#[test]
fn test_toggle_sensor_override() {
    let mut sim = fixed_sim(SimulationConfig::default());

    assert!(sim.toggle_sensor_override(2).unwrap());
    assert!(sim.presence().snapshot(2).unwrap().detected);
    assert_eq!(
        sim.logs().latest().unwrap().message,
        "Manual override: Presence enabled at Floor 2"
    );

    assert!(!sim.toggle_sensor_override(2).unwrap());
    assert_eq!(sim.logs().latest().unwrap().kind, EventKind::Sensor);

    assert!(sim.toggle_sensor_override(9).is_err());
}

#[test]
fn test_select_policy() {
    let mut sim = fixed_sim(SimulationConfig::default());
    sim.select_policy(DispatchPolicy::CostBased);

    assert_eq!(sim.policy(), DispatchPolicy::CostBased);
    assert_eq!(
        sim.logs().latest().unwrap().message,
        "Dispatch policy set to cost optimization"
    );
}

#[test]
fn test_log_is_bounded() {
    let mut sim = fixed_sim(SimulationConfig::default());
    for _ in 0..20 {
        sim.apply_gate(GateOp::single(GateKind::X, 0)).unwrap();
    }
    sim.submit_request(4).unwrap();
    for _ in 0..10 {
        sim.tick();
    }

    assert_eq!(sim.logs().len(), 25);
}

#[test]
fn test_snapshot_serializes() {
    let mut sim = fixed_sim(SimulationConfig::default());
    sim.apply_gate(GateOp::cnot(0, 1)).unwrap();
    sim.submit_request(2).unwrap();

    let json = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(json["tick"], 0);
    assert_eq!(json["policy"], "fcfs");
    assert_eq!(json["motion"]["position"], 1);
    assert_eq!(json["requests"][0]["location"], 2);
    assert_eq!(json["presence"].as_array().unwrap().len(), 5);
    assert_eq!(json["probabilities"].as_array().unwrap().len(), 8);
    assert_eq!(json["log"][0]["kind"], "sensor");
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = SimulationConfig::default();
    config.qubits = 30;
    let presence = FixedPresence::new(config.building.clone());
    assert!(ElevatorSimulation::with_presence(config, presence).is_err());
}
