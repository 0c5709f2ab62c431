use approx::assert_relative_eq;
use reach_config::{JointPair, MonitorConfig, SegmentDef, SystemUncertainty};
use reach_core::{ReachError, ReachMonitor, ReachStatus};
use reach_geom::Point;
use rstest::rstest;

fn p(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

fn forearm_config() -> MonitorConfig {
    MonitorConfig::new(
        2,
        vec![1.0, 1.0],
        vec![10.0, 10.0],
        vec![SegmentDef {
            name: "forearm".into(),
            joints: JointPair { first: 0, second: 1 },
            thickness: 0.1,
        }],
        Vec::new(),
        SystemUncertainty {
            position_error: 0.0,
            velocity_error: 0.0,
            delay: 0.0,
        },
    )
    .expect("valid config")
}

fn measured_monitor(last_timestamp: f64) -> ReachMonitor {
    let mut monitor = ReachMonitor::new(&forearm_config());
    monitor.record_measurement(
        &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)],
        last_timestamp - 0.1,
    );
    monitor.record_measurement(&[p(0.05, 0.0, 0.0), p(1.05, 0.0, 0.0)], last_timestamp);
    monitor
}

#[test]
fn slices_match_the_robot_sample_grid() {
    let mut monitor = measured_monitor(0.9);
    // Human horizon: 1.0 - 0.9 + 0.5 = 0.6; robot horizon: 0.5 at 0.25 per
    // sample, so two slices of 0.3 each.
    let result = monitor.analyze_trajectory(1.0, 0.0, 0.5, 0.25);
    assert!(result.status.is_ok());
    assert_eq!(result.snapshots.len(), 2);

    let horizon_human = 1.0 - 0.9 + 0.5;
    assert_eq!(result.snapshots[0].begin, 0.0);
    assert_relative_eq!(result.snapshots[0].end, 0.3, epsilon = 1e-12);
    assert_relative_eq!(result.snapshots[1].begin, 0.3, epsilon = 1e-12);
    assert_relative_eq!(result.snapshots[1].end, horizon_human, epsilon = 1e-12);
    // Contiguity is exact, not approximate.
    assert_eq!(result.snapshots[0].end, result.snapshots[1].begin);
    // The last slice ends exactly at the human horizon.
    assert_eq!(result.snapshots[1].end, horizon_human / 2.0 * 2.0);

    for snapshot in &result.snapshots {
        assert_eq!(snapshot.capsules.len(), monitor.capsule_count());
    }
}

#[rstest]
#[case(0.5, 0.25, 2)] // exact division
#[case(0.5, 0.4, 2)] // ceil(1.25) = 2
#[case(0.5, 0.5, 1)] // single slice
#[case(0.1, 0.5, 1)] // robot horizon shorter than one sample
#[case(1.0, 0.1, 10)]
fn step_count_is_ceil_of_robot_horizon(
    #[case] goal: f64,
    #[case] sample_time: f64,
    #[case] expected: usize,
) {
    let mut monitor = measured_monitor(0.0);
    let result = monitor.analyze_trajectory(0.1, 0.0, goal, sample_time);
    assert!(result.status.is_ok());
    assert_eq!(result.snapshots.len(), expected);
}

#[test]
fn slices_are_contiguous_and_increasing() {
    let mut monitor = measured_monitor(0.0);
    let result = monitor.analyze_trajectory(0.05, 0.0, 1.0, 0.07);
    assert!(result.status.is_ok());
    assert_eq!(result.snapshots.len(), 15);

    for pair in result.snapshots.windows(2) {
        assert!(pair[0].begin < pair[0].end);
        assert_eq!(pair[0].end, pair[1].begin);
    }
}

#[test]
fn later_slices_are_never_tighter() {
    let mut monitor = measured_monitor(0.0);
    let result = monitor.analyze_trajectory(0.05, 0.0, 2.0, 0.25);
    assert!(result.status.is_ok());

    for pair in result.snapshots.windows(2) {
        for (earlier, later) in pair[0].capsules.iter().zip(&pair[1].capsules) {
            assert!(
                later.radius >= earlier.radius,
                "slice radii must be non-decreasing in time"
            );
        }
    }
}

#[rstest]
#[case(0.0)]
#[case(-0.25)]
#[case(f64::NAN)]
fn invalid_sample_time_is_rejected(#[case] sample_time: f64) {
    let mut monitor = measured_monitor(0.0);
    let result = monitor.analyze_trajectory(0.1, 0.0, 0.5, sample_time);
    assert!(matches!(
        result.status,
        ReachStatus::Faulted(ReachError::InvalidSampleTime { .. })
    ));
    assert!(result.snapshots.is_empty());
}

#[test]
fn non_advancing_motion_window_is_rejected() {
    let mut monitor = measured_monitor(0.0);
    let result = monitor.analyze_trajectory(0.1, 0.5, 0.5, 0.25);
    assert!(matches!(
        result.status,
        ReachStatus::Faulted(ReachError::InvalidHorizon { .. })
    ));
    assert!(result.snapshots.is_empty());

    let result = monitor.analyze_trajectory(0.1, 0.7, 0.5, 0.25);
    assert!(result.status.is_faulted());
}

#[test]
fn negative_human_horizon_is_rejected() {
    let mut monitor = measured_monitor(10.0);
    // Command far in the past relative to the measurement.
    let result = monitor.analyze_trajectory(0.0, 0.0, 0.5, 0.25);
    assert!(matches!(
        result.status,
        ReachStatus::Faulted(ReachError::InvalidHorizon { .. })
    ));
    assert!(result.snapshots.is_empty());
}

#[test]
fn trajectory_requires_a_measurement() {
    let mut monitor = ReachMonitor::new(&forearm_config());
    let result = monitor.analyze_trajectory(1.0, 0.0, 0.5, 0.25);
    assert_eq!(
        result.status,
        ReachStatus::Faulted(ReachError::NoMeasurement)
    );
    assert!(result.snapshots.is_empty());
}

#[test]
fn absurd_slice_counts_are_a_configuration_error() {
    let mut monitor = measured_monitor(0.0);
    let result = monitor.analyze_trajectory(0.1, 0.0, 1.0, 1e-12);
    assert!(matches!(
        result.status,
        ReachStatus::Faulted(ReachError::InvalidSampleTime { .. })
    ));
    assert!(result.snapshots.is_empty());
}
