use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use reach_config::{ExtremityDef, JointPair, MonitorConfig, SegmentDef, SystemUncertainty};
use reach_core::{NullSink, ReachMonitor};
use reach_geom::Point;

/// Upper-body rig: 10 joints in a chain, 9 segments, 2 extremities.
fn upper_body_config() -> MonitorConfig {
    let n = 10;
    let segments = (0..n - 1)
        .map(|i| SegmentDef {
            name: format!("link_{i}"),
            joints: JointPair {
                first: i,
                second: i + 1,
            },
            thickness: 0.1,
        })
        .collect();
    let extremities = vec![
        ExtremityDef {
            name: "left_hand".into(),
            base: 3,
            end: 4,
            length: 0.4,
            thickness: 0.1,
        },
        ExtremityDef {
            name: "right_hand".into(),
            base: 8,
            end: 9,
            length: 0.4,
            thickness: 0.1,
        },
    ];
    MonitorConfig::new(
        n,
        vec![2.0; n],
        vec![25.0; n],
        segments,
        extremities,
        SystemUncertainty {
            position_error: 0.005,
            velocity_error: 0.01,
            delay: 0.004,
        },
    )
    .expect("valid config")
}

fn measured_monitor() -> ReachMonitor {
    let mut monitor = ReachMonitor::with_sink(&upper_body_config(), Arc::new(NullSink));
    let frame_a: Vec<Point> = (0..10)
        .map(|i| Point::new(i as f64 * 0.2, 0.0, 1.2))
        .collect();
    let frame_b: Vec<Point> = (0..10)
        .map(|i| Point::new(i as f64 * 0.2 + 0.01, 0.005, 1.2))
        .collect();
    monitor.record_measurement(&frame_a, 0.0);
    monitor.record_measurement(&frame_b, 0.033);
    monitor
}

pub fn bench_analysis(c: &mut Criterion) {
    let mut g = c.benchmark_group("reachability");
    g.sample_size(100);

    let mut monitor = measured_monitor();
    g.bench_function("analyze_single_shot", |b| {
        b.iter(|| {
            let status = monitor.analyze(black_box(0.05), black_box(0.2));
            black_box(status);
        })
    });

    for &slices in &[4usize, 20, 100] {
        let sample_time = 1.0 / slices as f64;
        g.bench_function(format!("analyze_trajectory_{slices}_slices"), |b| {
            b.iter(|| {
                let result = monitor.analyze_trajectory(
                    black_box(0.05),
                    0.0,
                    black_box(1.0),
                    black_box(sample_time),
                );
                black_box(result);
            })
        });
    }
    g.finish();
}

criterion_group!(reachability, bench_analysis);
criterion_main!(reachability);
