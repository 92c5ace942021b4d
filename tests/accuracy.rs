use sincos::{Config, Sample, SinCos};

use std::f64::consts::PI;

/// Error statistics of a sweep against `amplitude * (sin, cos)`, in LSB.
#[derive(Default, Debug)]
struct Stats {
    count: usize,
    sum_sq: f64,
    max: f64,
    max_magnitude: i32,
}

impl Stats {
    fn add(&mut self, config: &Config, phase: u64, have: Sample) {
        let amplitude = config.amplitude() as f64;
        let turn = (1u64 << config.phase_bits()) as f64;
        let (sin, cos) = (2. * PI * phase as f64 / turn).sin_cos();
        for err in [
            have.sin as f64 - amplitude * sin,
            have.cos as f64 - amplitude * cos,
        ] {
            self.sum_sq += err * err;
            self.max = self.max.max(err.abs());
        }
        self.count += 2;
        self.max_magnitude = self
            .max_magnitude
            .max(have.sin.abs())
            .max(have.cos.abs());
    }

    fn rms(&self) -> f64 {
        (self.sum_sq / self.count as f64).sqrt()
    }
}

fn sweep(config: Config, step: usize) -> Stats {
    let core = SinCos::new(config);
    let mut stats = Stats::default();
    for phase in (0..1u64 << config.phase_bits()).step_by(step) {
        stats.add(&config, phase, core.evaluate(phase));
    }
    println!("{config:?}: rms {:.4} max {:.4}", stats.rms(), stats.max);
    stats
}

#[test]
fn narrow_full_sweep() {
    let stats = sweep(Config::NARROW, 1);
    assert!(stats.rms() <= 0.34);
    assert!(stats.max <= 1.0);
    assert!(stats.max_magnitude <= Config::NARROW.amplitude());
}

#[test]
fn wide_strided_sweep() {
    let stats = sweep(Config::WIDE, 61);
    assert!(stats.rms() <= 0.34);
    assert!(stats.max <= 1.1);
    assert!(stats.max_magnitude <= Config::WIDE.amplitude());
}

#[test]
#[ignore = "2^26 phases, run with --ignored"]
fn wide_full_sweep() {
    let stats = sweep(Config::WIDE, 1);
    assert!(stats.rms() <= 0.34);
    assert!(stats.max <= 1.1);
    assert!(stats.max_magnitude <= Config::WIDE.amplitude());
}

#[test]
fn other_configurations() {
    for config in [
        Config::new(16, 18, 8, 1).unwrap(),
        Config::new(12, 16, 6, 2).unwrap(),
    ] {
        let stats = sweep(config, 1);
        assert!(stats.rms() <= 0.34);
        assert!(stats.max <= 1.0);
        assert!(stats.max_magnitude <= config.amplitude());
    }
}

#[test]
fn exact_symmetry() {
    for config in [Config::NARROW, Config::new(12, 16, 6, 2).unwrap()] {
        let core = SinCos::new(config);
        let turn = 1u64 << config.phase_bits();
        let mask = turn - 1;
        for x in 0..turn {
            let y = core.evaluate(x);
            let quarter = core.evaluate((x + turn / 4) & mask);
            let half = core.evaluate((x + turn / 2) & mask);
            assert_eq!(y.cos, quarter.sin, "phase {x}");
            assert_eq!(y.sin, -half.sin, "phase {x}");
            assert_eq!(y.cos, -half.cos, "phase {x}");
        }
    }
}

#[test]
fn wide_symmetry_strided() {
    let config = Config::WIDE;
    let core = SinCos::new(config);
    let turn = 1u64 << config.phase_bits();
    for x in (0..turn).step_by(997) {
        let y = core.evaluate(x);
        assert_eq!(y.cos, core.evaluate((x + turn / 4) % turn).sin);
        assert_eq!(y.sin, -core.evaluate((x + turn / 2) % turn).sin);
    }
}

#[test]
fn deterministic() {
    let a = SinCos::new(Config::WIDE);
    let b = SinCos::new(Config::WIDE);
    assert_eq!(a.table(), b.table());
    for phase in (0..1u64 << 26).step_by(65521) {
        assert_eq!(a.evaluate(phase), a.evaluate(phase));
        assert_eq!(a.evaluate(phase), b.evaluate(phase));
    }
}

#[test]
fn shared_between_threads() {
    let core = SinCos::new(Config::NARROW);
    let want: Vec<Sample> = (0..4u64).map(|i| core.evaluate(i << 17)).collect();
    let have: Vec<Sample> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let core = &core;
                s.spawn(move || core.evaluate(i << 17))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(have, want);
}
