use anyhow::{bail, Result};
use clap::{crate_version, App, Arg};
use sincos::{Config, SinCos};
use sincos_harness::{
    driver::{self, Enable},
    vectors::{self, Sequence},
};

fn main() -> Result<()> {
    env_logger::init();
    let matches = App::new("sincos-check")
        .version(crate_version!())
        .about("Check selected phases through the pipeline against a floating point reference")
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .help("Seed of the clock enable modulation")
                .takes_value(true)
                .default_value("1"),
        )
        .get_matches();
    let seed: u64 = matches.value_of("seed").unwrap_or("1").parse()?;

    let mut failures = 0;
    for modulate in [false, true] {
        for config in [Config::NARROW, Config::WIDE] {
            println!(
                "Test {}-bit data, {}-bit phase core{}",
                config.data_bits(),
                config.phase_bits(),
                if modulate {
                    " with clock-enable modulation"
                } else {
                    ""
                }
            );
            let core = SinCos::new(config);
            for sequence in Sequence::ALL {
                let phases = sequence.phases(&config);
                let mut enable = if modulate {
                    Enable::modulated(seed)
                } else {
                    Enable::Continuous
                };
                let samples = driver::run(&core, phases.iter().copied(), &mut enable);
                let errors: Vec<_> = phases
                    .iter()
                    .zip(samples)
                    .filter_map(|(&phase, y)| vectors::check(&config, phase, y).err())
                    .collect();
                for e in errors.iter() {
                    log::error!("{}", e);
                }
                println!("  {:?}: {} phases, {} errors", sequence, phases.len(), errors.len());
                failures += errors.len();
            }
        }
    }
    if failures > 0 {
        bail!("{} wrong answers", failures);
    }
    println!("done");
    Ok(())
}
