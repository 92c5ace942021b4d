use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{crate_version, App, Arg};
use sincos::{Config, SinCos};
use sincos_harness::{driver, trace};

fn main() -> Result<()> {
    env_logger::init();
    let matches = App::new("sincos-sweep")
        .version(crate_version!())
        .about("Run every phase value through the pipeline and write a trace file")
        .arg(
            Arg::with_name("reference")
                .long("reference")
                .help("Reference configuration")
                .takes_value(true)
                .possible_values(&["narrow", "wide"])
                .default_value("narrow"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .help("Configuration as JSON, overrides --reference")
                .value_name("json")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("modulate")
                .long("modulate")
                .help("Pseudo random clock enable with this seed")
                .value_name("seed")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Trace file, standard output if omitted")
                .index(1),
        )
        .get_matches();

    let config: Config = match matches.value_of("config") {
        Some(json) => serde_json::from_str(json).context("invalid configuration")?,
        None => match matches.value_of("reference") {
            Some("wide") => Config::WIDE,
            _ => Config::NARROW,
        },
    };
    let mut enable = match matches.value_of("modulate") {
        Some(seed) => driver::Enable::modulated(seed.parse().context("invalid seed")?),
        None => driver::Enable::Continuous,
    };

    let writer: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = trace::Writer::new(writer);

    let core = SinCos::new(config);
    driver::sweep_with(&core, &mut enable, |y| writer.push(y));
    let count = writer.finish()?;
    log::info!("Wrote {} samples", count);
    Ok(())
}
