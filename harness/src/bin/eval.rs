use anyhow::{Context, Result};
use clap::{crate_version, App, Arg};
use sincos_harness::{quality, trace};

fn main() -> Result<()> {
    env_logger::init();
    let matches = App::new("sincos-eval")
        .version(crate_version!())
        .about("Evaluate the waveform quality of a sweep trace")
        .arg(
            Arg::with_name("DATAFILE")
                .help("Trace file of a full sweep")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("harmonics")
                .long("harmonics")
                .help("Highest harmonic of the harmonic limited SFDR")
                .takes_value(true)
                .default_value("16"),
        )
        .arg(
            Arg::with_name("data-bits")
                .long("data-bits")
                .help("Also report the error against the nominal amplitude of this data width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print the report as JSON"),
        )
        .get_matches();

    let path = matches.value_of("DATAFILE").context("missing data file")?;
    let harmonics: usize = matches
        .value_of("harmonics")
        .unwrap_or("16")
        .parse()
        .context("invalid harmonics")?;

    log::info!("Reading {}", path);
    let samples =
        trace::read_file(path).with_context(|| format!("reading {}", path))?;
    log::info!("Evaluating {} samples", samples.len());
    let report = quality::evaluate(&samples, harmonics)?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    if let Some(bits) = matches.value_of("data-bits") {
        let bits: u32 = bits.parse().context("invalid data width")?;
        anyhow::ensure!((2..=32).contains(&bits), "invalid data width {}", bits);
        let amplitude = ((1i64 << (bits - 1)) - 1) as i32;
        let (rms, peak) = quality::nominal_error(&samples, amplitude);
        println!();
        println!("nominal amplitude {}", amplitude);
        println!("rms error =     {:20.12} lsb rms", rms);
        println!("peak error =    {:20.12} lsb", peak);
    }
    Ok(())
}
