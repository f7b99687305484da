extern crate buddhabrot;
extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate num;
extern crate num_cpus;
extern crate rand;

use buddhabrot::{ImageConsumer, IntensityImage, PlaneRegion, RenderConfig, Session};
use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use num::Complex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const SAMPLES: &str = "samples";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const SEED: &str = "seed";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("buddha")
        .version("0.3.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Monte-Carlo Buddhabrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (8-bit grayscale PGM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        16_384,
                        "Could not parse output image size",
                        "Output image size must be between 1 and 16384",
                    )
                })
                .help("Width and height of the output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the sampled region"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the sampled region"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .validator(|s| match usize::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse sample count".to_string()),
                })
                .help("Number of random samples to draw (default: 30 per pixel)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: one per core)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Maximum number of iterations per orbit"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| match u64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse seed".to_string()),
                })
                .help("Seed for the random generator, for reproducible renders"),
        )
        .get_matches()
}

/// Writes the finished image to disk as a binary graymap.
struct PnmFile {
    path: PathBuf,
}

impl ImageConsumer for PnmFile {
    fn render(&mut self, image: &IntensityImage) -> Result<(), failure::Error> {
        let output = File::create(&self.path)?;
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        let size = image.size() as u32;
        encoder.encode(image.as_bytes(), size, size, ColorType::Gray(8))?;
        Ok(())
    }
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, failure::Error> {
    // The validators have already vetted every value below.
    let size = usize::from_str(matches.value_of(SIZE).unwrap_or("1000"))?;
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("Error parsing left lower point"))?;
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("Error parsing right upper point"))?;
    let samples = match matches.value_of(SAMPLES) {
        Some(s) => usize::from_str(s)?,
        None => size * size * 30,
    };
    Ok(RenderConfig {
        size,
        region: PlaneRegion::new(leftlower, rightupper)?,
        samples,
        iterations: usize::from_str(matches.value_of(ITERATIONS).unwrap_or("100"))?,
        threads: match matches.value_of(THREADS) {
            Some(s) => usize::from_str(s)?,
            None => num_cpus::get(),
        },
    })
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let config = config_from(matches)?;
    let rng = match matches.value_of(SEED) {
        Some(seed) => StdRng::seed_from_u64(u64::from_str(seed)?),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, rng)?;
    let mut output = PnmFile {
        path: PathBuf::from(matches.value_of(OUTPUT).unwrap_or_default()),
    };
    session.present(&mut output)
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
