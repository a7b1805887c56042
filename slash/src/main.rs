#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use slash::{Options, Report};

fn main() {
    println!("slash -- An interpreter for the Slash/A language");
    println!("{}", slasha::header());
    println!();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SOURCE")
                .help("Slash/A source file to run")
                .index(1),
        )
        .arg(
            Arg::with_name("bytecode")
                .short("b")
                .long("bytecode")
                .takes_value(true)
                .value_name("FILE")
                .help("Runs an assembled .slx file instead of source"),
        )
        .group(
            ArgGroup::with_name("program")
                .args(&["SOURCE", "bytecode"])
                .required(true),
        )
        .arg(
            Arg::with_name("emit")
                .short("e")
                .long("emit")
                .takes_value(true)
                .value_name("FILE")
                .conflicts_with("bytecode")
                .help("Assembles SOURCE into an .slx file instead of running it"),
        )
        .arg(
            Arg::with_name("data")
                .short("d")
                .long("data")
                .takes_value(true)
                .value_name("SIZE")
                .default_value("10")
                .help("Sets the data tape length"),
        )
        .arg(
            Arg::with_name("label")
                .short("l")
                .long("label")
                .takes_value(true)
                .value_name("SIZE")
                .default_value("10")
                .help("Sets the label tape length"),
        )
        .arg(
            Arg::with_name("numeric")
                .short("n")
                .long("numeric")
                .takes_value(true)
                .value_name("COUNT")
                .default_value("32768")
                .help("Sets the number of numeric literal instructions"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .takes_value(true)
                .value_name("SEED")
                .default_value("-2237")
                .allow_hyphen_values(true)
                .help("Sets the random seed"),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .takes_value(true)
                .value_name("SECONDS")
                .default_value("0")
                .help("Stops the program after this many seconds (0 for no limit)"),
        )
        .arg(
            Arg::with_name("max-loop-depth")
                .long("max-loop-depth")
                .takes_value(true)
                .value_name("DEPTH")
                .default_value("-1")
                .allow_hyphen_values(true)
                .help("Fails programs nesting loops deeper than this (negative to disable)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Enables debug logging (twice for per-instruction tracing)"),
        )
        .get_matches();

    match matches.occurrences_of("verbose") {
        0 => {}
        1 => init_logging(LevelFilter::Debug),
        _ => init_logging(LevelFilter::Trace),
    }

    let options = Options {
        data_size: value_t!(matches.value_of("data"), u32).unwrap_or_else(|e| e.exit()),
        label_size: value_t!(matches.value_of("label"), u32).unwrap_or_else(|e| e.exit()),
        numeric_instructions: value_t!(matches.value_of("numeric"), u32)
            .unwrap_or_else(|e| e.exit()),
        seed: value_t!(matches.value_of("seed"), i64).unwrap_or_else(|e| e.exit()),
        max_rtime: value_t!(matches.value_of("timeout"), u64).unwrap_or_else(|e| e.exit()),
        max_loop_depth: value_t!(matches.value_of("max-loop-depth"), i32)
            .unwrap_or_else(|e| e.exit()),
    };

    let report = match matches.value_of("SOURCE") {
        Some(path) => {
            let source = match std::fs::read_to_string(path) {
                Ok(source) => source,
                Err(_) => {
                    println!("Cannot open file {}.", path);
                    println!();
                    std::process::exit(1);
                }
            };

            if let Some(target) = matches.value_of("emit") {
                emit(&source, target, &options);
                return;
            }

            slash::run_source(&source, &options).unwrap_or_else(|err| fail(err))
        }
        None => {
            let path = matches.value_of("bytecode").unwrap();
            slash::run_program_file(path, &options).unwrap_or_else(|err| fail(err))
        }
    };

    print_report(&report);
}

fn emit(source: &str, target: &str, options: &Options) {
    let program = slash::assemble_source(source, options).unwrap_or_else(|err| fail(err));

    if let Err(err) = slxfile::write_file(target, &program) {
        println!("Cannot write file {}: {}", target, err);
        println!();
        std::process::exit(1);
    }

    println!("Wrote {} ({} bytes).", target, program.required_size());
    println!();
}

fn print_report(report: &Report) {
    if report.exit.failed() {
        println!("Program failed (time-out, loop depth, etc)!");
    }

    println!();
    println!("Total number of operations: {}", report.total_ops);
    println!(
        "Total number of invalid operations: {}",
        report.total_invalid_ops
    );
    println!(
        "Total number of inputs before an output: {}",
        report.total_inputs_before_output
    );
    println!();
}

fn fail(err: slash::Error) -> ! {
    println!("{}", err);
    println!();
    std::process::exit(1);
}

fn init_logging(level: LevelFilter) {
    let encoder = PatternEncoder::new("[{l}] {m}{n}");

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(encoder))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .unwrap();

    let _handle = log4rs::init_config(config).unwrap();
}
