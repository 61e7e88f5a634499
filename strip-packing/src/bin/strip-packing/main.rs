mod os_signal_termination;
mod result;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use packing_format::SolutionFile;
use result::CliError;
use result::CliResult;
use strip_packing::backend::PumpkinBackend;
use strip_packing::encoders::ArithmeticEncoder;
use strip_packing::encoders::BigMEncoder;
use strip_packing::encoders::Encoder;
use strip_packing::encoders::OrderEncoder;
use strip_packing::statistics::configure_statistic_logging;
use strip_packing::EncoderOptions;
use strip_packing::EncodingKind;
use strip_packing::Instance;
use strip_packing::PackingError;
use strip_packing::SearchDriver;
use strip_packing::SearchOptions;
use strip_packing::SearchOutcome;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instances to solve, one after another. Every file holds the container width
    /// (optionally followed by a cap on the container height), the number of blocks, and one
    /// line per block with its width and height.
    ///
    /// The solution of `<name>.txt` is written to `out-<name>.txt`.
    #[arg(required = true, verbatim_doc_comment)]
    instance_paths: Vec<PathBuf>,

    /// The encoding of the packing problem.
    ///
    /// The "declarative" encoding does not solve the instances, but writes a `<name>.dzn` data
    /// file for the external constraint-programming model.
    #[arg(long, value_enum, default_value_t)]
    encoding: EncodingKind,

    /// The wall-clock budget for a single instance in milliseconds. No new height is probed once
    /// the budget is used up.
    ///
    /// Possible values: u64
    #[arg(
        short = 't',
        long = "time-limit",
        default_value_t = 300_000,
        verbatim_doc_comment
    )]
    time_limit: u64,

    /// The time limit of a single probe in milliseconds.
    ///
    /// Possible values: u64
    #[arg(
        long = "probe-time-limit",
        default_value_t = 300_000,
        verbatim_doc_comment
    )]
    probe_time_limit: u64,

    /// Allow blocks to be rotated by 90 degrees.
    ///
    /// Possible values: bool
    #[arg(long, verbatim_doc_comment)]
    rotation: bool,

    /// Disables the symmetry-breaking and pruning rules (including the anchoring of the largest
    /// block).
    ///
    /// Possible values: bool
    #[arg(long = "no-symmetry-breaking", verbatim_doc_comment)]
    no_symmetry_breaking: bool,

    /// Do not fix the block of maximum area at the origin.
    ///
    /// Possible values: bool
    #[arg(long = "no-anchor", verbatim_doc_comment)]
    no_anchor: bool,

    /// Allow squares to be rotated as well.
    ///
    /// Possible values: bool
    #[arg(long = "no-rotation-pruning", verbatim_doc_comment)]
    no_rotation_pruning: bool,

    /// The directory to write the solutions to. By default, a solution is written next to its
    /// instance.
    #[arg(short = 'o', long = "output-dir", verbatim_doc_comment)]
    output_dir: Option<PathBuf>,

    /// Enables logging of the search progress.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables printing of statistics after every search.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

impl Args {
    fn search_options(&self) -> SearchOptions {
        SearchOptions::default()
            .with_time_budget(Duration::from_millis(self.time_limit))
            .with_probe_timeout(Duration::from_millis(self.probe_time_limit))
            .with_encoder_options(EncoderOptions {
                rotation_enabled: true,
                symmetry_breaking: !self.no_symmetry_breaking,
                anchor_largest: !self.no_anchor,
                prune_rotation: !self.no_rotation_pruning,
            })
    }

    fn output_path(&self, instance_path: &Path, file_name: String) -> PathBuf {
        match &self.output_dir {
            Some(directory) => directory.join(file_name),
            None => instance_path.with_file_name(file_name),
        }
    }
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("%%%stat:", None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose, args.log_statistics);

    let signal = OsSignal::install()?;

    for instance_path in args.instance_paths.iter() {
        if signal.is_raised() {
            warn!("Received a termination signal, skipping the remaining instances");
            break;
        }

        let started_at = Instant::now();
        let stem = instance_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| CliError::invalid_instance_path(instance_path.display()))?;

        let file = packing_format::read_instance(File::open(instance_path)?)?;

        if args.encoding == EncodingKind::Declarative {
            let output_path = args.output_path(instance_path, format!("{stem}.dzn"));
            let mut writer = BufWriter::new(File::create(&output_path)?);
            packing_format::write_dzn(&mut writer, &file)?;
            writer.flush()?;
            info!("Wrote {}", output_path.display());
            continue;
        }

        let instance = Instance::from_file(&file, args.rotation).map_err(PackingError::from)?;
        let options = args.search_options();
        let solution = match args.encoding {
            EncodingKind::Order => solve(OrderEncoder, &instance, options, &signal)?,
            EncodingKind::Arithmetic => solve(ArithmeticEncoder, &instance, options, &signal)?,
            EncodingKind::BigM => solve(BigMEncoder, &instance, options, &signal)?,
            EncodingKind::Declarative => continue,
        };

        let output_path = args.output_path(instance_path, format!("out-{stem}.txt"));
        let mut writer = BufWriter::new(File::create(&output_path)?);
        packing_format::write_solution(&mut writer, &solution)?;
        writer.flush()?;

        println!(
            "{}\t{:.3}",
            instance_path.display(),
            started_at.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

fn solve<E: Encoder>(
    encoder: E,
    instance: &Instance,
    options: SearchOptions,
    signal: &OsSignal,
) -> CliResult<SolutionFile> {
    let mut driver =
        SearchDriver::new(encoder, PumpkinBackend, options).with_interrupt(signal.flag());
    let report = driver.run(instance)?;

    let solution = match report.outcome {
        SearchOutcome::Feasible(packing) => SolutionFile::Solved(packing.to_layout(instance)),
        SearchOutcome::TimedOut {
            best: Some(packing),
        } => {
            warn!(
                "The packing of height {} is not proven to be minimal",
                packing.height
            );
            SolutionFile::Solved(packing.to_layout(instance))
        }
        SearchOutcome::TimedOut { best: None } => SolutionFile::Timeout,
    };

    Ok(solution)
}
