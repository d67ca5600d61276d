//!
//! The experiment runner executable.
//!

pub(crate) mod arguments;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use experiment_runner::Builder;

use self::arguments::Arguments;
use self::arguments::Command;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => experiment_runner::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            experiment_runner::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let arguments = Arguments::validate(arguments)?;
    if !arguments.quiet {
        println!(
            "    {} {} v{}",
            "Starting".bright_green().bold(),
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION"),
        );
    }

    let setup = Arc::new(experiment_runner::Setup::from_path(
        arguments.config.as_path(),
    )?);
    let root = std::env::current_dir()
        .map_err(|error| anyhow::anyhow!("Current directory getting error: {error}"))?;

    let run_time_start = Instant::now();
    match arguments.command {
        Command::RunRandom(run) => {
            let paths = experiment_runner::Paths::new(root, run.results.clone());
            let mut context = experiment_runner::Context::new(paths, run.context_arguments());
            let mut command = experiment_runner::RunRandomCommand::new(
                setup,
                run.rng_seed,
                arguments.verbose,
                arguments.quiet,
            );

            let summary = command.run(&mut context)?;
            print!("{summary}");
            let results = context.paths.summary();
            summary.write_json(results.as_path())?;
            if !arguments.quiet {
                println!(
                    "    {} {} runs in {}m{:02}s, results in {results:?}",
                    "Finished".bright_green().bold(),
                    summary.elements().len(),
                    run_time_start.elapsed().as_secs() / 60,
                    run_time_start.elapsed().as_secs() % 60,
                );
            }
            summary.ensure_successful()
        }
        Command::Build(build) => {
            let paths = experiment_runner::Paths::new(root, None);
            let context = experiment_runner::Context::new(paths, build.context_arguments());
            experiment_runner::BuildCommand::new(setup, arguments.quiet).build(&context)?;
            if !arguments.quiet {
                println!(
                    "    {} building in {}m{:02}s",
                    "Finished".bright_green().bold(),
                    run_time_start.elapsed().as_secs() / 60,
                    run_time_start.elapsed().as_secs() % 60,
                );
            }
            Ok(())
        }
    }
}
