use std::{
    fmt::Display,
    process::ExitCode,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use log::LevelFilter;
use spotify_history_services::{
    http::HttpTransport,
    run_render,
    run_update,
};

mod args;
use args::{
    Args,
    Command,
};


fn print_err<E: Display>(e: E) {
    eprintln!("{e:#}");
}

fn init_logger(verbose: bool) {
    let default = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Update(update) => {
            let config = update.into_config().context("Invalid configuration")?;
            let transport = HttpTransport::new()?;
            let report = run_update(&config, transport)
                .with_context(|| format!("Updating {}", config.history_path.display()))?;
            println!("{report}");
        },
        Command::Render(render) => {
            let config = render.into_config();
            run_render(&config).with_context(|| format!("Rendering {}", config.input.display()))?;
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            print_err(e);
            return ExitCode::FAILURE;
        },
    };

    init_logger(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_err(e);
            ExitCode::FAILURE
        },
    }
}
