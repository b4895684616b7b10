// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::CatalogRuntime;
use shelf_app::{AppState, FilterState, render_table_html};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `shelf --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_path()?;
    logging::init(config.log_level(), &log_path).with_context(|| {
        format!(
            "start logging to {} -- set [log].path to a writable file",
            log_path.display()
        )
    })?;

    let filter = options.initial_filter(config.initial_filter());
    let mut runtime = CatalogRuntime::builtin();
    if options.check_only {
        tracing::info!("startup check passed");
        return Ok(());
    }

    if options.print_html {
        print!("{}", render_html(&runtime, &filter));
        return Ok(());
    }

    let mut state = AppState::with_filter(filter);
    tracing::info!("starting table view");
    let result = shelf_tui::run_app(&mut state, &mut runtime);
    tracing::info!(
        filter_changes = runtime.filter_changes(),
        "table view closed"
    );
    result
}

fn render_html(runtime: &CatalogRuntime, filter: &FilterState) -> String {
    let rows = filter.apply(runtime.products());
    tracing::info!(
        filter_text = %filter.filter_text,
        in_stock_only = filter.in_stock_only,
        rows = rows.len(),
        "rendering html table"
    );
    render_table_html(&rows)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    print_html: bool,
    check_only: bool,
    show_help: bool,
    filter_text: Option<String>,
    in_stock_only: bool,
}

impl CliOptions {
    /// Flags layer over the configured filter; they never switch a configured
    /// in-stock filter back off.
    fn initial_filter(&self, configured: FilterState) -> FilterState {
        FilterState::new(
            self.filter_text
                .clone()
                .unwrap_or(configured.filter_text),
            self.in_stock_only || configured.in_stock_only,
        )
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        print_html: false,
        check_only: false,
        show_help: false,
        filter_text: None,
        in_stock_only: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--filter" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--filter requires search text"))?;
                options.filter_text = Some(value.as_ref().to_owned());
            }
            "--in-stock-only" => {
                options.in_stock_only = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--html" => {
                options.print_html = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("shelf");
    println!("  --config <path>          Use a specific config path");
    println!("  --filter <text>          Start with a name filter");
    println!("  --in-stock-only          Start with only in-stock products shown");
    println!("  --html                   Print the filtered table as HTML and exit");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + logging and exit");
    println!("  --help                   Show this help");
}
