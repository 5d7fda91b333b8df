mod action;
mod parser;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use rayon::prelude::*;
use serde::Serialize;

use fuel_reports::config::Config;
use fuel_reports::core::{EmptyResult, GenericResult};
use fuel_reports::report::{self, ParseOptions, ParsedReport};
use fuel_reports::summary;

use self::action::Action;
use self::parser::{Parser, GlobalOptions};

fn main() -> ExitCode {
    let mut parser = Parser::new();

    let global = match parser.parse_global() {
        Ok(global) => global,
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err}.");
            return ExitCode::FAILURE;
        },
    };

    if let Err(err) = easy_logging::init(module_path!(), global.log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(global, parser) {
        let message = err.to_string();

        if message.contains('\n') {
            error!("{err}");
        } else {
            error!("{err}.");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(global: GlobalOptions, parser: Parser) -> EmptyResult {
    let config = Config::new(&global.config_dir)?;
    let options = ParseOptions::new(&config);

    match parser.parse()? {
        Action::Parse {path, json} => {
            let report = read_report(&path, &options)?;

            if json {
                print_json(&report)?;
            } else {
                report.print();
            }
        },

        Action::Summary {paths, json} => {
            let reports = paths.par_iter()
                .map(|path| read_report(path, &options))
                .collect::<GenericResult<Vec<_>>>()?;

            let summaries = summary::aggregate(&reports);
            info!("{} companies in {} reports.", summaries.len(), reports.len());

            if json {
                print_json(&summaries)?;
            } else {
                summary::print(&summaries);
            }
        },
    }

    Ok(())
}

fn read_report(path: &Path, options: &ParseOptions) -> GenericResult<ParsedReport> {
    Ok(report::read_report(path, options).map_err(|e| format!(
        "Failed to parse {:?}: {}", path, e))?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> EmptyResult {
    let data = serde_json::to_string_pretty(value).map_err(|e| format!(
        "Failed to serialize the result: {}", e))?;
    Ok(writeln!(io::stdout(), "{}", data)?)
}
