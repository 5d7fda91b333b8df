use std::path::PathBuf;

use clap::{ArgAction, ArgMatches, value_parser};

use fuel_reports::cli;
use fuel_reports::core::GenericResult;

use super::action::Action;

const DEFAULT_CONFIG_DIR_PATH: &str = "~/.fuel-reports";

pub struct Parser {
    matches: Option<ArgMatches>,
}

pub struct GlobalOptions {
    pub log_level: log::Level,
    pub config_dir: String,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {matches: None}
    }

    pub fn parse_global(&mut self) -> GenericResult<GlobalOptions> {
        let json = || cli::new_arg("json", "Print the result in JSON format")
            .short('j').long("json")
            .action(ArgAction::SetTrue);

        let app = cli::new_app("fuel-reports", "Extracts data from fuel supply reports")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .args([
                cli::new_arg("config", "Configuration directory path [default: ~/.fuel-reports]")
                    .short('c').long("config")
                    .value_name("PATH"),

                cli::new_arg("verbose", "Set verbosity level")
                    .short('v').long("verbose")
                    .action(ArgAction::Count)
                    .global(true),
            ])

            .subcommand(cli::new_subcommand(
                "parse", "Parse a report and print the extracted data")
                .args([
                    json(),
                    cli::new_arg("FILE", "Report file path")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                ]))

            .subcommand(cli::new_subcommand(
                "summary", "Aggregate the most recent reports per company")
                .long_about("\
                    Parses the specified reports and sums up the data of each company. Only the \
                    reports with the most recent report date are taken into account for every \
                    company.")
                .args([
                    json(),
                    cli::new_arg("FILES", "Report file paths")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1..)
                        .required(true),
                ]));

        let matches = app.get_matches();

        let log_level = match matches.get_count("verbose") {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            2 => log::Level::Trace,
            _ => return Err("Invalid verbosity level".into()),
        };

        let config_dir = matches.get_one::<String>("config").cloned().unwrap_or_else(||
            shellexpand::tilde(DEFAULT_CONFIG_DIR_PATH).to_string());

        self.matches = Some(matches);

        Ok(GlobalOptions {log_level, config_dir})
    }

    pub fn parse(mut self) -> GenericResult<Action> {
        let matches = self.matches.take().ok_or("Command line arguments haven't been parsed")?;

        let Some((command, matches)) = matches.subcommand() else {
            return Err("No command is specified".into());
        };
        let json = matches.get_flag("json");

        Ok(match command {
            "parse" => Action::Parse {
                path: get_paths(matches, "FILE").into_iter().next().ok_or("No report file is specified")?,
                json,
            },
            "summary" => Action::Summary {
                paths: get_paths(matches, "FILES"),
                json,
            },
            _ => return Err(format!("Unknown command: {}", command).into()),
        })
    }
}

fn get_paths(matches: &ArgMatches, name: &str) -> Vec<PathBuf> {
    matches.get_many::<PathBuf>(name).map(|paths| paths.cloned().collect()).unwrap_or_default()
}
