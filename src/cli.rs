// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::{ConfigOverrides, DEFAULT_CONFIG_FILE};
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn build_cli() -> Command {
    Command::new("newman-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about").to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang").to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cli.run_about").to_string())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("cli.arg_config", default = DEFAULT_CONFIG_FILE).to_string())
                        .value_name("CONFIG")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("collection")
                        .long("collection")
                        .help(t!("cli.arg_collection").to_string())
                        .value_name("GLOB")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("environment")
                        .long("environment")
                        .help(t!("cli.arg_environment").to_string())
                        .value_name("FILE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("globals")
                        .long("globals")
                        .help(t!("cli.arg_globals").to_string())
                        .value_name("FILE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("install-command")
                        .long("install-command")
                        .help(t!("cli.arg_install_command").to_string())
                        .value_name("COMMAND")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("run-command")
                        .long("run-command")
                        .help(t!("cli.arg_run_command").to_string())
                        .value_name("TEMPLATE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("fail-on-error")
                        .long("fail-on-error")
                        .help(t!("cli.arg_fail_on_error").to_string())
                        .value_name("BOOL")
                        .value_parser(clap::value_parser!(bool))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("newman-executable")
                        .long("newman-executable")
                        .help(t!("cli.arg_newman_executable").to_string())
                        .value_name("PATH")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .help(t!("cli.arg_verbose").to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.init_about").to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.arg_output").to_string())
                        .value_name("FILE")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.arg_force").to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn overrides_from(matches: &ArgMatches) -> ConfigOverrides {
    let string = |name: &str| matches.get_one::<String>(name).cloned();
    ConfigOverrides {
        collection: string("collection"),
        environment: string("environment"),
        globals: string("globals"),
        install_command: string("install-command"),
        run_command: string("run-command"),
        fail_on_error: matches.get_one::<bool>("fail-on-error").copied(),
        newman_executable: string("newman-executable"),
        verbose: matches.get_flag("verbose"),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first, so the help text is localized.
    let language = pre_parse_language();
    match &language {
        Some(lang) => rust_i18n::set_locale(lang),
        None => crate::init(),
    }

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let config = run_matches.get_one::<PathBuf>("config").cloned();
            commands::run::execute(config, overrides_from(run_matches), language).await?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            let force = init_matches.get_flag("force");
            commands::init::execute(output, force)?;
        }
        _ => {
            build_cli().print_help()?;
        }
    }
    Ok(())
}
