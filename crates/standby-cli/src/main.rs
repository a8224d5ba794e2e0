use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use standby_cli::{
    expand, init_logging, load_layout, resolve_replication_factor, validate, LogFormat,
};
use standby_generator::emit_all;
use std::path::PathBuf;

fn cli() -> Command {
    let layout_arg = Arg::new("layout")
        .long("layout")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Active container layout (.json, .yaml or .yml)");

    Command::new("standby")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expand container layouts with warm-standby buddy containers")
        .subcommand_required(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(
            Command::new("expand")
                .about("Print the layout expanded with buddy containers")
                .arg(layout_arg.clone())
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Standby config (.toml, .yaml or .yml)"),
                )
                .arg(
                    Arg::new("replication-factor")
                        .long("replication-factor")
                        .short('r')
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32))
                        .help("Total copies of each task; overrides the config file"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check that a layout is a purely active assignment")
                .arg(layout_arg),
        )
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let format = if matches.get_flag("json-logs") {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(format)?;

    match matches.subcommand() {
        Some(("expand", args)) => {
            let layout_path = args
                .get_one::<PathBuf>("layout")
                .context("missing --layout")?;
            let config_path = args.get_one::<PathBuf>("config");
            let flag = args.get_one::<i32>("replication-factor").copied();

            let layout = load_layout(layout_path)?;
            let factor = resolve_replication_factor(config_path.map(PathBuf::as_path), flag)?;
            let report = expand(&layout, factor)?;

            emit_all(&report.events);
            for (active, buddies) in &report.buddies {
                tracing::info!(active = %active, ?buddies, "Buddy containers");
            }
            println!("{}", serde_json::to_string_pretty(&report.layout)?);
        }
        Some(("validate", args)) => {
            let layout_path = args
                .get_one::<PathBuf>("layout")
                .context("missing --layout")?;

            let layout = load_layout(layout_path)?;
            validate(&layout)?;
            println!(
                "OK: {} containers, {} tasks",
                layout.len(),
                layout.task_count()
            );
        }
        _ => {}
    }

    Ok(())
}
