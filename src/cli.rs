use crate::store::ActiveView;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Flags accepted on the command line. Everything is optional; unset values
/// fall back to the config file or the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub empty: bool,
    pub view: Option<ActiveView>,
    pub strict_references: bool,
}

pub fn command() -> Command {
    Command::new("taskdeck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal manager for tasks, projects and users")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON config file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .help("Log level written to the log file"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Absolute directory for log files"),
        )
        .arg(
            Arg::new("empty")
                .long("empty")
                .action(ArgAction::SetTrue)
                .help("Start without the demo records"),
        )
        .arg(
            Arg::new("view")
                .long("view")
                .value_name("VIEW")
                .value_parser(["tasks", "projects", "users"])
                .help("View shown at startup"),
        )
        .arg(
            Arg::new("strict-references")
                .long("strict-references")
                .action(ArgAction::SetTrue)
                .help("Refuse to create records pointing at unknown projects or users"),
        )
}

pub fn parse() -> CliArgs {
    from_matches(&command().get_matches())
}

pub fn try_parse_from<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    command().try_get_matches_from(args).map(|m| from_matches(&m))
}

fn from_matches(matches: &ArgMatches) -> CliArgs {
    CliArgs {
        config: matches.get_one::<PathBuf>("config").cloned(),
        log_level: matches.get_one::<String>("log-level").cloned(),
        log_dir: matches.get_one::<PathBuf>("log-dir").cloned(),
        empty: matches.get_flag("empty"),
        view: matches
            .get_one::<String>("view")
            .and_then(|v| v.parse::<ActiveView>().ok()),
        strict_references: matches.get_flag("strict-references"),
    }
}
