//! CLI command handling module
//!
//! The resource verbs are built at runtime from `RESOURCE_REGISTRY` by
//! [`build_command_tree`]; `config` reuses a derived subcommand enum. Parsed
//! matches are turned into a [`Cli`] before anything talks to the cluster.

mod config;
mod logging;
mod resources;
mod version;

pub use config::{handle_config_command, ConfigSubcommand};
pub use logging::init_logging;
pub use resources::{execute, Settings};
pub use version::display_version;

use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, FromArgMatches, Subcommand};

use crate::commands::{StatusSelector, SuspendAction};
use crate::config::{Config, MAX_TIMEOUT_SECONDS};
use crate::error::FluxError;
use crate::resources::{find_descriptor, get_all_commands, ResourceDescriptor, RESOURCE_REGISTRY};

/// Build the full command tree, one `get`/`suspend`/`resume` subcommand per
/// registered kind in registry order
pub fn build_command_tree() -> Command {
    let kinds = kinds_help();
    let mut get = Command::new("get")
        .about("Display the status of Flux resources")
        .after_help(kinds.clone())
        .subcommand_required(true)
        .arg_required_else_help(true);
    let mut suspend = verb_command(SuspendAction::Suspend).after_help(kinds.clone());
    let mut resume = verb_command(SuspendAction::Resume).after_help(kinds);

    for descriptor in RESOURCE_REGISTRY {
        get = get.subcommand(get_subcommand(descriptor));
        suspend = suspend.subcommand(target_subcommand(descriptor, SuspendAction::Suspend));
        resume = resume.subcommand(target_subcommand(descriptor, SuspendAction::Resume));
    }

    let config = ConfigSubcommand::augment_subcommands(
        Command::new("config")
            .about("Manage fluxctl configuration")
            .subcommand_required(true)
            .arg_required_else_help(true),
    );

    Command::new("fluxctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command-line control surface for Flux GitOps resources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("namespace")
                .short('n')
                .long("namespace")
                .value_name("NAMESPACE")
                .help("Namespace scope (defaults to the configured namespace)")
                .global(true),
        )
        .arg(
            Arg::new("all-namespaces")
                .short('A')
                .long("all-namespaces")
                .action(ArgAction::SetTrue)
                .help("Act across all namespaces")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("DURATION")
                .value_parser(parse_timeout)
                .help("Deadline for the whole invocation, e.g. 30s, 5m, 1h")
                .global(true),
        )
        .arg(
            Arg::new("context")
                .long("context")
                .value_name("CONTEXT")
                .help("Kubeconfig context to use")
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on stderr")
                .global(true),
        )
        .subcommand(get)
        .subcommand(suspend)
        .subcommand(resume)
        .subcommand(config)
        .subcommand(Command::new("version").about("Show version information"))
}

/// Help footer listing every kind with the names it answers to
fn kinds_help() -> String {
    let commands = get_all_commands();
    let width = commands.iter().map(|(kind, _)| kind.len()).max().unwrap_or(0);
    let mut help = String::from("Resource kinds:");
    for (kind, names) in commands {
        help.push_str(&format!("\n  {:<width$}  {}", kind, names.join(", ")));
    }
    help
}

fn verb_command(action: SuspendAction) -> Command {
    let about = match action {
        SuspendAction::Suspend => "Suspend reconciliation of Flux resources",
        SuspendAction::Resume => "Resume reconciliation of Flux resources",
    };
    Command::new(action.verb())
        .about(about)
        .subcommand_required(true)
        .arg_required_else_help(true)
}

fn get_subcommand(descriptor: &'static ResourceDescriptor) -> Command {
    Command::new(descriptor.plural)
        .visible_aliases(
            std::iter::once(descriptor.command).chain(descriptor.aliases.iter().copied()),
        )
        .about(format!("Get {} status", descriptor.kind))
        .arg(
            Arg::new("no-header")
                .long("no-header")
                .action(ArgAction::SetTrue)
                .help("Skip the header row"),
        )
        .arg(
            Arg::new("status-selector")
                .long("status-selector")
                .value_name("ready=<true|false|unknown>")
                .value_parser(parse_status_selector)
                .help("Only show resources whose Ready status matches"),
        )
}

fn target_subcommand(descriptor: &'static ResourceDescriptor, action: SuspendAction) -> Command {
    Command::new(descriptor.command)
        .visible_aliases(descriptor.aliases.iter().copied())
        .about(format!("{} a {}", capitalize(action.verb()), descriptor.kind))
        .arg(
            Arg::new("name")
                .value_name("NAME")
                .help("Resource name")
                .required_unless_present("all"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .conflicts_with("name")
                .help("Act on every resource of this kind in the scope"),
        )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_status_selector(s: &str) -> Result<StatusSelector, String> {
    s.parse()
}

/// Parse a duration such as `90`, `30s`, `5m`, `1h` or `500ms`. A bare number
/// is seconds.
pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let value: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration '{}'", s))?;

    let scaled = match unit {
        "" | "s" => Some(Duration::from_secs(value)),
        "ms" => Some(Duration::from_millis(value)),
        "m" => value.checked_mul(60).map(Duration::from_secs),
        "h" => value.checked_mul(3600).map(Duration::from_secs),
        other => return Err(format!("unknown duration unit '{}' in '{}'", other, s)),
    };

    let limit = Duration::from_secs(MAX_TIMEOUT_SECONDS);
    match scaled {
        Some(duration) if duration.is_zero() => {
            Err("timeout must be greater than zero".to_string())
        }
        Some(duration) if duration <= limit => Ok(duration),
        _ => Err(format!("timeout '{}' exceeds the maximum of {:?}", s, limit)),
    }
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub namespace: Option<String>,
    pub all_namespaces: bool,
    pub timeout: Option<Duration>,
    pub context: Option<String>,
    pub debug: bool,
}

impl GlobalOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            namespace: matches.get_one::<String>("namespace").cloned(),
            all_namespaces: matches.get_flag("all-namespaces"),
            timeout: matches.get_one::<Duration>("timeout").copied(),
            context: matches.get_one::<String>("context").cloned(),
            debug: matches.get_flag("debug"),
        }
    }

    /// Kube context: flag, then config/env
    pub fn context<'a>(&'a self, config: &'a Config) -> Option<&'a str> {
        self.context.as_deref().or(config.context.as_deref())
    }
}

/// What a `suspend`/`resume` acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Named(String),
    All,
}

/// A verb that talks to the cluster
#[derive(Debug, Clone)]
pub enum ResourceInvocation {
    Get {
        descriptor: &'static ResourceDescriptor,
        no_header: bool,
        selector: Option<StatusSelector>,
    },
    Suspend {
        descriptor: &'static ResourceDescriptor,
        action: SuspendAction,
        target: Target,
    },
}

/// Parsed invocation
#[derive(Debug, Clone)]
pub enum Invocation {
    Resource(ResourceInvocation),
    Config(ConfigSubcommand),
    Version,
}

/// A fully parsed command line
#[derive(Debug, Clone)]
pub struct Cli {
    pub globals: GlobalOptions,
    pub invocation: Invocation,
}

impl Cli {
    /// Parse `std::env::args`, exiting with usage on error
    pub fn parse() -> anyhow::Result<Self> {
        let matches = build_command_tree().get_matches();
        Self::from_matches(&matches)
    }

    /// Parse an explicit argument list
    pub fn try_parse_from<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = build_command_tree().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        // Global values are propagated down, so read them at the leaf
        let mut leaf = matches;
        while let Some((_, sub)) = leaf.subcommand() {
            leaf = sub;
        }
        let globals = GlobalOptions::from_matches(leaf);

        let invocation = match matches.subcommand() {
            Some(("get", sub)) => {
                let (name, args) = kind_subcommand(sub)?;
                Invocation::Resource(ResourceInvocation::Get {
                    descriptor: resolve(name)?,
                    no_header: args.get_flag("no-header"),
                    selector: args.get_one::<StatusSelector>("status-selector").copied(),
                })
            }
            Some((verb @ ("suspend" | "resume"), sub)) => {
                let (name, args) = kind_subcommand(sub)?;
                let action = if verb == "suspend" {
                    SuspendAction::Suspend
                } else {
                    SuspendAction::Resume
                };
                let target = match args.get_one::<String>("name") {
                    Some(name) if !args.get_flag("all") => Target::Named(name.clone()),
                    _ => Target::All,
                };
                Invocation::Resource(ResourceInvocation::Suspend {
                    descriptor: resolve(name)?,
                    action,
                    target,
                })
            }
            Some(("config", sub)) => Invocation::Config(ConfigSubcommand::from_arg_matches(sub)?),
            Some(("version", _)) => Invocation::Version,
            Some((other, _)) => anyhow::bail!("unknown command '{}'", other),
            None => anyhow::bail!("no command given"),
        };

        Ok(Self {
            globals,
            invocation,
        })
    }
}

fn kind_subcommand(matches: &ArgMatches) -> anyhow::Result<(&str, &ArgMatches)> {
    matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("no resource kind given"))
}

fn resolve(name: &str) -> Result<&'static ResourceDescriptor, FluxError> {
    find_descriptor(name).ok_or_else(|| FluxError::UnknownKind(name.to_string()))
}
