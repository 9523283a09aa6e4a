//! Shared plumbing for the demos: flag parsing, logging, and connecting.
//!
//! Connection flags (`--endpoint`, `--username`/`-u`, `--password`/`-p`,
//! `--group`, `--volume-path`, `--insecure`/`-k`) override the matching
//! `ISILON_*` environment variables, so a demo can run with no flags at all.

use std::env;
use std::process;

use isilon::{Client, ClientConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Print `usage` to stderr and exit with status 1.
pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

/// Log to stderr; `RUST_LOG` overrides the default `isilon=debug`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("isilon=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

/// Flags are consumed as they are taken; whatever is left are the
/// subcommand and its positional arguments.
pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    /// Collect the process arguments, answering `--help`/`-h` right away.
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        if args.iter().any(|a| matches!(a.as_str(), "--help" | "-h")) {
            println!("{usage}");
            process::exit(0);
        }
        Self { args, usage }
    }

    /// Remove `NAME VALUE` for the first matching name and return the value.
    /// A trailing name with no value is a usage error.
    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let at = self.position(names)?;
        if at + 1 >= self.args.len() {
            usage_and_exit(self.usage);
        }
        let mut taken = self.args.drain(at..=at + 1);
        taken.next();
        taken.next()
    }

    /// Remove a boolean flag, reporting whether it was present.
    pub fn take_flag(&mut self, names: &[&str]) -> bool {
        self.position(names)
            .map(|at| self.args.remove(at))
            .is_some()
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }

    fn position(&self, names: &[&str]) -> Option<usize> {
        self.args.iter().position(|a| names.contains(&a.as_str()))
    }
}

/// Connection settings: `ISILON_*` environment variables, overridden by flags.
pub fn config_from_parser(parser: &mut ArgParser, usage: &'static str) -> ClientConfig {
    let mut config = ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        usage_and_exit(usage)
    });

    if let Some(endpoint) = parser.take_value(&["--endpoint"]) {
        config.endpoint = endpoint;
    }
    if let Some(username) = parser.take_value(&["--username", "-u"]) {
        config.username = username;
    }
    if let Some(password) = parser.take_value(&["--password", "-p"]) {
        config.password = password;
    }
    if let Some(group) = parser.take_value(&["--group"]) {
        config = config.with_group(group);
    }
    if let Some(path) = parser.take_value(&["--volume-path"]) {
        config = config.with_volumes_path(path);
    }
    if parser.take_flag(&["--insecure", "-k"]) {
        config = config.with_insecure(true);
    }

    if config.validate().is_err() {
        usage_and_exit(usage);
    }
    config
}

pub async fn connect(config: ClientConfig) -> Client {
    match Client::connect(config).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            process::exit(1);
        }
    }
}
