use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use spotifriend_config::schema::WidgetFamily;

/// Spotifriend: see what your friends are listening to.
#[derive(Parser, Debug)]
#[command(name = "spotifriend", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Keep the friend list in sync until interrupted (default).
    Run,
    /// Store a session cookie captured from a browser login.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Fetch once and print the friend list.
    Fetch,
    /// Print widget timeline entries as JSON.
    Widget {
        #[arg(long, value_enum)]
        family: Option<FamilyArg>,
        /// Print one entry and exit.
        #[arg(long)]
        once: bool,
    },
    /// Handle an `app-widget://play?id=...` link.
    Open { link: String },
    /// Print the effective configuration as JSON.
    Config,
}

#[derive(ClapArgs)]
#[group(required = true, multiple = false)]
pub struct LoginArgs {
    /// The `sp_dc` cookie value.
    #[arg(long)]
    pub cookie: Option<String>,

    /// A Netscape `cookies.txt` exported after logging in.
    #[arg(long)]
    pub cookie_jar: Option<PathBuf>,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("cookie_jar", &self.cookie_jar)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FamilyArg {
    Medium,
    Large,
}

impl From<FamilyArg> for WidgetFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Medium => WidgetFamily::Medium,
            FamilyArg::Large => WidgetFamily::Large,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

/// Expand a bare level into a directive for this app's crates.
pub fn level_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("spotifriend={level}")
    }
}
