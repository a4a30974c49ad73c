use std::{io, path::PathBuf, process::exit};

use clap::Parser;
use sf_session::{
    config::{load_env_file, EnvConfig},
    fetch_session_token, report_session, resolve_environment, SfError,
};

mod prompt;

use prompt::TerminalPrompt;

/// Generates Salesforce access tokens for a given environment
#[derive(Parser)]
#[command(name = "salesforce", version, about, long_about = None)]
struct Cli {
    /// The environment to get an access token/session id for. Prompts when omitted.
    /// Allowed values: DevRC, DevTechRC, Prodlike, Production
    #[arg(short = 'e', long = "sfEnv", value_name = "ENV")]
    sf_env: Option<String>,

    /// Load configuration from this dotenv file instead of ./.env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let env = match resolve_environment(cli.sf_env.as_deref(), &TerminalPrompt) {
        Ok(env) => env,
        Err(e @ SfError::SelectionAborted(_)) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    if let Err(e) = load_env_file(cli.env_file.as_deref()) {
        println!("{}", e);
        return;
    }

    match fetch_session_token(env, &EnvConfig) {
        Ok(token) => {
            if let Err(e) = report_session(&mut io::stdout().lock(), &token) {
                eprintln!("Error: failed to write session id: {}", e);
                exit(1);
            }
        }
        Err(e) => println!("{}", e),
    }
}
