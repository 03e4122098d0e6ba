use clap::Parser;
use tracing::{debug, error};

use pacstall_cli::args::{version_banner, Cli};
use pacstall_cli::commands::{self, CommandContext};
use pacstall_cli::logging;
use pacstall_cli::message::{fancy, MessageKind};
use pacstall_cli::privileges::running_as_root;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_banner());
        return;
    }

    let is_root = running_as_root();
    logging::init(cli.debug, is_root);

    let Some(command) = cli.command else {
        // clap shows the help when no arguments are given, so only global
        // flags can get us here.
        error!("No command given. Run pacstall --help for usage");
        std::process::exit(pacstall_config::ErrorCode::Usage.as_i32());
    };

    let ctx = CommandContext {
        config_path: cli.config,
        is_root,
        ..CommandContext::default()
    };

    if let Err(e) = commands::execute(command, &ctx).await {
        if !e.is_reported() {
            fancy(MessageKind::Error, &e.to_string());
        }
        let code = e.exit_code();
        debug!(message = "Command failed", error = %e, code = code);
        std::process::exit(code);
    }
}
