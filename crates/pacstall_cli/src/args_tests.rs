use super::*;
use clap::error::ErrorKind;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("pacstall").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_arguments_shows_help() {
    let error = Cli::try_parse_from(["pacstall"]).unwrap_err();
    assert_eq!(
        error.kind(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_unknown_command_is_rejected() {
    let error = Cli::try_parse_from(["pacstall", "frobnicate"]).unwrap_err();
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_version_flag() {
    let cli = parse(&["--version"]);
    assert!(cli.version);
    assert!(cli.command.is_none());
    assert!(parse(&["-v"]).version);
}

#[test]
fn test_install_arguments() {
    let cli = parse(&["install", "-p", "-k", "--repo", "main", "neofetch", "htop"]);
    assert_eq!(
        cli.command,
        Some(Commands::Install(InstallArgs {
            packages: vec!["neofetch".to_string(), "htop".to_string()],
            disable_prompts: true,
            keep: true,
            repo: Some("main".to_string()),
            please: false,
        }))
    );
}

#[test]
fn test_install_requires_packages() {
    let error = Cli::try_parse_from(["pacstall", "install"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_install_please_flag() {
    let cli = parse(&["install", "makedeb", "--please"]);
    assert!(matches!(cli.command, Some(Commands::Install(InstallArgs { please: true, .. }))));
}

#[test]
fn test_remove_arguments() {
    let cli = parse(&["remove", "--disable-prompts", "neofetch"]);
    assert_eq!(
        cli.command,
        Some(Commands::Remove(RemoveArgs {
            packages: vec!["neofetch".to_string()],
            disable_prompts: true,
        }))
    );
}

#[test]
fn test_upgrade_without_packages_parses() {
    let cli = parse(&["upgrade", "--all"]);
    assert_eq!(
        cli.command,
        Some(Commands::Upgrade(UpgradeArgs {
            packages: vec![],
            disable_prompts: false,
            keep: false,
            all: true,
        }))
    );
}

#[test]
fn test_download_defaults_to_current_directory() {
    let cli = parse(&["download", "neofetch"]);
    match cli.command {
        Some(Commands::Download(args)) => {
            assert_eq!(args.pacscripts, vec!["neofetch".to_string()]);
            assert_eq!(args.output_dir, PathBuf::from("."));
            assert_eq!(args.repo, None);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_download_output_dir() {
    let cli = parse(&["download", "-o", "/tmp/scripts", "neofetch"]);
    assert!(matches!(
        cli.command,
        Some(Commands::Download(DownloadArgs { ref output_dir, .. })) if output_dir == &PathBuf::from("/tmp/scripts")
    ));
}

#[test]
fn test_list_and_repo_list() {
    assert_eq!(parse(&["list"]).command, Some(Commands::List));
    assert_eq!(
        parse(&["repo", "list"]).command,
        Some(Commands::Repo(RepoCommands::List))
    );
}

#[test]
fn test_config_subcommands() {
    assert_eq!(
        parse(&["config"]).command,
        Some(Commands::Config(ConfigArgs { command: None }))
    );
    assert_eq!(
        parse(&["config", "edit"]).command,
        Some(Commands::Config(ConfigArgs {
            command: Some(ConfigCommands::Edit)
        }))
    );
    assert_eq!(
        parse(&["config", "init", "--force"]).command,
        Some(Commands::Config(ConfigArgs {
            command: Some(ConfigCommands::Init { force: true })
        }))
    );
}

#[test]
fn test_global_flags_after_command() {
    let cli = parse(&["repo", "list", "--debug", "--config", "/tmp/config.toml"]);
    assert!(cli.debug);
    assert_eq!(cli.config, PathBuf::from("/tmp/config.toml"));
}

#[test]
fn test_version_banner() {
    let raw = version_banner();
    let mut chunks = raw.split('\u{1b}');
    let mut banner = chunks.next().unwrap_or_default().to_string();
    for chunk in chunks {
        banner.push_str(chunk.split_once('m').map_or("", |(_, rest)| rest));
    }
    assert_eq!(banner, "Pacstall 2.0.0 Kournikova");
}
