use super::*;
use tempfile::TempDir;

fn upgrade_args(packages: &[&str], all: bool) -> UpgradeArgs {
    UpgradeArgs {
        packages: packages.iter().map(|p| p.to_string()).collect(),
        disable_prompts: true,
        keep: false,
        all,
    }
}

#[test]
fn test_validate_rejects_all_with_packages() {
    let error = validate(&upgrade_args(&["neofetch"], true)).unwrap_err();
    assert!(
        matches!(error, Error::Usage(ref m) if m == "Cannot use --all and specify packages at the same time")
    );
}

#[test]
fn test_validate_requires_packages_or_all() {
    let error = validate(&upgrade_args(&[], false)).unwrap_err();
    assert!(matches!(error, Error::Usage(ref m) if m == "No packages specified"));
    assert_eq!(error.exit_code(), 64);
}

#[test]
fn test_validate_accepts_either_form() {
    assert!(validate(&upgrade_args(&[], true)).is_ok());
    assert!(validate(&upgrade_args(&["neofetch", "htop"], false)).is_ok());
}

#[tokio::test]
async fn test_invalid_arguments_are_reported_before_root_check() {
    let dir = TempDir::new().unwrap();
    let ctx = CommandContext::in_dir(dir.path(), false);

    let error = execute(&upgrade_args(&[], false), &ctx).await.unwrap_err();

    assert!(matches!(error, Error::Usage(_)));
}

#[tokio::test]
async fn test_upgrade_requires_root() {
    let dir = TempDir::new().unwrap();
    let ctx = CommandContext::in_dir(dir.path(), false);

    let error = execute(&upgrade_args(&[], true), &ctx).await.unwrap_err();

    assert!(matches!(error, Error::NotRoot { ref command } if command == "upgrade"));
}

#[tokio::test]
async fn test_upgrade_reports_missing_backend() {
    let dir = TempDir::new().unwrap();
    let ctx = CommandContext::in_dir(dir.path(), true);

    let error = execute(&upgrade_args(&["neofetch"], false), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::NotImplemented(_)));
    assert_eq!(error.exit_code(), 69);
}
