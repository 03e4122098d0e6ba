use super::*;

#[test]
fn test_config_error_keeps_its_code() {
    let error = Error::from(ConfigError::NoHost {
        name: "main".to_string(),
        url: "https://example.com/main/packagelist".to_string(),
    });
    assert_eq!(error.exit_code(), 68);
    assert_eq!(
        error.to_string(),
        "Repository 'main' has no packagelist at 'https://example.com/main/packagelist'"
    );
}

#[test]
fn test_not_root_error_display() {
    let error = Error::NotRoot {
        command: "install".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Pacstall needs root privileges to run the install command"
    );
    assert_eq!(error.exit_code(), 64);
}

#[test]
fn test_editor_error_surfaces_editor_exit_code() {
    let error = Error::Editor {
        editor: "vim".to_string(),
        code: 3,
    };
    assert_eq!(error.exit_code(), 3);
    assert_eq!(error.to_string(), "Editor 'vim' closed with a non-zero exit code");
}

#[test]
fn test_exit_codes() {
    assert_eq!(Error::Usage("bad".to_string()).exit_code(), 64);
    assert_eq!(Error::Unavailable("down".to_string()).exit_code(), 69);
    assert_eq!(
        Error::WriteFailed {
            path: "a".to_string(),
            reason: "b".to_string()
        }
        .exit_code(),
        74
    );
    assert_eq!(Error::StdOutFlushFailed.exit_code(), 74);
    assert_eq!(
        Error::LockTimeout {
            path: "/var/lock/pacstall.lock".to_string()
        }
        .exit_code(),
        75
    );
    assert_eq!(
        Error::Lock {
            path: "/var/lock/pacstall.lock".to_string(),
            reason: "denied".to_string()
        }
        .exit_code(),
        71
    );
    assert_eq!(
        Error::CantCreate {
            path: "config.toml".to_string(),
            reason: "exists".to_string()
        }
        .exit_code(),
        73
    );
    assert_eq!(Error::Software("boom".to_string()).exit_code(), 70);
    assert_eq!(Error::NotImplemented("install".to_string()).exit_code(), 69);
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

#[test]
fn test_only_config_and_root_errors_are_reported_at_source() {
    assert!(Error::from(ConfigError::Parse {
        reason: "expected `=`".to_string()
    })
    .is_reported());
    assert!(Error::NotRoot {
        command: "remove".to_string()
    }
    .is_reported());
    assert!(!Error::Usage("No packages specified".to_string()).is_reported());
    assert!(!Error::Unavailable("No internet connection detected".to_string()).is_reported());
}

#[test]
fn test_read_failed_maps_to_no_input() {
    let error = Error::ReadFailed {
        path: "/var/log/pacstall/metadata".to_string(),
        reason: "Permission denied".to_string(),
    };
    assert_eq!(error.exit_code(), 66);
}
