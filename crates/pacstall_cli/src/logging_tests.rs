use super::*;
use chrono::Duration as ChronoDuration;
use serial_test::serial;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn plain(&self) -> String {
        let raw = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        let mut out = String::new();
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_fancy_formatter_uses_message_tags() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .event_format(FancyFormatter)
        .with_writer(captured.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("Downloading neofetch");
        tracing::warn!("Pacstall is already running another instance (42)");
        tracing::error!("Config attribute 'main.url' is required");
        tracing::debug!("Probing packagelist");
    });

    let lines: Vec<String> = captured.plain().lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "[+] INFO: Downloading neofetch",
            "[*] WARNING: Pacstall is already running another instance (42)",
            "[!] ERROR: Config attribute 'main.url' is required",
            "[#] DEBUG: Probing packagelist",
        ]
    );
}

#[test]
fn test_fancy_formatter_appends_fields() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .event_format(FancyFormatter)
        .with_writer(captured.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(repository = "main", "Repository validated");
    });

    let output = captured.plain();
    assert!(output.starts_with("[+] INFO: Repository validated"));
    assert!(output.contains("repository"));
    assert!(output.contains("main"));
}

#[test]
#[serial]
fn test_console_filter_defaults() {
    std::env::remove_var(LOG_ENV);
    assert_eq!(console_filter(false).to_string(), "info");
    assert_eq!(console_filter(true).to_string(), "debug");
}

#[test]
#[serial]
fn test_console_filter_reads_environment() {
    std::env::set_var(LOG_ENV, "warn");
    let filter = console_filter(true);
    std::env::remove_var(LOG_ENV);

    assert_eq!(filter.to_string(), "warn");
}

#[test]
fn test_prepare_log_file_creates_day_directory() {
    let root = TempDir::new().unwrap();
    let now = Local::now();

    let path = prepare_log_file(root.path(), now, LOG_LIFETIME).unwrap();

    let day = now.format("%Y-%m-%d").to_string();
    assert_eq!(path.parent().unwrap(), root.path().join(&day));
    assert!(path.parent().unwrap().is_dir());
    assert_eq!(path.extension().unwrap(), "log");
    assert!(!path.exists());
}

#[test]
fn test_prepare_log_file_purges_expired_day_directories() {
    let root = TempDir::new().unwrap();
    let old_day = root.path().join("2020-01-01");
    fs::create_dir(&old_day).unwrap();
    fs::write(old_day.join("10-00-00.000000.log"), "old").unwrap();

    let later = Local::now() + ChronoDuration::days(8);
    prepare_log_file(root.path(), later, LOG_LIFETIME).unwrap();

    assert!(!old_day.exists());
}

#[test]
fn test_prepare_log_file_keeps_recent_day_directories() {
    let root = TempDir::new().unwrap();
    let recent = root.path().join("2020-01-01");
    fs::create_dir(&recent).unwrap();

    prepare_log_file(root.path(), Local::now(), LOG_LIFETIME).unwrap();

    assert!(recent.exists());
}

#[test]
fn test_prepare_log_file_keeps_metadata_directory() {
    let root = TempDir::new().unwrap();
    let metadata = root.path().join("metadata");
    fs::create_dir(&metadata).unwrap();
    fs::write(metadata.join("neofetch"), "_version=\"7.1.0\"\n").unwrap();

    let later = Local::now() + ChronoDuration::days(30);
    prepare_log_file(root.path(), later, LOG_LIFETIME).unwrap();

    assert!(metadata.join("neofetch").exists());
}
