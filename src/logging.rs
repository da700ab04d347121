use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};

/// Routes `log` output to `path` so it never lands on the TUI screen.
/// `RUST_LOG` overrides the default `info` filter. Logging stays off when
/// the file cannot be opened.
pub fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let initialized = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(true)
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    if initialized.is_ok() {
        log::info!("logging to {}", path.display());
    }
}
