//! Init command implementation

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::info;
use tsumugi_core::PipelineConfig;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(PipelineConfig::CONFIG_FILES[0]);

    let mut file = match create_new(&config_path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists && force => {
            match std::fs::remove_file(&config_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_diagnostic(),
            }
            create_new(&config_path).into_diagnostic()?
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(miette::miette!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            ));
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    file.write_all(PipelineConfig::DEFAULT_CONFIG.as_bytes())
        .into_diagnostic()?;
    info!("Created {}", config_path.display());
    Ok(())
}

/// Creates `path`, failing if it exists. Symlinks are not followed.
fn create_new(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}
