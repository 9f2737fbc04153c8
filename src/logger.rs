use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env};

/// Route the log records of a run into `<log_dir>/default.log`.
pub fn init_logger(log_dir: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    // Create the log dir.
    std::fs::create_dir_all(log_dir.as_ref())?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.as_ref().join("default.log"))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<5}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init()?;

    Ok(())
}
