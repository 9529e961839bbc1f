use flexi_logger::{
    style, Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger,
    LoggerHandle, Naming, WriteMode,
};
use log::{debug, Level, Record};
use std::path::Path;

/**
 * Starts the logger. Records go to stderr, so that stdout only carries the
 * verdict; when a directory is given, they go to (daily rotated) files there
 * instead, and are duplicated to stderr ('verbose' duplicates every record,
 * otherwise only warnings and errors).
 *
 * The returned handle has to be kept alive, until the program exits.
 */
pub fn configure(
    level: &str,
    verbose: bool,
    directory: Option<&Path>,
) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    let logger = Logger::try_with_str(level)?.format(colour_format);
    let handle = match directory {
        Some(dir) => {
            let days = 1;
            let dup = if verbose {
                Duplicate::All
            } else {
                Duplicate::Warn
            };
            let handle = logger
                .log_to_file(FileSpec::default().directory(dir))
                .duplicate_to_stderr(dup)
                .write_mode(WriteMode::BufferAndFlush)
                .rotate(
                    Criterion::Age(Age::Day),
                    Naming::Timestamps,
                    Cleanup::KeepLogFiles(days),
                )
                .start()?;
            debug!("Logging to directory: {}", dir.display());
            handle
        }
        None => logger.log_to_stderr().start()?,
    };
    Ok(handle)
}

fn colour_format(
    out: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    rec: &Record,
) -> Result<(), std::io::Error> {
    let level = rec.level();
    write!(
        out,
        "[{}] {} {}:{}: {}",
        style(Level::Debug)
            .paint(now.format("%Y-%m-%d %H:%M:%S%.3f %:z").to_string()),
        style(level).paint(rec.level().to_string()),
        rec.file().unwrap_or("<unknown>"),
        rec.line().unwrap_or(0),
        style(level).paint(&rec.args().to_string())
    )
}
