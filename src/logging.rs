use std::{fs::File, io, path::Path};

use env_logger::{Env, Target, WriteStyle};

pub const LOG_FILE: &str = "vk.log";

/// Routes `log` records into `path`, truncating it first.
///
/// The level defaults to `info` and follows `RUST_LOG` when set.
pub fn init<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let file = File::create(path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_secs()
        .try_init()
        .map_err(io::Error::other)
}
