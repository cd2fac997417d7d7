use crate::error::Error;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use time::macros::format_description;

pub fn setup(debug: bool) -> Result<(), Error> {
    let log_level = if debug || cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    SimpleLogger::new()
        .with_timestamp_format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .with_level(log_level)
        .init()?;

    Ok(())
}
