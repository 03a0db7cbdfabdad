//! Default logging setup for keyset tools
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

use std::sync::Mutex;

/// Environment variable holding the log filter, using the `env_logger` syntax.
pub const LOG_ENV: &str = "KEYSET_LOG";

/// Environment variable selecting whether log output is styled.
pub const LOG_STYLE_ENV: &str = "KEYSET_LOG_STYLE";

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

/// Perform the default logging setup, logging at `info` level unless [`LOG_ENV`] is set.
pub fn setup() {
    setup_with_default("info")
}

/// Perform the default logging setup with the given filter used when [`LOG_ENV`] is not set.
///
/// Each record is prefixed by the time elapsed since the setup. Whenever the target of a record
/// differs from the one of the previous record, a line naming the new target is written first.
pub fn setup_with_default(default_filter: &str) {
    let start_time = std::time::Instant::now();

    let last_target = Mutex::new(String::new());

    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or(LOG_ENV, default_filter)
            .write_style(LOG_STYLE_ENV),
    )
    .format(move |buf, record| {
        use std::io::Write;

        let timestamp = start_time.elapsed();
        let level = record.level();
        let target = record.target();

        let mut last_target = last_target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if target != *last_target {
            last_target.clear();
            last_target.push_str(target);

            writeln!(
                buf,
                "{} {}",
                format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                format_args!("{style}{target}{style:#}", style = TARGET_STYLE)
            )?;
        }
        writeln!(
            buf,
            "{} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            format_args!(
                "{style}{level:5}{style:#}",
                style = buf.default_level_style(level),
            ),
            record.args(),
        )
    })
    .init();
}
