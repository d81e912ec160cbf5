//! Terminal log formatting.
//!
//! Info and debug lines print as bare messages, so they double as the
//! program's normal output. Warnings and errors get a colored
//! `[timestamp] LEVEL: ` prefix.

use std::fmt::{self, Write as _};
use std::io::IsTerminal;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const YELLOW: &str = "\x1b[33;20m";
const RED: &str = "\x1b[31;20m";

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// level.
pub fn init() {
    let color = std::io::stdout().is_terminal();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .event_format(PlainFormat { color })
        .init();
}

/// Wrap `text` in bold when stdout is a terminal.
pub fn bold(text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}{}{}", BOLD, text, RESET)
    } else {
        text.to_string()
    }
}

/// The `[timestamp] LEVEL: ` prefix for `level`, or `None` for levels that
/// print bare.
fn prefix(level: Level, timestamp: &str, color: bool) -> Option<String> {
    let code = match level {
        Level::WARN => YELLOW,
        Level::ERROR => RED,
        _ => return None,
    };
    let label = if level == Level::WARN { "WARNING" } else { "ERROR" };
    Some(if color {
        format!("{}[{}] {}: ", code, timestamp, label)
    } else {
        format!("[{}] {}: ", timestamp, label)
    })
}

struct PlainFormat {
    color: bool,
}

impl<S, N> FormatEvent<S, N> for PlainFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = *event.metadata().level();
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string();
        let prefix = prefix(level, &timestamp, self.color);

        if let Some(prefix) = &prefix {
            write!(writer, "{}", prefix)?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        if prefix.is_some() && self.color {
            write!(writer, "{}", RESET)?;
        }
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_and_debug_print_bare() {
        assert_eq!(prefix(Level::INFO, "t", true), None);
        assert_eq!(prefix(Level::DEBUG, "t", true), None);
        assert_eq!(prefix(Level::TRACE, "t", false), None);
    }

    #[test]
    fn test_warning_prefix() {
        assert_eq!(
            prefix(Level::WARN, "2024-01-01 00:00:00,000", false).unwrap(),
            "[2024-01-01 00:00:00,000] WARNING: "
        );
        let colored = prefix(Level::WARN, "t", true).unwrap();
        assert!(colored.starts_with(YELLOW));
    }

    #[test]
    fn test_error_prefix() {
        let colored = prefix(Level::ERROR, "t", true).unwrap();
        assert!(colored.starts_with(RED));
        assert!(colored.ends_with("[t] ERROR: "));
    }
}
