use std::env;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
}

impl Level {
    fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" | "err" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "info" | "debug" | "trace" => Self::Info,
            _ => Self::Error,
        }
    }
}

static OPENINGS_LOG: LazyLock<Level> = LazyLock::new(|| {
    env::var("OPENINGS_LOG")
        .map(|s| Level::from_str(&s))
        .unwrap_or(Level::Error)
});

macro_rules! log {
    ($level:expr, $prefix:expr, $msg:expr) => {
        if *OPENINGS_LOG >= $level {
            eprintln!(concat!("[openings] ", $prefix, ": {}"), $msg.as_ref());
        }
    };
}

pub fn error(msg: impl AsRef<str>) {
    log!(Level::Error, "ERROR", msg);
}

pub fn warn(msg: impl AsRef<str>) {
    log!(Level::Warn, "WARN", msg);
}

pub fn info(msg: impl AsRef<str>) {
    log!(Level::Info, "INFO", msg);
}

#[cfg(test)]
mod tests {
    use super::Level;

    #[test]
    fn test_level_parsing_accepts_aliases() {
        assert_eq!(Level::from_str("warning"), Level::Warn);
        assert_eq!(Level::from_str(" INFO "), Level::Info);
        assert_eq!(Level::from_str("debug"), Level::Info);
        assert_eq!(Level::from_str("err"), Level::Error);
    }

    #[test]
    fn test_level_parsing_defaults_to_error() {
        assert_eq!(Level::from_str("verbose"), Level::Error);
        assert_eq!(Level::from_str(""), Level::Error);
    }

    #[test]
    fn test_levels_are_ordered_by_verbosity() {
        assert!(Level::Info > Level::Warn);
        assert!(Level::Warn > Level::Error);
    }
}
