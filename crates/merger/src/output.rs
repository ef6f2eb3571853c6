use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// One human-readable progress line, rendered as `[INFO] ...` or
/// `[SUCCESS] ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Info(String),
    Success(String),
}

impl Line {
    fn tag(&self) -> &'static str {
        match self {
            Self::Info(_) => "[INFO]",
            Self::Success(_) => "[SUCCESS]",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Success(msg) => msg,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag(), self.message())
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_line(line: &Line) {
    let tag = match line {
        Line::Info(_) => line.tag().cyan().bold(),
        Line::Success(_) => line.tag().green().bold(),
    };
    println!("{} {}", tag, line.message());
}

pub fn print_usage() {
    println!("Usage: followsync-merge <backup.json>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_line_format() {
        let line = Line::Info("added: 3".into());
        assert_eq!(line.to_string(), "[INFO] added: 3");
    }

    #[test]
    fn success_line_format() {
        let line = Line::Success("data saved to: /tmp/posts.json".into());
        assert_eq!(line.to_string(), "[SUCCESS] data saved to: /tmp/posts.json");
    }

    #[test]
    fn print_json_valid() {
        let val = serde_json::json!({"added_count": 3});
        assert!(print_json(&val).is_ok());
    }
}
