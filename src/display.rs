//! Colored CLI output for tail events.
//!
//! Data lines are printed bare (prefix-tagged); lifecycle notices carry a
//! timestamp and a colored tag. The alert signal is the terminal bell.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::config::MonitorConfig;
use crate::monitor::TailEvent;

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// File name portion of a path, for compact notices.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

/// Print the startup banner.
pub fn print_banner(config: &MonitorConfig) {
    println!(
        "Scanning directory:   {}",
        config.directory.display().bold()
    );
    println!("File name regex:      {}", config.file_pattern.as_str());
    if let Some(alert) = &config.alert_pattern {
        println!("Alert if line matches: {}", alert.as_str());
    }
    println!("Press CTRL-C to exit.");
    let _ = io::stdout().flush();
}

/// Render one tail event to the console.
pub fn print_event(event: &TailEvent) {
    match event {
        TailEvent::Line { prefix, line } => print_line(prefix, line),
        TailEvent::Alert => ring_bell(),
        TailEvent::Watching {
            prefix,
            path,
            rewound,
        } => print_watching(prefix, path, *rewound),
        TailEvent::Stopped { prefix, path } => print_stopped(prefix, path),
        TailEvent::LimitReached { limit, path } => print_limit_reached(*limit, path),
        TailEvent::StatFailed {
            prefix,
            path,
            error,
        } => print_file_error(prefix, path, "stat failed", error),
        TailEvent::ReadFailed {
            prefix,
            path,
            error,
        } => print_file_error(prefix, path, "read failed", error),
        TailEvent::ScanFailed { error } => {
            println!(
                "{} {} rescan failed: {}",
                timestamp().dimmed(),
                "[ERROR]".red().bold(),
                error
            );
            let _ = io::stdout().flush();
        }
        TailEvent::NoMatches => {
            println!(
                "{} {} no files match the file name regex; monitoring continues",
                timestamp().dimmed(),
                "[WARN]".yellow().bold()
            );
            let _ = io::stdout().flush();
        }
    }
}

/// Print a tailed line tagged with its prefix.
pub fn print_line(prefix: &str, line: &str) {
    println!("{}: {}", prefix.cyan().bold(), line);
    let _ = io::stdout().flush();
}

/// Ring the terminal bell. One bell per matching line.
fn ring_bell() {
    print!("\x07");
    let _ = io::stdout().flush();
}

fn print_watching(prefix: &str, path: &Path, rewound: bool) {
    let note = if rewound {
        " (rewinding to start of file)"
    } else {
        ""
    };
    println!(
        "{} {} {}: watching {}{}",
        timestamp().dimmed(),
        "[WATCH]".green().bold(),
        prefix.cyan(),
        file_name(path),
        note.dimmed()
    );
    let _ = io::stdout().flush();
}

fn print_stopped(prefix: &str, path: &Path) {
    println!(
        "{} {} {}: stopped watching {}",
        timestamp().dimmed(),
        "[STOP]".yellow().bold(),
        prefix.cyan(),
        file_name(path)
    );
    let _ = io::stdout().flush();
}

fn print_limit_reached(limit: usize, path: &Path) {
    println!(
        "{} {} maximum number of files are being monitored ({limit}); not watching new file {}",
        timestamp().dimmed(),
        "[LIMIT]".red().bold(),
        file_name(path)
    );
    let _ = io::stdout().flush();
}

fn print_file_error(prefix: &str, path: &Path, what: &str, error: &str) {
    println!(
        "{} {} {}: {what} for {}: {error}",
        timestamp().dimmed(),
        "[ERROR]".red().bold(),
        prefix.cyan(),
        file_name(path)
    );
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    println!("{} {}", "[ERROR]".red().bold(), message);
    let _ = io::stdout().flush();
}

/// Print the fatal too-many-matches table with every prefix and file name.
pub fn print_too_many_files(limit: usize, prefixes: &[(String, std::path::PathBuf)]) {
    println!(
        "Too many files match the given pattern (maximum number of files is {limit}, use the -m option to increase the limit)."
    );
    println!("{:<25} : {:<50}", "Unique Prefix".bold(), "File Name".bold());
    println!("{:<25} : {:<50}", "=".repeat(18), "=".repeat(49));
    for (prefix, path) in prefixes {
        println!("{prefix:<25} : {:<50}", file_name(path));
    }
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_name_plain() {
        assert_eq!(file_name(Path::new("/var/log/web_1.log")), "web_1.log");
    }

    #[test]
    fn test_file_name_without_component() {
        assert_eq!(file_name(Path::new("/")), "/");
    }

    #[test]
    fn test_print_event_variants_do_not_panic() {
        print_event(&TailEvent::Line {
            prefix: "web".to_string(),
            line: "hello".to_string(),
        });
        print_event(&TailEvent::Watching {
            prefix: "web".to_string(),
            path: PathBuf::from("web_1.log"),
            rewound: true,
        });
        print_event(&TailEvent::Stopped {
            prefix: "web".to_string(),
            path: PathBuf::from("web_1.log"),
        });
        print_event(&TailEvent::LimitReached {
            limit: 10,
            path: PathBuf::from("web_2.log"),
        });
        print_event(&TailEvent::ScanFailed {
            error: "boom".to_string(),
        });
        print_event(&TailEvent::NoMatches);
    }
}
