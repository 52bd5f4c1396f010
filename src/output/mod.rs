pub mod report;

pub use report::write_statistics;

use crate::models::Event;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Writes classified events in one of the export formats
pub struct OutputHandler {
    format: OutputFormat,
    writer: Box<dyn Write>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Console,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            "console" => OutputFormat::Console,
            _ => OutputFormat::Console, // Default
        }
    }
}

impl OutputHandler {
    /// Create a handler writing to `file_path`, or to stdout when `None`.
    ///
    /// An existing file is truncated.
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let writer: Box<dyn Write> = match file_path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(std::io::stdout()),
        };

        Ok(Self::with_writer(format, writer))
    }

    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        OutputHandler { format, writer }
    }

    /// Write all events; JSON output is a single array
    pub fn write_events(&mut self, events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(events)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Jsonl => {
                for event in events {
                    let json = serde_json::to_string(event)?;
                    writeln!(self.writer, "{}", json)?;
                }
            }
            OutputFormat::Console => {
                for event in events {
                    writeln!(self.writer, "{}", Self::console_line(event))?;
                }
            }
        }
        self.flush()
    }

    fn console_line(event: &Event) -> String {
        let detail = match (&event.user, &event.password, &event.command) {
            (Some(user), Some(password), _) => format!(
                "User: {}, Password: {}, Status: {}",
                user,
                crate::analysis::display_label(password),
                event.status.as_deref().unwrap_or("-")
            ),
            (_, _, Some(command)) => format!("Command: {}", command),
            _ => format!("IP: {}", event.src_ip),
        };
        format!("[{}] {} - {}", event.timestamp, event.kind, detail)
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event::new_connection("2024-01-15T10:23:40.000".to_string(), "203.0.113.7"),
            Event::login_attempt("2024-01-15T10:23:42.000".to_string(), "root", "", "failed"),
            Event::command_execution("2024-01-15T10:23:46.000".to_string(), "uname -a"),
        ]
    }

    #[test]
    fn test_console_format() {
        let buffer = SharedBuffer::default();
        let mut handler = OutputHandler::with_writer(OutputFormat::Console, Box::new(buffer.clone()));
        handler.write_events(&sample_events()).unwrap();

        let lines: Vec<String> = buffer.contents().lines().map(String::from).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[2024-01-15T10:23:40.000] New Connection - IP: 203.0.113.7");
        assert_eq!(
            lines[1],
            "[2024-01-15T10:23:42.000] Login Attempt - User: root, Password: (empty), Status: failed"
        );
        assert_eq!(lines[2], "[2024-01-15T10:23:46.000] Command Execution - Command: uname -a");
    }

    #[test]
    fn test_jsonl_format() {
        let buffer = SharedBuffer::default();
        let mut handler = OutputHandler::with_writer(OutputFormat::Jsonl, Box::new(buffer.clone()));
        handler.write_events(&sample_events()).unwrap();

        let contents = buffer.contents();
        let parsed: Vec<Event> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed, sample_events());
    }

    #[test]
    fn test_json_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "stale contents that are longer than nothing").unwrap();

        let mut handler = OutputHandler::new(OutputFormat::Json, Some(path.clone())).unwrap();
        handler.write_events(&[]).unwrap();
        drop(handler);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("jsonl"), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("yaml"), OutputFormat::Console);
    }
}
