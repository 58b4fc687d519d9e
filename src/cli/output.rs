//! Console output with optional ANSI styling.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use colored::Colorize;

pub struct ConsoleOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    no_colors: bool,
}

impl ConsoleOutput {
    pub fn new(writer: Box<dyn Write + Send>, no_colors: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            no_colors,
        }
    }

    pub fn stdout(no_colors: bool) -> Self {
        Self::new(Box::new(io::stdout()), no_colors)
    }

    pub fn no_colors(&self) -> bool {
        self.no_colors
    }

    /// Section heading, yellow and bold.
    pub fn title(&self, text: &str) {
        if self.no_colors {
            self.line(text);
        } else {
            self.line(&text.yellow().bold().to_string());
        }
    }

    pub fn success(&self, text: &str) {
        if self.no_colors {
            self.line(&format!("[OK] {text}"));
        } else {
            self.line(&format!("{} {}", "✓".green(), text));
        }
    }

    pub fn error(&self, text: &str) {
        if self.no_colors {
            self.line(&format!("[ERROR] {text}"));
        } else {
            self.line(&format!("{} {}", "✗".red(), text.red()));
        }
    }

    /// Two-column row, label padded to `width`.
    pub fn row(&self, label: &str, value: &str, width: usize) {
        if self.no_colors {
            self.line(&format!("  {label:<width$}  {value}"));
        } else {
            self.line(&format!("  {:<width$}  {}", label.cyan(), value));
        }
    }

    pub fn line(&self, text: &str) {
        let mut writer = self.writer.lock().expect("console writer lock poisoned");
        if let Err(e) = writeln!(writer, "{text}").and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "Console write failed");
        }
    }
}

/// In-memory writer for capturing console output.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("capture lock poisoned")).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("capture lock poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output() {
        let capture = CapturedOutput::new();
        let output = ConsoleOutput::new(Box::new(capture.clone()), true);

        output.title("Packages");
        output.row("di", "42", 5);
        output.success("done");
        output.error("failed");

        assert_eq!(
            capture.contents(),
            "Packages\n  di     42\n[OK] done\n[ERROR] failed\n"
        );
    }

    #[test]
    fn test_title_keeps_text_when_colored() {
        let capture = CapturedOutput::new();
        let output = ConsoleOutput::new(Box::new(capture.clone()), false);
        output.title("Packages");
        assert!(capture.contents().contains("Packages"));
    }
}
