//! Terminal rendering for the markdown produced by the core display types.
//!
//! Rich mode styles headers, finished tasks and failing preflight checks;
//! plain mode prints the markdown untouched so output can be piped or
//! compared byte for byte with what the MCP server returns.

use anyhow::Result;
use playbook_core::OperationStatus;
use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_color(line) {
                // headers keep their hashes so day and category boundaries
                // stay visible
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }

    /// Render a failed operation, with its recovery hint, to stderr
    pub fn render_error(&self, status: &OperationStatus) {
        if self.rich_enabled {
            for line in status.to_string().lines() {
                eprintln!("{RED}{line}{RESET}");
            }
        } else {
            eprint!("{status}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn line_color(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        Some(BLUE)
    } else if trimmed.starts_with("- [x]") {
        Some(GREEN)
    } else if trimmed.starts_with("- ✗") {
        Some(RED)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Open Moves\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_line_color() {
        assert_eq!(line_color("### Day 2"), Some(BLUE));
        assert_eq!(line_color("- [x] List 20 prospects (ID: 1)"), Some(GREEN));
        assert_eq!(line_color("- ✗ \"Offer\" is filled in"), Some(RED));
        assert_eq!(line_color("- [ ] Send 10 messages (ID: 2)"), None);
        assert_eq!(line_color("- **Status**: active"), None);
    }
}
