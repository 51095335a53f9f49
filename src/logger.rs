//! Terminal logging with colored module prefixes and a progress bar.
//!
//! - `log!` prints one line prefixed with `[module]`
//! - `ProgressBars` draws per-phase bars while the build writes pages
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "writing {} pages", count);
//! log!("warn"; "front-matter in {} is not valid YAML", path);
//!
//! let progress = ProgressBars::new(&[("content", 12), ("pages", 18)]);
//! progress.inc_by_name("pages");
//! progress.finish();
//! ```
//!
//! Everything goes to stderr; stdout carries command output.

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::{
        OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Active progress bar count, so plain log lines print above the bars
static BAR_COUNT: AtomicUsize = AtomicUsize::new(0);

// ============================================================================
// Layout Constants
// ============================================================================
//
// Progress bar format: "[pages] [████░░░░] 42/100"
//                       ^-----^ ^-------^ ^----^
//                       prefix  bar       count

/// Brackets around the module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix
const SPACE_AFTER_PREFIX: usize = 1;
/// Bar wrapper: " []"
const BAR_WRAPPER_LEN: usize = 3;
/// Space before count
const SPACE_BEFORE_COUNT: usize = 1;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Terminal width, falling back to 120 columns when detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// ```ignore
/// log!("theme"; "switched to {}", name);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Progress Bars
// ============================================================================

/// Several progress bars drawn on consecutive terminal lines.
///
/// Bars are addressed by name. Updates from rayon workers are
/// serialized through a mutex.
pub struct ProgressBars {
    bars: Vec<ProgressBar>,
    lock: Mutex<()>,
}

struct ProgressBar {
    name: &'static str,
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: AtomicUsize,
    row: usize,
}

impl ProgressBars {
    /// Reserve one terminal line per `(name, total)` entry.
    pub fn new(modules: &[(&'static str, usize)]) -> Self {
        let mut stderr = stderr().lock();
        for _ in 0..modules.len() {
            writeln!(stderr).ok();
        }
        stderr.flush().ok();

        BAR_COUNT.store(modules.len(), Ordering::SeqCst);

        let bars = modules
            .iter()
            .enumerate()
            .map(|(row, (name, total))| ProgressBar {
                name: *name,
                prefix: colorize_prefix(name, &name.to_ascii_lowercase()),
                prefix_len: calc_prefix_len(name.len()),
                total: *total,
                current: AtomicUsize::new(0),
                row,
            })
            .collect();

        Self {
            bars,
            lock: Mutex::new(()),
        }
    }

    /// Like [`ProgressBars::new`] but skips empty phases.
    ///
    /// Returns `None` when there is at most one item overall.
    pub fn new_filtered(modules: &[(&'static str, usize)]) -> Option<Self> {
        let filtered: Vec<_> = modules.iter().filter(|(_, n)| *n > 0).copied().collect();
        let total: usize = filtered.iter().map(|(_, n)| n).sum();
        (total > 1).then(|| Self::new(&filtered))
    }

    /// Advance the bar registered under `name`.
    pub fn inc_by_name(&self, name: &str) {
        if let Some(bar) = self.bars.iter().find(|bar| bar.name == name) {
            let current = bar.current.fetch_add(1, Ordering::Relaxed) + 1;
            self.display(bar, current);
        }
    }

    fn display(&self, bar: &ProgressBar, current: usize) {
        let _guard = self.lock.lock();

        let width = get_terminal_width() as usize;
        let progress_text = format!("{}/{}", current, bar.total);
        let overhead = bar.prefix_len + BAR_WRAPPER_LEN + SPACE_BEFORE_COUNT + progress_text.len();
        let bar_width = width
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

        let filled = if bar.total > 0 {
            (current.min(bar.total) * bar_width) / bar.total
        } else {
            0
        };
        let progress_bar = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        let mut stderr = stderr().lock();
        #[allow(clippy::cast_possible_truncation)]
        let lines_up = (self.bars.len() - bar.row) as u16;
        execute!(stderr, cursor::MoveUp(lines_up)).ok();
        execute!(stderr, Clear(ClearType::CurrentLine)).ok();
        write!(stderr, "{} [{}] {}", bar.prefix, progress_bar, progress_text).ok();
        execute!(stderr, cursor::MoveDown(lines_up)).ok();
        write!(stderr, "\r").ok();
        stderr.flush().ok();
    }

    /// Clear every bar line and hand the terminal back to `log!`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish(&self) {
        if BAR_COUNT.swap(0, Ordering::SeqCst) == 0 {
            return;
        }
        let _guard = self.lock.lock();

        let mut stderr = stderr().lock();
        let bars_len = self.bars.len() as u16;
        execute!(stderr, cursor::MoveUp(bars_len)).ok();
        for _ in &self.bars {
            execute!(stderr, Clear(ClearType::CurrentLine)).ok();
            execute!(stderr, cursor::MoveDown(1)).ok();
        }
        execute!(stderr, cursor::MoveUp(bars_len)).ok();
        stderr.flush().ok();
    }
}

impl Drop for ProgressBars {
    fn drop(&mut self) {
        self.finish();
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Print `message` behind a colored `[module]` prefix.
///
/// Single-line messages are truncated to the terminal width.
#[allow(clippy::cast_possible_truncation)]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    let width = get_terminal_width() as usize;

    let mut stderr = stderr().lock();

    let bar_count = BAR_COUNT.load(Ordering::SeqCst);
    if bar_count > 0 {
        execute!(stderr, cursor::MoveUp(bar_count as u16)).ok();
        execute!(stderr, Clear(ClearType::FromCursorDown)).ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, width.saturating_sub(calc_prefix_len(module.len())))
    };
    writeln!(stderr, "{prefix} {message}").ok();

    for _ in 0..bar_count {
        writeln!(stderr).ok();
    }
    stderr.flush().ok();
}

/// Pick the prefix color by module.
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "theme" => prefix.bright_magenta().bold(),
        "content" | "markdown" => prefix.bright_cyan().bold(),
        "analytics" => prefix.bright_blue().bold(),
        "warn" => prefix.yellow().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_green().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
