//! Progress bar utilities using indicatif
//!
//! The bar draws on stderr so it never mixes with JSON on stdout. It stays
//! hidden unless the user asks for it.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar wrapper for displaying processing status
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a byte-based progress bar with known total
    pub fn new(total: usize, label: &str) -> Self {
        let bar = IndicatifBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {percent:>3}% ({bytes}/{total_bytes}) {eta}")
                .expect("Invalid progress bar template")
                .progress_chars("█░"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Create a line-counting spinner for inputs of unknown size
    pub fn new_spinner(label: &str) -> Self {
        let bar = IndicatifBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner} {pos} lines")
                .expect("Invalid spinner template"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// A bar that draws nothing; `println` still reaches stderr
    pub fn hidden() -> Self {
        Self {
            bar: IndicatifBar::hidden(),
        }
    }

    /// Update progress
    pub fn update(&self, current: usize) {
        self.bar.set_position(current as u64);
    }

    /// Finish the progress bar
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Print a diagnostic above the progress bar without disturbing it
    pub fn println<S: AsRef<str>>(&self, msg: S) {
        if self.bar.is_hidden() {
            eprintln!("{}", msg.as_ref());
        } else {
            self.bar.println(msg.as_ref());
        }
    }
}
