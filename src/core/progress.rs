use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{percent:>3}% [{bar:40}] {eta_precise} {bytes_per_sec}";

/// Console progress for a single file transfer.
pub struct TransferProgress {
    bar: ProgressBar,
}

impl TransferProgress {
    /// Start a visible bar, seeded with the expected size when one is known.
    pub fn start(expected_size: Option<u64>) -> Self {
        let bar = match expected_size {
            Some(size) => ProgressBar::new(size),
            None => ProgressBar::no_length(),
        };
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }

    /// A bar that tracks position without drawing anything.
    pub fn hidden(expected_size: Option<u64>) -> Self {
        let bar = ProgressBar::hidden();
        if let Some(size) = expected_size {
            bar.set_length(size);
        }
        Self { bar }
    }

    /// Chunk callback: bytes received so far and the size the transport reports.
    ///
    /// A reported size replaces the seeded one. The position never passes the
    /// known total.
    pub fn update(&self, transferred: u64, total: Option<u64>) {
        if let Some(total) = total {
            self.bar.set_length(total);
        }
        let position = match self.bar.length() {
            Some(len) => transferred.min(len),
            None => transferred,
        };
        self.bar.set_position(position);
    }

    pub fn finish(&self) {
        self.bar.finish();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn total(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl Drop for TransferProgress {
    // A transfer that failed part way leaves its bar where it stopped.
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
