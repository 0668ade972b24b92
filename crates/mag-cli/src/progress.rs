use indicatif::{ProgressBar, ProgressStyle};
use mag_store::DownloadProgress;

/// Download progress on stderr. Inert when progress output is disabled.
pub struct DownloadBar {
    enabled: bool,
    message: String,
    bar: Option<ProgressBar>,
}

impl DownloadBar {
    #[must_use]
    pub fn new(enabled: bool, message: &str) -> Self {
        Self {
            enabled,
            message: message.to_string(),
            bar: None,
        }
    }

    /// Created on the first update so the bar knows whether a total exists.
    pub fn update(&mut self, progress: DownloadProgress) {
        if !self.enabled {
            return;
        }
        let message = &self.message;
        let bar = self.bar.get_or_insert_with(|| {
            let bar = match progress.total {
                Some(total) => {
                    let bar = ProgressBar::new(total);
                    bar.set_style(
                        ProgressStyle::with_template(
                            "{wide_bar:.cyan/blue} {bytes}/{total_bytes} {percent}% {msg}",
                        )
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                    );
                    bar
                }
                None => {
                    let bar = ProgressBar::new_spinner();
                    bar.enable_steady_tick(std::time::Duration::from_millis(100));
                    bar.set_style(
                        ProgressStyle::with_template("{spinner:.cyan} {bytes} {msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                    );
                    bar
                }
            };
            bar.set_message(message.clone());
            bar
        });
        bar.set_position(progress.received);
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
