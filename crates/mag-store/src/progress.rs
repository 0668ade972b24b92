/// Bytes received so far for one archive download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub received: u64,
    /// `None` when the server sent no `Content-Length`.
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Whole percentage received, rounded down and capped at 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(&self) -> Option<u8> {
        let total = self.total.filter(|t| *t > 0)?;
        let pct = u128::from(self.received) * 100 / u128::from(total);
        Some(pct.min(100) as u8)
    }
}

/// Decides which progress updates reach the caller.
///
/// With a known total, an update is passed on whenever the whole percentage
/// changes. Without one, every chunk is passed on.
#[derive(Debug, Default)]
pub(crate) struct ProgressThrottle {
    last: Option<DownloadProgress>,
}

impl ProgressThrottle {
    pub(crate) fn should_emit(&mut self, progress: DownloadProgress) -> bool {
        let emit = match (self.last, progress.percent()) {
            (None, _) | (_, None) => true,
            (Some(last), Some(pct)) => last.percent() != Some(pct),
        };
        if emit {
            self.last = Some(progress);
        }
        emit
    }

    /// `true` if the final state has not been reported yet.
    pub(crate) fn needs_final(&mut self, progress: DownloadProgress) -> bool {
        if self.last == Some(progress) {
            return false;
        }
        self.last = Some(progress);
        true
    }
}
