//! Progress bar display for apply mode

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::package::PackageId;
use crate::reconcile::{PackageStatus, Reporter};

/// Progress bar over the packages of one batch
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a progress bar drawing to stderr
    pub fn new(total_packages: u64) -> Self {
        Self::with_target(total_packages, ProgressDrawTarget::stderr())
    }

    /// Create a progress bar that draws nowhere
    #[cfg(test)]
    pub fn hidden(total_packages: u64) -> Self {
        Self::with_target(total_packages, ProgressDrawTarget::hidden())
    }

    fn with_target(total_packages: u64, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total_packages), target);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl Reporter for ProgressDisplay {
    fn package_started(&self, index: usize, total: usize, package: &PackageId) {
        self.bar
            .set_message(format!("({}/{}) {}", index + 1, total, package));
    }

    fn package_finished(&self, package: &PackageId, status: PackageStatus) {
        match status {
            PackageStatus::Installed => self.bar.println(format!("installed {package}")),
            PackageStatus::AlreadyInstalled => {}
            PackageStatus::Failed(code) => {
                self.bar.println(format!("failed {package} (status {code})"));
            }
        }
        self.bar.inc(1);
    }
}
