use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::Tone;

/// Spinner showing the group or project currently being migrated.
pub struct MigrationProgress {
    pb: ProgressBar,
}

impl MigrationProgress {
    pub fn spinner() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    /// A progress tracker that draws nothing.
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn working_on(&self, what: &str, path: &str) {
        self.pb
            .set_message(Tone::Active.paint(format!("{what} {path}")).to_string());
    }

    pub fn finish(&self, succeeded: bool) {
        if succeeded {
            self.pb
                .finish_with_message(Tone::Success.paint("Migration finished ✓").to_string());
        } else {
            self.pb
                .abandon_with_message(Tone::Failure.paint("Migration aborted ✗").to_string());
        }
    }
}
