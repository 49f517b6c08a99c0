mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::MigrationProgress;
use styling::Tone;
pub use summary::print_summary;

/// Prints the migrator banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        Tone::Title.paint("🚚 GitLab Group Migrator"),
        Tone::Muted.paint(env!("CARGO_PKG_VERSION")),
        Tone::Muted.paint("Copies group hierarchies between GitLab instances")
    );
}
