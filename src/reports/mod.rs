pub mod basic_stats;
pub mod summary;

pub use basic_stats::BasicStatsReport;
pub use summary::{GraphSummaryReport, LoadFailureReport, ManifestReport};

use serde::Serialize;
use tinytemplate::{error::Result, format_unescaped, TinyTemplate};

pub trait Report: Serialize {
    fn title() -> &'static str;
    fn template() -> &'static str;

    fn generate(&self) -> Result<String> {
        let mut report = TinyTemplate::new();
        report.set_default_formatter(&format_unescaped);
        report.add_template(Self::title(), Self::template())?;
        report.render(Self::title(), &self)
    }
}

/// Renders an optional count the way the console report shows missing data.
pub(crate) fn optional<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "None".to_string())
}
