use crate::LevelOfDetail;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DumpSettings {
    /// Level of detail requested from every provider in a sampling pass.
    ///
    /// ## Note
    ///
    /// `background` turns on name redaction: any dump whose name does not
    /// match the whitelist after `0x<hex>` runs are collapsed is redirected to
    /// a discarded sentinel dump.
    pub level_of_detail: LevelOfDetail,

    /// Only invoke the providers on the summary whitelist. This is an even
    /// lighter mode than `background` and is meant for periodic totals.
    pub summary_only: bool,

    /// Process identity mixed into every local dump guid. When unset the
    /// current pid is used. Two dumps taken with the same token produce
    /// identical guids for identical names, which is what allows merging
    /// graphs built independently for the same process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_token: Option<u64>,

    /// Time between two sampling passes. **Measured in seconds**.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub interval: Duration,

    /// Number of sampling passes to run before exiting. Zero means run until
    /// interrupted.
    pub passes: u32,
}

impl Default for DumpSettings {
    fn default() -> Self {
        Self {
            level_of_detail: LevelOfDetail::Detailed,
            summary_only: false,
            process_token: None,
            interval: Duration::from_secs(2),
            passes: 1,
        }
    }
}
