#![forbid(unsafe_code)]

use config::{DumpSettings, LevelOfDetail};

/// Configuration of one sampling pass, handed to every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpArgs {
    pub level_of_detail: LevelOfDetail,
    /// Only summary providers run.
    pub summary_only: bool,
}

impl DumpArgs {
    pub fn new(level_of_detail: LevelOfDetail) -> Self {
        Self {
            level_of_detail,
            summary_only: false,
        }
    }

    pub fn from_settings(settings: &DumpSettings) -> Self {
        Self {
            level_of_detail: settings.level_of_detail,
            summary_only: settings.summary_only,
        }
    }

    pub fn is_background(&self) -> bool {
        self.level_of_detail == LevelOfDetail::Background
    }
}
