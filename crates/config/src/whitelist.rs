use serde::{Deserialize, Serialize};

/// Extra entries appended to the built-in background whitelist.
///
/// The built-in tables cover the well-known low-overhead providers. These
/// lists exist so that a deployment can admit its own providers without
/// rebuilding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WhitelistSettings {
    /// Provider names allowed to run in background mode. Matched exactly.
    pub providers: Vec<String>,

    /// Provider names allowed to run in summary-only mode. Matched exactly.
    pub summary_providers: Vec<String>,

    /// Dump name patterns allowed in background mode. A pattern is compared
    /// against the dump name after every `0x<hex>` run has been replaced by
    /// the literal `0x?`, for example `net/http_network_session_0x?`.
    pub dump_names: Vec<String>,
}
