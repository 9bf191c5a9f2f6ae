#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(target_os = "linux")]
    #[error("Failed to read procfs info: {0}")]
    ProcfsReadFailed(#[from] procfs::ProcError),

    #[error("Dump provider {provider} failed: {reason}")]
    ProviderFailed { provider: String, reason: String },
}
