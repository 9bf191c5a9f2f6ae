#![forbid(unsafe_code)]

use crate::domain::DumpArgs;
use crate::error::Error;
use crate::process_memory_dump::ProcessMemoryDump;
use crate::whitelist::Whitelist;
use tracing::{debug, warn};

/// A source of allocator dumps, called once per sampling pass.
pub trait DumpProvider: Send + Sync {
    /// Name matched against the provider whitelists.
    fn name(&self) -> &str;

    /// Populate `pmd` with this provider's dumps and edges.
    fn on_memory_dump(&self, args: &DumpArgs, pmd: &mut ProcessMemoryDump) -> Result<(), Error>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    pub invoked: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Whether a provider named `provider` may run in a pass configured by `args`.
pub fn should_invoke(args: &DumpArgs, whitelist: &Whitelist, provider: &str) -> bool {
    if args.summary_only {
        return whitelist.is_summary_provider(provider);
    }
    if args.is_background() {
        return whitelist.is_provider_whitelisted(provider);
    }
    true
}

/// Run every eligible provider against `pmd`. A failing provider is logged
/// and recorded; the remaining providers still run.
pub fn invoke_providers<'a, I>(providers: I, pmd: &mut ProcessMemoryDump) -> InvocationReport
where
    I: IntoIterator<Item = &'a dyn DumpProvider>,
{
    let args = *pmd.args();
    let whitelist = pmd.whitelist().clone();
    let mut report = InvocationReport::default();

    for provider in providers {
        let name = provider.name();
        if !should_invoke(&args, &whitelist, name) {
            debug!(provider = name, level = %args.level_of_detail, "provider skipped");
            report.skipped.push(name.to_owned());
            continue;
        }
        match provider.on_memory_dump(&args, pmd) {
            Ok(()) => report.invoked.push(name.to_owned()),
            Err(err) => {
                warn!(provider = name, %err, "provider failed");
                report.failed.push((name.to_owned(), err.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NAME_SIZE, Units};
    use config::LevelOfDetail;

    struct Named(&'static str);

    impl DumpProvider for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn on_memory_dump(&self, _args: &DumpArgs, pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
            pmd.create_allocator_dump("malloc").add_scalar(NAME_SIZE, Units::Bytes, 1);
            Ok(())
        }
    }

    struct Failing;

    impl DumpProvider for Failing {
        fn name(&self) -> &str {
            "Malloc"
        }

        fn on_memory_dump(&self, _args: &DumpArgs, _pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
            Err(Error::ProviderFailed {
                provider: "Malloc".into(),
                reason: "heap walk failed".into(),
            })
        }
    }

    #[test]
    fn gating_by_mode() {
        let whitelist = Whitelist::default();
        let detailed = DumpArgs::new(LevelOfDetail::Detailed);
        let background = DumpArgs::new(LevelOfDetail::Background);
        let summary = DumpArgs {
            level_of_detail: LevelOfDetail::Background,
            summary_only: true,
        };

        assert!(should_invoke(&detailed, &whitelist, "SomethingExpensive"));
        assert!(!should_invoke(&background, &whitelist, "SomethingExpensive"));
        assert!(should_invoke(&background, &whitelist, "Skia"));
        assert!(!should_invoke(&summary, &whitelist, "Skia"));
        assert!(should_invoke(&summary, &whitelist, "Malloc"));
    }

    #[test]
    fn skipped_and_failed_providers_are_reported() {
        let mut pmd = ProcessMemoryDump::new(DumpArgs::new(LevelOfDetail::Background));
        let providers: [&dyn DumpProvider; 3] = [&Named("SomethingExpensive"), &Failing, &Named("Skia")];

        let report = invoke_providers(providers, &mut pmd);
        assert_eq!(report.skipped, vec!["SomethingExpensive"]);
        assert_eq!(report.invoked, vec!["Skia"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(pmd.num_allocator_dumps(), 1);
    }
}
