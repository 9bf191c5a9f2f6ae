#![forbid(unsafe_code)]

use clap::Parser;
use config::Config;
use dumpgraph::{
    DumpArgs, DumpProvider, ProcessMemoryDump, ProcessToken, SharedMemoryTracker, Whitelist,
    invoke_providers,
};
use memdump_rs::{cli::Cli, providers::ProcessMemoryMetrics};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // NOTE: The verbosity flag takes precedence over the environment variable
    // for log control. `MEMDUMP_LOG` can only set the log level per crate, eg.
    // `MEMDUMP_LOG=dumpgraph=trace memdump-rs -v`.
    let env_filter = EnvFilter::builder()
        .with_env_var("MEMDUMP_LOG")
        .from_env()?
        .add_directive(cli.verbosity.log_level_filter().as_str().parse()?);

    // stdout carries the snapshots
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .init();

    // load config
    let mut config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => {
            let mut candidates = glob::glob("/etc/memdump-rs/config.d/*.toml")?
                .filter_map(Result::ok)
                .collect::<Vec<_>>();
            candidates.insert(0, "/etc/memdump-rs/config.toml".into());
            trace!(?candidates, "config file candidates");
            Config::load_multiple(candidates)?
        }
    };
    cli.apply(&mut config.dump);
    debug!(?config, ?cli);

    let token = config
        .dump
        .process_token
        .map_or_else(ProcessToken::current, ProcessToken::new);
    let whitelist = Arc::new(Whitelist::extended(&config.whitelist));
    let mut pmd = ProcessMemoryDump::new(DumpArgs::from_settings(&config.dump))
        .with_process_token(token)
        .with_whitelist(whitelist);

    let metrics = ProcessMemoryMetrics;
    let tracker = SharedMemoryTracker::new();

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let passes = config.dump.passes;
    let mut pass = 0u32;
    loop {
        #[cfg(target_os = "linux")]
        match memdump_rs::providers::refresh_shared_mappings(&tracker) {
            Ok(mapped) => trace!(mapped, "shared mappings refreshed"),
            Err(err) => warn!(%err, "failed to scan shared mappings"),
        }

        let providers: [&dyn DumpProvider; 2] = [&metrics, &tracker];
        let report = invoke_providers(providers, &mut pmd);
        info!(
            pass,
            invoked = report.invoked.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            dumps = pmd.num_allocator_dumps(),
            edges = pmd.num_edges(),
            "sampling pass complete"
        );

        serde_json::to_writer_pretty(&mut out, &pmd.snapshot())?;
        writeln!(out)?;
        out.flush()?;
        pmd.clear();

        pass = pass.saturating_add(1);
        if passes != 0 && pass >= passes {
            break;
        }
        std::thread::sleep(config.dump.interval);
    }
    Ok(())
}
