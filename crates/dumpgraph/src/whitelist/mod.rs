#![forbid(unsafe_code)]

//! Background-mode redaction policy.
//!
//! In background mode only providers known to be cheap may run, and every
//! dump name has to match a known pattern once its dynamic parts (pointer
//! values, indices) are collapsed. Producers must therefore write dynamic
//! content as `0x<hex>`.

mod tables;

use config::WhitelistSettings;
use rustc_hash::FxHashSet;

const GLOBAL_PREFIX: &str = "global/";
const SHARED_MEMORY_PREFIX: &str = "shared_memory/";
const HEX_PLACEHOLDER: &str = "0x?";

/// Immutable allow-lists consulted in background and summary-only passes.
#[derive(Debug, Clone)]
pub struct Whitelist {
    providers: FxHashSet<String>,
    summary_providers: FxHashSet<String>,
    dump_names: FxHashSet<String>,
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::new(
            tables::PROVIDERS.iter().copied(),
            tables::SUMMARY_PROVIDERS.iter().copied(),
            tables::DUMP_NAMES.iter().copied(),
        )
    }
}

impl Whitelist {
    /// Build a whitelist from explicit tables. The built-in tables are not
    /// included.
    pub fn new<P, S, D>(providers: P, summary_providers: S, dump_names: D) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            providers: providers.into_iter().map(Into::into).collect(),
            summary_providers: summary_providers.into_iter().map(Into::into).collect(),
            dump_names: dump_names.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in tables plus the configured extra entries.
    pub fn extended(settings: &WhitelistSettings) -> Self {
        let mut whitelist = Self::default();
        whitelist.providers.extend(settings.providers.iter().cloned());
        whitelist
            .summary_providers
            .extend(settings.summary_providers.iter().cloned());
        whitelist.dump_names.extend(settings.dump_names.iter().cloned());
        whitelist
    }

    pub fn is_provider_whitelisted(&self, provider: &str) -> bool {
        self.providers.contains(provider)
    }

    pub fn is_summary_provider(&self, provider: &str) -> bool {
        self.summary_providers.contains(provider)
    }

    pub fn is_dump_name_whitelisted(&self, name: &str) -> bool {
        if let Some(rest) = name.strip_prefix(GLOBAL_PREFIX) {
            return is_hex(rest);
        }
        if let Some(rest) = name.strip_prefix(SHARED_MEMORY_PREFIX) {
            let rest = rest
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .unwrap_or(rest);
            return is_hex(rest);
        }
        self.dump_names.contains(&normalize_dump_name(name))
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Replace every `0x` marker and the hex digits following it with `0x?`.
pub fn normalize_dump_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    let mut parsing_hex = false;
    while let Some(c) = chars.next() {
        if parsing_hex && c.is_ascii_hexdigit() {
            continue;
        }
        parsing_hex = false;
        if c == '0' && chars.peek() == Some(&'x') {
            chars.next();
            out.push_str(HEX_PLACEHOLDER);
            parsing_hex = true;
        } else {
            out.push(c);
        }
    }
    out
}
