#![forbid(unsafe_code)]

mod dump;
mod error;
mod level_of_detail;
mod whitelist;

pub use dump::DumpSettings;
pub use error::Error;
pub use level_of_detail::LevelOfDetail;
pub use whitelist::WhitelistSettings;

use serde::{Deserialize, Serialize};
use std::path::Path;
use toml_edit::{DocumentMut, Item, Table, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub dump: DumpSettings,
    pub whitelist: WhitelistSettings,
}

const WHITELIST_SECTION: &str = "whitelist";

impl Config {
    /// Load configuration from a TOML file. Missing fields are filled with defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_document(&read_document(path.as_ref())?)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        std::fs::write(path, toml_edit::ser::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Layer several TOML files, skipping the ones that do not exist. Values
    /// from later files win, except the `[whitelist]` lists, which
    /// accumulate so that a drop-in file only has to name its additions.
    pub fn load_multiple<T, U>(paths: U) -> Result<Self, Error>
    where
        T: AsRef<Path>,
        U: IntoIterator<Item = T>,
    {
        let mut layered = DocumentMut::new();
        for path in paths.into_iter().filter(|path| path.as_ref().exists()) {
            layer(&mut layered, &*read_document(path.as_ref())?, false);
        }
        Self::from_document(&layered)
    }

    fn from_document(document: &DocumentMut) -> Result<Self, Error> {
        let mut config: Config = toml_edit::de::from_str(&document.to_string())?;
        config.apply_defaults();
        Ok(config)
    }

    fn apply_defaults(&mut self) {
        // Whitelist entries are matched exactly, so order and repeats carry no meaning.
        for list in [
            &mut self.whitelist.providers,
            &mut self.whitelist.summary_providers,
            &mut self.whitelist.dump_names,
        ] {
            list.sort();
            list.dedup();
        }
    }
}

fn read_document(path: &Path) -> Result<DocumentMut, Error> {
    Ok(std::fs::read_to_string(path)?.parse()?)
}

/// Apply `overlay` on top of `base`. Tables merge key by key; arrays are
/// appended when `append_arrays` is set and replaced otherwise.
fn layer(base: &mut Table, overlay: &Table, append_arrays: bool) {
    for (key, item) in overlay.iter() {
        let slot = base.entry(key).or_insert(Item::None);
        match (slot, item) {
            (Item::Table(base), Item::Table(overlay)) => {
                layer(base, overlay, key == WHITELIST_SECTION);
            }
            (Item::Value(Value::Array(base)), Item::Value(Value::Array(overlay))) if append_arrays => {
                base.extend(overlay.iter().cloned());
            }
            (slot, item) => *slot = item.clone(),
        }
    }
}
