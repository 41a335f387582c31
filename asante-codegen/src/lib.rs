mod codegen;
mod datadesc_def;
mod error;
pub mod js;
mod repr;

use std::{fs, path::Path};

use log::{info, warn};

pub use crate::{
    codegen::GeneratedCode,
    error::{Error, Result},
    repr::{
        compress_struct, create_id, create_text, Dictionary, Field, ListRow, Padding,
        RecordDefinition, StorageKind, TypeAliases, TypeCode, UserList, PADDING_CODE,
        UNRESOLVED_CODE,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Treat fields with unresolved types as an error instead of emitting the sentinel code
    pub strict: bool,
}

/// Compiles a data dictionary from the raw XML
pub fn load_definitions(data: &[u8], options: Options) -> Result<Dictionary> {
    let def = datadesc_def::parse(data)?;
    let dictionary = repr::parse_definitions(def);

    let unresolved = dictionary.unresolved_fields().count();
    info!(
        "compiled data dictionary version {}: {} user lists, {} record types, {} unresolved fields",
        dictionary.version,
        dictionary.user_lists.len(),
        dictionary.records.len(),
        unresolved
    );

    if options.strict {
        dictionary.check_resolved()?;
    }

    Ok(dictionary)
}

/// Compiles the data dictionary stored at `path`. A file that cannot be read produces no
/// dictionary rather than an error.
pub fn load_file(path: impl AsRef<Path>, options: Options) -> Result<Option<Dictionary>> {
    let path = path.as_ref();
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("skipping {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    load_definitions(&data, options).map(Some)
}

pub fn generate_code(dictionary: &Dictionary) -> GeneratedCode {
    codegen::generate(dictionary)
}
