use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid data dictionary: {0}")]
    Xml(#[from] serde_xml_rs::Error),

    #[error("record `{record}`: field `{field}` has unresolved type `{type_name}`")]
    UnresolvedType { record: String, field: String, type_name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
