//! Code for compiling the parsed data dictionary into the representation consumed by the emitters:
//! positional enumeration tables and per-record layout signatures.

use std::collections::HashMap;

use log::{debug, warn};

use crate::datadesc_def;

/// Storage code emitted for a field whose type cannot be resolved
pub const UNRESOLVED_CODE: char = '!';

/// Storage code emitted for a padding field
pub const PADDING_CODE: char = '.';

/// The primitive wire types a field can be stored as
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StorageKind {
    Char,
    Crc,
    Int16,
    Int32,
    Int8,
    TimeInSecs,
    TimeNoOffset,
    Uint16,
    Uint32,
    Uint8,
    Enum8,
    Enum16,
    Bit,
}

static STORAGE_KINDS: [StorageKind; 13] = [
    StorageKind::Char,
    StorageKind::Crc,
    StorageKind::Int16,
    StorageKind::Int32,
    StorageKind::Int8,
    StorageKind::TimeInSecs,
    StorageKind::TimeNoOffset,
    StorageKind::Uint16,
    StorageKind::Uint32,
    StorageKind::Uint8,
    StorageKind::Enum8,
    StorageKind::Enum16,
    StorageKind::Bit,
];

impl StorageKind {
    pub fn all() -> impl Iterator<Item = StorageKind> {
        STORAGE_KINDS.iter().copied()
    }

    pub fn from_name(name: &str) -> Option<StorageKind> {
        Self::all().find(|kind| kind.name() == name)
    }

    #[rustfmt::skip]
    pub fn name(self) -> &'static str {
        use StorageKind::*;

        match self {
            Char         => "char",
            Crc          => "crc",
            Int16        => "int16_t",
            Int32        => "int32_t",
            Int8         => "int8_t",
            TimeInSecs   => "time_in_secs",
            TimeNoOffset => "time_no_offset",
            Uint16       => "uint16_t",
            Uint32       => "uint32_t",
            Uint8        => "uint8_t",
            Enum8        => "enum8",
            Enum16       => "enum16",
            Bit          => "bit",
        }
    }

    /// The single character storage code of this kind
    pub fn code(self) -> char {
        use StorageKind::*;

        match self {
            Char => 'z',
            Crc | Uint16 | Enum16 => 's',
            Int16 => 'h',
            Int32 => 'n',
            Int8 | Uint8 | Enum8 | Bit => 'b',
            TimeInSecs | TimeNoOffset | Uint32 => 'i',
        }
    }
}

/// The result of resolving a field's declared type
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TypeCode {
    Resolved(StorageKind),
    Unresolved,
}

impl TypeCode {
    pub fn code(self) -> char {
        match self {
            TypeCode::Resolved(kind) => kind.code(),
            TypeCode::Unresolved => UNRESOLVED_CODE,
        }
    }

    pub fn is_resolved(self) -> bool {
        match self {
            TypeCode::Resolved(_) => true,
            TypeCode::Unresolved => false,
        }
    }
}

/// Vendor defined type names, mapped to the name of the storage kind they are declared as
#[derive(Debug, Clone, Default)]
pub struct TypeAliases {
    aliases: HashMap<String, String>,
}

impl TypeAliases {
    pub fn from_user_lists(lists: &[UserList]) -> Self {
        let mut aliases = TypeAliases::default();
        for list in lists {
            aliases.insert(&list.name, &list.datatype);
        }
        aliases
    }

    /// Adds an alias, replacing any earlier alias with the same name
    pub fn insert(&mut self, name: &str, datatype: &str) {
        self.aliases.insert(name.to_owned(), datatype.to_owned());
    }

    /// Resolves a type name to its storage kind. Aliases are only followed a single level: an
    /// alias declared in terms of another alias is unresolved.
    pub fn resolve(&self, type_name: &str) -> TypeCode {
        if let Some(kind) = StorageKind::from_name(type_name) {
            return TypeCode::Resolved(kind);
        }

        match self.aliases.get(type_name).and_then(|datatype| StorageKind::from_name(datatype)) {
            Some(kind) => TypeCode::Resolved(kind),
            None => TypeCode::Unresolved,
        }
    }
}

/// The raw value of a field's `ispadding` attribute
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Padding {
    Flag(bool),

    /// Any value other than `true`/`false`, kept as written
    Other(String),
}

impl Default for Padding {
    fn default() -> Self {
        Padding::Flag(false)
    }
}

impl Padding {
    pub fn parse(value: Option<&str>) -> Padding {
        match value {
            None => Padding::Flag(false),
            Some(v) if v.eq_ignore_ascii_case("true") => Padding::Flag(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Padding::Flag(false),
            Some(other) => Padding::Other(other.to_owned()),
        }
    }

    /// Unrecognised values count as padding unless they are empty
    pub fn is_padding(&self) -> bool {
        match self {
            Padding::Flag(flag) => *flag,
            Padding::Other(raw) => !raw.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ListRow {
    /// The member identifier, with separators collapsed to `_`
    pub ident: String,

    /// Display text for the member
    pub text: String,

    /// The position of the member within its list
    pub value: u32,
}

#[derive(Debug, Clone)]
pub struct UserList {
    pub name: String,
    pub datatype: String,
    pub rows: Vec<ListRow>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub fldtype: String,
    pub size: Option<String>,
    pub padding: Padding,
    pub code: TypeCode,
}

impl Field {
    /// The contribution of this field to the record's layout signature
    pub fn signature(&self) -> String {
        if self.padding.is_padding() {
            return PADDING_CODE.to_string();
        }

        match &self.size {
            Some(size) => format!("{}{}", size, self.code.code()),
            None => self.code.code().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordDefinition {
    /// The display name of the record
    pub text: String,

    /// All-caps identifier derived from the display name
    pub ident: String,

    pub id: u32,
    pub maxrecs: u32,
    pub rectype: String,
    pub fields: Vec<Field>,

    /// Names of all non-padding fields, in declaration order
    pub keys: Vec<String>,

    /// Run-length compressed layout signature
    pub structure: String,

    /// Uncompressed layout signature
    pub orig: String,
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    pub version: String,
    pub user_lists: Vec<UserList>,
    pub records: Vec<RecordDefinition>,
}

impl Dictionary {
    /// Every field with a type that could not be resolved, paired with the record it belongs to.
    /// Padding is laid out as `.` whatever its type, so it never counts as unresolved.
    pub fn unresolved_fields(&self) -> impl Iterator<Item = (&RecordDefinition, &Field)> {
        self.records.iter().flat_map(|record| {
            record
                .fields
                .iter()
                .filter(|f| !f.padding.is_padding() && !f.code.is_resolved())
                .map(move |f| (record, f))
        })
    }

    /// Fails on the first field with an unresolved type
    pub fn check_resolved(&self) -> crate::Result<()> {
        match self.unresolved_fields().next() {
            Some((record, field)) => Err(crate::Error::UnresolvedType {
                record: record.text.clone(),
                field: field.name.clone(),
                type_name: field.fldtype.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn user_list(&self, name: &str) -> Option<&UserList> {
        self.user_lists.iter().find(|list| list.name == name)
    }

    pub fn record(&self, ident: &str) -> Option<&RecordDefinition> {
        self.records.iter().find(|record| record.ident == ident)
    }
}

pub fn parse_definitions(def: datadesc_def::DataDesc) -> Dictionary {
    // User lists come first, since they double as the vendor's type aliases
    let user_lists: Vec<UserList> = def.user_lists.lists.iter().map(parse_user_list).collect();
    let aliases = TypeAliases::from_user_lists(&user_lists);

    let records = def.files.iter().map(|file| parse_record(file, &aliases)).collect();

    Dictionary { version: def.framversion, user_lists, records }
}

fn parse_user_list(list: &datadesc_def::UserListDefinition) -> UserList {
    let rows = list.values.items.iter().fold(Vec::new(), |mut rows, raw| {
        let value = rows.len() as u32;
        rows.push(ListRow { ident: create_id(raw), text: create_text(raw), value });
        rows
    });

    debug!("user list `{}` ({}): {} members", list.name, list.datatype, rows.len());
    UserList { name: list.name.clone(), datatype: list.datatype.clone(), rows }
}

fn parse_record(file: &datadesc_def::FileDefinition, aliases: &TypeAliases) -> RecordDefinition {
    let fields: Vec<Field> = file
        .fields
        .iter()
        .map(|fld| Field {
            name: fld.name.clone(),
            fldtype: fld.type_.clone(),
            size: fld.size.clone(),
            padding: Padding::parse(fld.ispadding.as_deref()),
            code: aliases.resolve(&fld.type_),
        })
        .collect();

    let mut orig = String::new();
    let mut keys = vec![];
    for field in &fields {
        orig.push_str(&field.signature());
        if field.padding.is_padding() {
            continue;
        }

        if !field.code.is_resolved() {
            warn!("{}: field `{}` has unknown type `{}`", file.name, field.name, field.fldtype);
        }
        keys.push(field.name.clone());
    }

    let structure = compress_struct(&orig);
    debug!("record `{}` (id {}): {} -> {}", file.name, file.id, orig, structure);

    RecordDefinition {
        text: file.name.clone(),
        ident: record_ident(&file.name),
        id: file.id,
        maxrecs: file.maxrecs,
        rectype: file.type_.clone(),
        fields,
        keys,
        structure,
        orig,
    }
}

fn record_ident(name: &str) -> String {
    name.to_uppercase().replace(' ', "_")
}

/// Builds an identifier from a raw list member by replacing every run of characters outside
/// `[A-Za-z0-9_]` with a single `_`
pub fn create_id(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    let mut in_separator = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            output.push(c);
            in_separator = false;
        }
        else if !in_separator {
            output.push('_');
            in_separator = true;
        }
    }

    output
}

/// Strips a leading two letter lowercase prefix (e.g. `bt_`) from a raw list member
pub fn create_text(s: &str) -> String {
    let bytes = s.as_bytes();
    match bytes {
        [a, b, b'_', ..] if a.is_ascii_lowercase() && b.is_ascii_lowercase() => s[3..].to_owned(),
        _ => s.to_owned(),
    }
}

/// Compresses a layout signature by prefixing each run of two or more identical characters with
/// the length of the run.
///
/// This operates on characters rather than fields, so a run can span the boundary between two
/// fields (including the digits of a size prefix).
pub fn compress_struct(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }

        if run > 1 {
            output.push_str(&run.to_string());
        }
        output.push(c);
    }

    output
}
