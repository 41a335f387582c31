//! Tables describing the records and enumerations of an Asante pump data dictionary, as emitted by
//! `asante-codegen`.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid variant: {0}")]
    InvalidVariant(u32),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single member of a user list
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ListEntry {
    pub ident: &'static str,

    /// The position of the entry in the vendor's list, which is the value used on the wire
    pub value: u32,

    /// Display text
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UserList {
    pub name: &'static str,
    pub datatype: &'static str,
    pub entries: &'static [ListEntry],
}

impl UserList {
    pub fn entry(&self, ident: &str) -> Option<&'static ListEntry> {
        self.entries.iter().find(|entry| entry.ident == ident)
    }

    pub fn by_value(&self, value: u32) -> Option<&'static ListEntry> {
        self.entries.iter().find(|entry| entry.value == value)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RecordType {
    pub ident: &'static str,
    pub value: u32,
    pub name: &'static str,

    /// The maximum number of records of this type stored by the pump
    pub max: u32,

    pub rectype: &'static str,

    /// The compressed layout signature of the record
    pub structure: &'static str,

    /// Names of the non-padding fields, in wire order
    pub fields: &'static [&'static str],
}

impl RecordType {
    pub fn expanded_structure(&self) -> String {
        expand_struct(self.structure)
    }
}

pub trait DataDictionary {
    const VERSION: &'static str;
    const USER_LISTS: &'static [UserList];
    const RECORD_TYPES: &'static [RecordType];

    fn record_type(value: u32) -> Option<&'static RecordType> {
        Self::RECORD_TYPES.iter().find(|record| record.value == value)
    }

    fn record_type_by_ident(ident: &str) -> Option<&'static RecordType> {
        Self::RECORD_TYPES.iter().find(|record| record.ident == ident)
    }

    fn user_list(name: &str) -> Option<&'static UserList> {
        Self::USER_LISTS.iter().find(|list| list.name == name)
    }
}

pub trait PumpEnumeration: Sized + Copy {
    const LIST: &'static UserList;

    fn from_value(value: u32) -> Result<Self>;

    fn value(self) -> u32;

    fn entry(self) -> Option<&'static ListEntry> {
        Self::LIST.by_value(self.value())
    }
}

/// Expands a run-length compressed layout signature: a decimal prefix repeats the character that
/// follows it.
pub fn expand_struct(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    let mut count = 0_usize;

    for c in s.chars() {
        match c.to_digit(10) {
            Some(digit) => count = count * 10 + digit as usize,
            None => {
                for _ in 0..count.max(1) {
                    output.push(c);
                }
                count = 0;
            }
        }
    }

    output
}
