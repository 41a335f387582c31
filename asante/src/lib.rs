//! Record and enumeration tables for Asante pumps, generated from the vendor's data dictionary.

#[cfg(test)]
mod tests;

pub use asante_common::{
    expand_struct, DataDictionary, Error, ListEntry, PumpEnumeration, RecordType, Result, UserList,
};

include!(concat!(env!("OUT_DIR"), "/asante_generated.rs"));
