use std::collections::HashSet;

use heck::{CamelCase, ShoutySnakeCase};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use crate::repr::{create_id, Dictionary, RecordDefinition, UserList};

pub struct GeneratedCode {
    pub(crate) version: String,
    pub(crate) enumerations: Vec<TokenStream>,
    pub(crate) user_lists: Vec<(Ident, TokenStream)>,
    pub(crate) record_types: Vec<(Ident, TokenStream)>,
}

impl std::fmt::Display for GeneratedCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "// Generated from data dictionary version {}. Do not edit.", self.version)?;

        let version = &self.version;
        let enumerations = &self.enumerations;
        let (list_idents, list_defs): (Vec<_>, Vec<_>) = self.user_lists.iter().cloned().unzip();
        let (record_idents, record_defs): (Vec<_>, Vec<_>) =
            self.record_types.iter().cloned().unzip();

        let body = quote! {
            pub const FRAM_VERSION: &str = #version;

            #[allow(bad_style, unused_imports)]
            pub mod enumerations {
                use super::user_lists;
                #(#enumerations)*
            }

            #[allow(bad_style)]
            pub mod user_lists {
                #(#list_defs)*
            }

            #[allow(bad_style)]
            pub mod record_types {
                #(#record_defs)*
            }

            pub const USER_LISTS: &[crate::UserList] = &[#(user_lists::#list_idents,)*];

            pub const RECORD_TYPES: &[crate::RecordType] = &[#(record_types::#record_idents,)*];

            #[derive(Debug, Clone, Copy)]
            pub struct Datadesc;

            impl crate::DataDictionary for Datadesc {
                const VERSION: &'static str = FRAM_VERSION;
                const USER_LISTS: &'static [crate::UserList] = USER_LISTS;
                const RECORD_TYPES: &'static [crate::RecordType] = RECORD_TYPES;
            }
        };
        write!(f, "{}", body)?;

        Ok(())
    }
}

pub fn generate(dictionary: &Dictionary) -> GeneratedCode {
    let mut code = GeneratedCode {
        version: dictionary.version.clone(),
        enumerations: vec![],
        user_lists: vec![],
        record_types: vec![],
    };

    let mut list_consts = Idents::default();
    let mut enum_names = Idents::default();
    for list in &dictionary.user_lists {
        let const_ident = list_consts.unique(&list.name.to_shouty_snake_case());
        code.enumerations.push(define_enum(&mut enum_names, &const_ident, list));
        code.user_lists.push((const_ident.clone(), define_user_list(&const_ident, list)));
    }

    let mut record_consts = Idents::default();
    for record in &dictionary.records {
        let const_ident = record_consts.unique(&create_id(&record.ident));
        code.record_types.push((const_ident.clone(), define_record_type(&const_ident, record)));
    }

    code
}

fn define_user_list(ident: &Ident, list: &UserList) -> TokenStream {
    let name = &list.name;
    let datatype = &list.datatype;
    let entries = list.rows.iter().map(|row| {
        let ident = &row.ident;
        let value = row.value;
        let text = &row.text;
        quote!(crate::ListEntry { ident: #ident, value: #value, name: #text })
    });

    quote! {
        pub const #ident: crate::UserList = crate::UserList {
            name: #name,
            datatype: #datatype,
            entries: &[#(#entries,)*],
        };
    }
}

fn define_enum(names: &mut Idents, list_ident: &Ident, list: &UserList) -> TokenStream {
    let ident = names.unique(&list.name.to_camel_case());

    let mut variant_idents = Idents::default();
    let mut variant_defs = vec![];
    let mut from_value = vec![];
    let mut to_value = vec![];

    for row in &list.rows {
        let variant_ident = match variant_idents.try_insert(&row.ident.to_camel_case()) {
            Some(variant_ident) => variant_ident,
            None => variant_idents.unique(&format!("{}{}", row.ident.to_camel_case(), row.value)),
        };
        let value = Literal::u32_unsuffixed(row.value);

        variant_defs.push(quote!(#variant_ident = #value));
        from_value.push(quote!(#value => #ident::#variant_ident));
        to_value.push(quote!(#ident::#variant_ident => #value));
    }

    quote! {
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
        pub enum #ident {
            #(#variant_defs,)*
        }

        impl crate::PumpEnumeration for #ident {
            const LIST: &'static crate::UserList = &user_lists::#list_ident;

            fn from_value(value: u32) -> crate::Result<Self> {
                let result = match value {
                    #(#from_value,)*
                    other => return Err(crate::Error::InvalidVariant(other)),
                };

                Ok(result)
            }

            fn value(self) -> u32 {
                match self {
                    #(#to_value,)*
                }
            }
        }
    }
}

fn define_record_type(ident: &Ident, record: &RecordDefinition) -> TokenStream {
    let record_ident = &record.ident;
    let value = record.id;
    let name = &record.text;
    let max = record.maxrecs;
    let rectype = &record.rectype;
    let structure = &record.structure;
    let fields = &record.keys;

    quote! {
        pub const #ident: crate::RecordType = crate::RecordType {
            ident: #record_ident,
            value: #value,
            name: #name,
            max: #max,
            rectype: #rectype,
            structure: #structure,
            fields: &[#(#fields,)*],
        };
    }
}

/// Tracks the identifiers already defined within a single scope
#[derive(Default)]
struct Idents {
    seen: HashSet<String>,
}

impl Idents {
    /// Returns a valid identifier for `name`, or `None` if the identifier is already in use
    fn try_insert(&mut self, name: &str) -> Option<Ident> {
        let name = valid_ident(name);
        match self.seen.insert(name.clone()) {
            true => Some(Ident::new(&name, Span::call_site())),
            false => None,
        }
    }

    /// Returns a valid identifier for `name`, adding a numeric suffix if it is already in use
    fn unique(&mut self, name: &str) -> Ident {
        if let Some(ident) = self.try_insert(name) {
            return ident;
        }

        (2..)
            .find_map(|n| self.try_insert(&format!("{}_{}", name, n)))
            .unwrap_or_else(|| Ident::new("__unnamed", Span::call_site()))
    }
}

/// Identifiers that are keywords or start with a digit are prefixed with `_`. Names with nothing
/// but separators become `_Unnamed`.
fn valid_ident(name: &str) -> String {
    if name.chars().all(|c| c == '_') {
        return "_Unnamed".to_owned();
    }

    if syn::parse_str::<syn::Ident>(name).is_ok() {
        return name.to_owned();
    }

    let prefixed = format!("_{}", name);
    match syn::parse_str::<syn::Ident>(&prefixed) {
        Ok(_) => prefixed,
        Err(_) => format!("_{}", create_id(name)),
    }
}
