//! Writes a compiled dictionary as the JavaScript driver-defines module consumed by the pump
//! driver.

use std::fmt;

use crate::repr::{Dictionary, RecordDefinition, UserList};

const HEADER: &str = "/*
 * == BSD2 LICENSE ==
 * Copyright (c) 2015, Tidepool Project
 *
 * This program is free software; you can redistribute it and/or modify it under
 * the terms of the associated License, which is identical to the BSD 2-Clause
 * License as published by the Open Source Initiative at opensource.org.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the License for more details.
 *
 * You should have received a copy of the License along with this program; if
 * not, you can obtain one from Tidepool Project at tidepool.org.
 * == BSD2 LICENSE ==
 *
 * THIS IS A GENERATED FILE -- DO NOT EDIT
 * Regenerate it by using asante-gen.
 */
 'use strict';

 module.exports = {
";

/// The name of the module generated for `dictionary`
pub fn file_name(dictionary: &Dictionary) -> String {
    format!("asante_pump_version_{}.js", dictionary.version)
}

pub fn generate(dictionary: &Dictionary) -> String {
    JsModule(dictionary).to_string()
}

struct JsModule<'a>(&'a Dictionary);

impl fmt::Display for JsModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dictionary = self.0;

        f.write_str(HEADER)?;
        writeln!(f, "    pumpVersion: {},", dictionary.version)?;

        f.write_str("    userlist: {\n")?;
        for (i, list) in dictionary.user_lists.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            write_user_list(f, list)?;
        }
        f.write_str("\n    },\n")?;

        f.write_str("    recordTypes: {\n")?;
        for record in &dictionary.records {
            write_record(f, record)?;
        }
        f.write_str("\n    }\n")?;

        f.write_str("\n};\n")
    }
}

fn write_user_list(f: &mut fmt::Formatter, list: &UserList) -> fmt::Result {
    write!(f, "\n        {}: {{\n", list.name)?;
    for (i, row) in list.rows.iter().enumerate() {
        if i > 0 {
            f.write_str(",\n")?;
        }
        write!(
            f,
            "           {}: {{ value: {}, name: '{}'}}",
            row.ident,
            row.value,
            Quoted(&row.text)
        )?;
    }
    f.write_str("\n        }")
}

fn write_record(f: &mut fmt::Formatter, record: &RecordDefinition) -> fmt::Result {
    write!(f, "\n        {}: {{\n", record.ident)?;
    writeln!(f, "            value: {},", record.id)?;
    writeln!(f, "            name: '{}',", Quoted(&record.text))?;
    writeln!(f, "            max: {},", record.maxrecs)?;
    writeln!(f, "            type: '{}',", Quoted(&record.rectype))?;
    writeln!(f, "            struct: '{}',", Quoted(&record.structure))?;

    f.write_str("            fields: [\n")?;
    for (i, key) in record.keys.iter().enumerate() {
        if i > 0 {
            f.write_str(",\n")?;
        }
        write!(f, "                '{}'", Quoted(key))?;
    }
    f.write_str("\n            ]\n        },\n    ")
}

/// Escapes text for use inside a single quoted string
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\'' => f.write_str("\\'")?,
                c => fmt::Write::write_char(f, c)?,
            }
        }
        Ok(())
    }
}
