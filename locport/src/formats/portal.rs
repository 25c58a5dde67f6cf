//! Support for portal JSON files: one flat object mapping keys to text.

use std::io::{BufRead, Write};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    error::Error,
    traits::Parser,
    types::{Decoded, LocalizationTable},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub table: LocalizationTable,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let object: IndexMap<String, Value> = serde_json::from_reader(reader)?;

        let mut table = LocalizationTable::new();
        for (key, value) in object {
            match value {
                Value::String(text) => {
                    table.insert(key, text);
                }
                other => {
                    return Err(Error::InvalidResource(format!(
                        "portal value for `{}` must be a string, found {}",
                        key,
                        kind(&other)
                    )));
                }
            }
        }

        Ok(Format { table })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer(&mut writer, &self.table)?;
        writer.flush()?;
        Ok(())
    }
}

impl From<Format> for Decoded {
    fn from(value: Format) -> Self {
        Decoded::from(value.table)
    }
}

impl From<&LocalizationTable> for Format {
    fn from(table: &LocalizationTable) -> Self {
        Format {
            table: table.clone(),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
