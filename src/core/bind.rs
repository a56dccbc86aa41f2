//! Typed binding of entry sets.
//!
//! Deserializes a loaded entry set onto any `serde::Deserialize` type. Struct
//! fields are matched to entry keys by [`KeyNaming`]; each value is parsed
//! with `FromStr` semantics for the field's type.
//!
//! ```text
//! KeyNaming::Env         api_key / apiKey  ->  API_KEY
//! KeyNaming::Properties  api_key / apiKey  ->  api.key
//! ```
//!
//! Map targets receive every entry under its original key. Sequences are
//! read from comma-separated values. Errors name the key and target type,
//! never the value.

use serde::de::{
    self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor,
};

use crate::core::domain::{Entries, Entry};
use crate::core::profile::SourceKind;
use crate::error::{BindError, Result};

/// How struct field names map to entry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyNaming {
    /// `UPPER_SNAKE_CASE`, as in `.env` files
    Env,
    /// `dotted.lower.case`, as in properties files
    Properties,
}

impl KeyNaming {
    /// Entry key for a struct field name.
    pub fn key_for(self, field: &str) -> String {
        let separator = match self {
            KeyNaming::Env => '_',
            KeyNaming::Properties => '.',
        };

        let mut key = String::with_capacity(field.len() + 4);
        let mut prev_lower = false;
        for ch in field.chars() {
            if matches!(ch, '_' | '-' | '.') {
                key.push(separator);
                prev_lower = false;
                continue;
            }
            if ch.is_uppercase() && prev_lower {
                key.push(separator);
            }
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            match self {
                KeyNaming::Env => key.extend(ch.to_uppercase()),
                KeyNaming::Properties => key.extend(ch.to_lowercase()),
            }
        }
        key
    }
}

impl From<SourceKind> for KeyNaming {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Env => KeyNaming::Env,
            SourceKind::Properties => KeyNaming::Properties,
        }
    }
}

/// Deserialize an entry set onto `T`.
///
/// # Errors
///
/// Returns `BindError::InvalidValue` if a value does not parse as its field's
/// type, or `BindError::Message` for missing fields and unsupported shapes.
pub fn from_entries<T: DeserializeOwned>(entries: &Entries, naming: KeyNaming) -> Result<T> {
    Ok(T::deserialize(EntriesDeserializer { entries, naming })?)
}

struct EntriesDeserializer<'a> {
    entries: &'a Entries,
    naming: KeyNaming,
}

impl<'de, 'a> de::Deserializer<'de> for EntriesDeserializer<'a> {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        self.deserialize_map(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        let items: Vec<_> = self.entries.iter().map(|e| (e.key.clone(), e)).collect();
        visitor.visit_map(EntryAccess::new(items))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        let items: Vec<_> = fields
            .iter()
            .filter_map(|field| {
                let key = self.naming.key_for(field);
                let entry = self.find(&key).or_else(|| self.find(field))?;
                Some((field.to_string(), entry))
            })
            .collect();
        visitor.visit_map(EntryAccess::new(items))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple tuple_struct enum
        identifier ignored_any
    }
}

impl<'a> EntriesDeserializer<'a> {
    fn find(&self, key: &str) -> Option<&'a Entry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Yields `(name, entry)` pairs as a serde map.
struct EntryAccess<'a> {
    items: std::vec::IntoIter<(String, &'a Entry)>,
    current: Option<&'a Entry>,
}

impl<'a> EntryAccess<'a> {
    fn new(items: Vec<(String, &'a Entry)>) -> Self {
        Self {
            items: items.into_iter(),
            current: None,
        }
    }
}

impl<'de, 'a> MapAccess<'de> for EntryAccess<'a> {
    type Error = BindError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> std::result::Result<Option<K::Value>, BindError> {
        match self.items.next() {
            Some((name, entry)) => {
                self.current = Some(entry);
                seed.deserialize(name.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> std::result::Result<V::Value, BindError> {
        let entry = self
            .current
            .take()
            .ok_or_else(|| BindError::Message("value requested before key".to_string()))?;
        seed.deserialize(ValueDeserializer {
            key: &entry.key,
            raw: &entry.value,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Parses one raw string value as whatever the visitor asks for.
struct ValueDeserializer<'a> {
    key: &'a str,
    raw: &'a str,
}

impl<'a> ValueDeserializer<'a> {
    fn parse<T: std::str::FromStr>(&self, ty: &'static str) -> std::result::Result<T, BindError> {
        self.raw.trim().parse().map_err(|_| self.invalid(ty))
    }

    fn invalid(&self, ty: &'static str) -> BindError {
        BindError::InvalidValue {
            key: self.key.to_string(),
            ty,
        }
    }
}

macro_rules! parse_scalar {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
                let value: $ty = self.parse(stringify!($ty))?;
                visitor.$visit(value)
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for ValueDeserializer<'a> {
    type Error = BindError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        visitor.visit_str(self.raw)
    }

    parse_scalar! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        match self.raw.trim().to_ascii_lowercase().as_str() {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            _ => Err(self.invalid("bool")),
        }
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        let mut chars = self.raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(self.invalid("char")),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        visitor.visit_str(self.raw)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        visitor.visit_string(self.raw.to_string())
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        visitor.visit_bytes(self.raw.as_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        visitor.visit_byte_buf(self.raw.as_bytes().to_vec())
    }

    // Empty values read as absent.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        if self.raw.trim().is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, BindError> {
        let parts: Vec<&str> = if self.raw.trim().is_empty() {
            Vec::new()
        } else {
            self.raw.split(',').map(str::trim).collect()
        };
        visitor.visit_seq(ListAccess {
            key: self.key,
            parts: parts.into_iter(),
        })
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> std::result::Result<V::Value, BindError> {
        Err(self.invalid("map"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        Err(self.invalid("struct"))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        let variant: de::value::StrDeserializer<'_, BindError> = self.raw.trim().into_deserializer();
        visitor.visit_enum(variant).map_err(|_| self.invalid(name))
    }

    fn deserialize_identifier<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        visitor.visit_str(self.raw)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> std::result::Result<V::Value, BindError> {
        visitor.visit_unit()
    }
}

/// Comma-separated list elements.
struct ListAccess<'a> {
    key: &'a str,
    parts: std::vec::IntoIter<&'a str>,
}

impl<'de, 'a> SeqAccess<'de> for ListAccess<'a> {
    type Error = BindError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> std::result::Result<Option<T::Value>, BindError> {
        match self.parts.next() {
            Some(raw) => seed
                .deserialize(ValueDeserializer { key: self.key, raw })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.parts.len())
    }
}
