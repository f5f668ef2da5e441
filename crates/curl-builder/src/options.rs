//! Option model: an ordered multimap of flag -> argument slots
//!
//! User input comes in several shapes (bare flags, flag -> scalar, flag ->
//! list, or a mix). All of them normalize into [`Options`], a flat list of
//! slots kept in insertion order. Adding a flag twice yields two slots.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::quote::{QuoteStyle, quote};

/// One occurrence of a flag with its argument (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub flag: String,
    pub argument: Option<String>,
}

impl Slot {
    pub fn new(flag: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            flag: flag.into(),
            argument,
        }
    }

    /// Render as `flag` or `flag <quoted argument>`.
    pub fn render(&self, style: QuoteStyle) -> String {
        match &self.argument {
            Some(argument) => format!("{} {}", self.flag, quote(argument, style)),
            None => self.flag.clone(),
        }
    }
}

/// Ordered multimap of command line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    slots: Vec<Slot>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize option input into slots.
    ///
    /// Fails without partial results if any entry is malformed.
    pub fn normalize<I, E>(input: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<OptionEntry>,
    {
        let mut options = Self::new();
        for entry in input {
            entry.into().normalize_into(&mut options.slots)?;
        }
        Ok(options)
    }

    /// Append one slot, never overwriting earlier slots of the same flag.
    pub fn push(&mut self, flag: impl Into<String>, argument: Option<String>) {
        self.slots.push(Slot::new(flag, argument));
    }

    /// Append every slot of `other` in order.
    pub fn extend(&mut self, other: Options) {
        self.slots.extend(other.slots);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Arguments recorded for `flag`, one entry per slot.
    pub fn get(&self, flag: &str) -> Vec<Option<&str>> {
        self.slots
            .iter()
            .filter(|slot| slot.flag == flag)
            .map(|slot| slot.argument.as_deref())
            .collect()
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.slots.iter().any(|slot| slot.flag == flag)
    }

    /// Per-flag view, flags ordered by first appearance.
    pub fn grouped(&self) -> IndexMap<&str, Vec<Option<&str>>> {
        let mut grouped: IndexMap<&str, Vec<Option<&str>>> = IndexMap::new();
        for slot in &self.slots {
            grouped
                .entry(slot.flag.as_str())
                .or_default()
                .push(slot.argument.as_deref());
        }
        grouped
    }

    /// Render all slots separated by single spaces.
    pub fn render(&self, style: QuoteStyle) -> String {
        self.slots
            .iter()
            .map(|slot| slot.render(style))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Value attached to a keyed option entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Flag without argument (null)
    Absent,
    /// Single argument
    Value(String),
    /// One slot per element
    List(Vec<Option<String>>),
}

/// One entry of option input.
///
/// `Keyed` entries whose key does not start with `-` are positional: the
/// value is the flag name, as produced by sequences stored under integer keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionEntry {
    Flag(String),
    Keyed(String, OptionValue),
}

impl OptionEntry {
    pub fn flag(flag: impl Into<String>) -> Self {
        Self::Flag(flag.into())
    }

    pub fn keyed(key: impl Into<String>, value: OptionValue) -> Self {
        Self::Keyed(key.into(), value)
    }

    fn normalize_into(self, slots: &mut Vec<Slot>) -> Result<()> {
        match self {
            OptionEntry::Flag(flag) => slots.push(Slot::new(flag, None)),
            OptionEntry::Keyed(key, value) if key.starts_with('-') => match value {
                OptionValue::Absent => slots.push(Slot::new(key, None)),
                OptionValue::Value(argument) => slots.push(Slot::new(key, Some(argument))),
                OptionValue::List(arguments) => {
                    slots.extend(arguments.into_iter().map(|arg| Slot::new(key.clone(), arg)))
                }
            },
            OptionEntry::Keyed(_, OptionValue::Value(flag)) => slots.push(Slot::new(flag, None)),
            OptionEntry::Keyed(key, _) => {
                return Err(Error::invalid_option(format!(
                    "positional entry '{key}' must hold a flag name"
                )));
            }
        }
        Ok(())
    }
}

impl From<&str> for OptionEntry {
    fn from(flag: &str) -> Self {
        Self::Flag(flag.to_string())
    }
}

impl From<String> for OptionEntry {
    fn from(flag: String) -> Self {
        Self::Flag(flag)
    }
}

impl From<(&str, &str)> for OptionEntry {
    fn from((flag, argument): (&str, &str)) -> Self {
        Self::Keyed(flag.to_string(), OptionValue::Value(argument.to_string()))
    }
}

impl From<(String, String)> for OptionEntry {
    fn from((flag, argument): (String, String)) -> Self {
        Self::Keyed(flag, OptionValue::Value(argument))
    }
}

impl From<(&str, Option<&str>)> for OptionEntry {
    fn from((flag, argument): (&str, Option<&str>)) -> Self {
        let value = match argument {
            Some(argument) => OptionValue::Value(argument.to_string()),
            None => OptionValue::Absent,
        };
        Self::Keyed(flag.to_string(), value)
    }
}

impl From<(&str, Vec<Option<&str>>)> for OptionEntry {
    fn from((flag, arguments): (&str, Vec<Option<&str>>)) -> Self {
        let arguments = arguments
            .into_iter()
            .map(|arg| arg.map(str::to_string))
            .collect();
        Self::Keyed(flag.to_string(), OptionValue::List(arguments))
    }
}

/// Option input decoded from JSON.
///
/// Accepts an array of flag strings and/or objects, or a single object
/// mapping flags to `null`, a scalar, or an array of scalars/nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsInput(Vec<OptionEntry>);

impl OptionsInput {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    fn push_object(&mut self, map: serde_json::Map<String, Value>) -> Result<()> {
        for (key, value) in map {
            let value = match value {
                Value::Null => OptionValue::Absent,
                Value::Array(items) => OptionValue::List(
                    items
                        .into_iter()
                        .map(|item| json_scalar(&key, item))
                        .collect::<Result<_>>()?,
                ),
                other => match json_scalar(&key, other)? {
                    Some(argument) => OptionValue::Value(argument),
                    None => OptionValue::Absent,
                },
            };
            self.0.push(OptionEntry::Keyed(key, value));
        }
        Ok(())
    }
}

impl TryFrom<Value> for OptionsInput {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let mut input = Self::default();
        match value {
            Value::Object(map) => input.push_object(map)?,
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(flag) => input.0.push(OptionEntry::Flag(flag)),
                        Value::Object(map) => input.push_object(map)?,
                        other => {
                            return Err(Error::invalid_option(format!(
                                "expected a flag or an object, found {other}"
                            )));
                        }
                    }
                }
            }
            Value::String(flag) => input.0.push(OptionEntry::Flag(flag)),
            other => {
                return Err(Error::invalid_option(format!(
                    "expected an array or an object, found {other}"
                )));
            }
        }
        Ok(input)
    }
}

impl IntoIterator for OptionsInput {
    type Item = OptionEntry;
    type IntoIter = std::vec::IntoIter<OptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<OptionEntry> for OptionsInput {
    fn from_iter<T: IntoIterator<Item = OptionEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn json_scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::invalid_option(format!(
            "nested value for '{key}' is not a scalar"
        ))),
    }
}
