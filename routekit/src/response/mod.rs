//! Response handling.
//!
//! A route's declared response type is a [`ResponseFormat`]: it names both
//! the parsing strategy and the value handed back to the caller.

mod format;

pub use format::{
    BinaryFormat, CsvFormat, EmptyFormat, HtmlFormat, JsonFormat, PlainTextFormat,
    ResponseFormat, XmlFormat, YamlFormat,
};
