//! Type resolution module
//!
//! Classifies declared or inferred parameter types into flag categories, and
//! resolves textual type names through a static table

pub mod resolve;
pub mod spec;
pub mod value;

pub use resolve::{Classification, TypeTable, classify};
pub use spec::{ElementCategory, EnumType, Enumeration, Primitive, TypeCategory, TypeSpec};
pub use value::{EnumValue, Value};
