//! Formatter registration entries produced by classification

use crate::core::{EnumType, ParameterDefinition, TypeDescriptor, GLOBAL_PREFIX};
use serde::Serialize;

const ARRAY_FORMATTER: &str = "global::MessagePack.Formatters.ArrayFormatter";
const ARGUMENT_TUPLE: &str = "global::MagicOnion.DynamicArgumentTuple";
const ARGUMENT_TUPLE_FORMATTER: &str = "global::MagicOnion.DynamicArgumentTupleFormatter";

/// A formatter instantiated from a generic formatter type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenericFormatterEntry {
    /// Qualified name of the formatted type; identity key
    pub full_name: String,
    /// Expression that constructs the formatter
    pub construct_expr: String,
}

impl GenericFormatterEntry {
    /// Entry for an array type, formatted element-wise
    pub fn array(element: &TypeDescriptor, array: &TypeDescriptor) -> Self {
        Self {
            full_name: array.qualified_name(),
            construct_expr: format!("new {ARRAY_FORMATTER}<{}>()", element.qualified_name()),
        }
    }

    /// Entry for the synthetic tuple that carries a multi-parameter request.
    ///
    /// The formatter constructor takes one `default(T)` per type parameter so
    /// the target compiler can infer the instantiation.
    pub fn argument_tuple(parameters: &[ParameterDefinition]) -> Self {
        let type_arguments: Vec<String> = parameters
            .iter()
            .map(|p| p.ty.qualified_name())
            .collect();
        let defaults: Vec<String> = type_arguments
            .iter()
            .map(|t| format!("default({t})"))
            .collect();
        let type_list = type_arguments.join(", ");

        Self {
            full_name: format!("{ARGUMENT_TUPLE}<{type_list}>"),
            construct_expr: format!(
                "new {ARGUMENT_TUPLE_FORMATTER}<{type_list}>({})",
                defaults.join(", ")
            ),
        }
    }
}

/// An enum that needs a generated formatter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumFormatterEntry {
    pub name: String,
    /// `None` when the enum lives in the global namespace
    pub namespace: Option<String>,
    /// Qualified name; identity key
    pub full_name: String,
    pub underlying_type: String,
}

impl EnumFormatterEntry {
    pub fn from_enum(enum_type: &EnumType) -> Self {
        Self {
            name: enum_type.name.clone(),
            namespace: enum_type.namespace.clone(),
            full_name: format!("{GLOBAL_PREFIX}{}", enum_type.full_name()),
            underlying_type: enum_type.underlying_type.clone(),
        }
    }

    /// Name of the generated formatter class
    pub fn formatter_name(&self) -> String {
        format!("{}Formatter", self.name)
    }

    /// Construction expression for the generated formatter living under
    /// `formatter_namespace`
    pub fn construct_expr(&self, formatter_namespace: &str) -> String {
        match &self.namespace {
            Some(ns) => format!(
                "new {GLOBAL_PREFIX}{formatter_namespace}.{ns}.{}()",
                self.formatter_name()
            ),
            None => format!(
                "new {GLOBAL_PREFIX}{formatter_namespace}.{}()",
                self.formatter_name()
            ),
        }
    }
}

/// Classification output before deduplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEntry {
    Generic(GenericFormatterEntry),
    Enum(EnumFormatterEntry),
}

impl RawEntry {
    pub fn full_name(&self) -> &str {
        match self {
            RawEntry::Generic(entry) => &entry.full_name,
            RawEntry::Enum(entry) => &entry.full_name,
        }
    }
}
