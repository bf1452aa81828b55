//! Contract manifests: YAML, JSON or TOML files describing resolved service
//! interfaces.
//!
//! ```yaml
//! services:
//!   - namespace: Chat.Shared
//!     name: IChatService
//!     methods:
//!       - name: Join
//!         response: { kind: enum, namespace: Chat.Shared, name: JoinResult, underlying: Byte }
//!         parameters:
//!           - { name: room, type: string }
//!           - { name: members, type: "Chat.Shared.Member[]" }
//! ```
//!
//! A type is either the structured form shown for `response`, or a shorthand
//! string: a keyword (`int`, `string`, ...) or dotted name, optionally ending
//! in `?` and/or any number of `[]`.

use crate::core::{Error, MethodDefinition, Result, ServiceInterfaceDefinition, TypeDescriptor};
use serde::Deserialize;
use std::path::Path;

const KEYWORD_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "short", "ushort", "string", "object", "void",
];

const DEFAULT_ENUM_UNDERLYING: &str = "Int32";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(ManifestFormat::Yaml),
            "json" => Some(ManifestFormat::Json),
            "toml" => Some(ManifestFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractManifest {
    #[serde(default)]
    pub services: Vec<InterfaceSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    #[default]
    Service,
    Hub,
    Receiver,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceSpec {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: InterfaceKind,
    /// Only include when this conditional symbol is defined
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default)]
    pub condition: Option<String>,
    pub response: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Shorthand(String),
    Spec(Box<TypeSpec>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSpec {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub type_arguments: Vec<TypeRef>,
    #[serde(default)]
    pub element: Option<TypeRef>,
    #[serde(default)]
    pub inner: Option<TypeRef>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub underlying: Option<String>,
}

/// Decode manifest text in the given format
pub fn parse_manifest(contents: &str, format: ManifestFormat, path: &Path) -> Result<ContractManifest> {
    let decoded = match format {
        ManifestFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        ManifestFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        ManifestFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
    };
    decoded.map_err(|message| Error::manifest(path, message))
}

impl ContractManifest {
    /// Convert to interface definitions, dropping anything guarded by a
    /// condition that is not in `symbols`
    pub fn into_definitions(
        self,
        symbols: &[String],
        path: &Path,
    ) -> Result<Vec<ServiceInterfaceDefinition>> {
        self.services
            .into_iter()
            .filter(|spec| condition_met(spec.condition.as_deref(), symbols, &spec.name))
            .map(|spec| spec.into_definition(symbols).map_err(|m| Error::manifest(path, m)))
            .collect()
    }
}

fn condition_met(condition: Option<&str>, symbols: &[String], what: &str) -> bool {
    match condition {
        None => true,
        Some(symbol) => {
            let defined = symbols.iter().any(|s| s == symbol);
            if !defined {
                log::debug!("Skipping {} (conditional symbol {} not defined)", what, symbol);
            }
            defined
        }
    }
}

impl InterfaceSpec {
    fn into_definition(self, symbols: &[String]) -> std::result::Result<ServiceInterfaceDefinition, String> {
        let interface_name = self.name.clone();
        let methods = self
            .methods
            .into_iter()
            .filter(|m| {
                let what = format!("{}.{}", interface_name, m.name);
                condition_met(m.condition.as_deref(), symbols, &what)
            })
            .map(|m| {
                let method_name = m.name.clone();
                m.into_method()
                    .map_err(|e| format!("{interface_name}.{method_name}: {e}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ServiceInterfaceDefinition {
            namespace: self.namespace.filter(|ns| !ns.is_empty()),
            name: self.name,
            is_service_definition: self.kind == InterfaceKind::Service,
            methods,
        })
    }
}

impl MethodSpec {
    fn into_method(self) -> std::result::Result<MethodDefinition, String> {
        let response = self
            .response
            .resolve()
            .map_err(|e| format!("response: {e}"))?;
        let mut method = MethodDefinition::new(self.name, response);
        for parameter in self.parameters {
            let ty = parameter
                .ty
                .resolve()
                .map_err(|e| format!("parameter `{}`: {e}", parameter.name))?;
            method = method.with_parameter(parameter.name, ty);
        }
        Ok(method)
    }
}

impl TypeRef {
    pub fn resolve(self) -> std::result::Result<TypeDescriptor, String> {
        match self {
            TypeRef::Shorthand(text) => parse_shorthand(&text),
            TypeRef::Spec(spec) => spec.resolve(),
        }
    }
}

impl TypeSpec {
    fn resolve(self) -> std::result::Result<TypeDescriptor, String> {
        let kind = self.kind.to_ascii_lowercase();
        match kind.as_str() {
            "primitive" => Ok(TypeDescriptor::primitive(required(self.name, "primitive")?)),
            "named" => {
                let name = qualify(self.namespace, required(self.name, "named")?);
                let type_arguments = self
                    .type_arguments
                    .into_iter()
                    .map(TypeRef::resolve)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::generic(name, type_arguments))
            }
            "nullable" => {
                let inner = self.inner.ok_or("nullable type requires `inner`")?;
                Ok(TypeDescriptor::nullable(inner.resolve()?))
            }
            "array" => {
                let element = self.element.ok_or("array type requires `element`")?;
                let rank = self.rank.unwrap_or(1);
                if rank == 0 {
                    return Err("array rank must be at least 1".to_string());
                }
                Ok(TypeDescriptor::Array {
                    element: Box::new(element.resolve()?),
                    rank,
                })
            }
            "enum" => {
                let underlying = match self.underlying {
                    Some(underlying) => enum_storage_type(&underlying)?,
                    None => DEFAULT_ENUM_UNDERLYING.to_string(),
                };
                Ok(TypeDescriptor::enumeration(
                    self.namespace.as_deref().filter(|ns| !ns.is_empty()),
                    required(self.name, "enum")?,
                    underlying,
                ))
            }
            _ => {
                let full_name = match self.name {
                    Some(name) => qualify(self.namespace, name),
                    None => self.kind.clone(),
                };
                Ok(TypeDescriptor::Unknown {
                    type_kind: self.kind,
                    full_name,
                })
            }
        }
    }
}

/// Storage type name for an enum's underlying type. Keyword and `System.`
/// spellings are accepted; anything that is not an integer type is rejected.
pub fn enum_storage_type(underlying: &str) -> std::result::Result<String, String> {
    let name = underlying.trim();
    let name = name.strip_prefix("System.").unwrap_or(name);
    let storage = match name {
        "byte" | "Byte" => "Byte",
        "sbyte" | "SByte" => "SByte",
        "short" | "Int16" => "Int16",
        "ushort" | "UInt16" => "UInt16",
        "int" | "Int32" => "Int32",
        "uint" | "UInt32" => "UInt32",
        "long" | "Int64" => "Int64",
        "ulong" | "UInt64" => "UInt64",
        _ => return Err(format!("`{underlying}` is not an integral enum storage type")),
    };
    Ok(storage.to_string())
}

fn required(value: Option<String>, kind: &str) -> std::result::Result<String, String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{kind} type requires `name`"))
}

fn qualify(namespace: Option<String>, name: String) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
        _ => name,
    }
}

/// Parse the shorthand form: `int`, `Chat.Shared.Item[]`, `System.Guid?`,
/// `long[][]`
pub fn parse_shorthand(text: &str) -> std::result::Result<TypeDescriptor, String> {
    let text = text.trim();
    if text.contains('<') || text.contains('>') || text.contains(',') {
        return Err(format!(
            "`{text}`: generic and multi-dimensional types need the structured form"
        ));
    }

    if let Some(element) = text.strip_suffix("[]") {
        return Ok(TypeDescriptor::array_of(parse_shorthand(element)?));
    }
    if let Some(inner) = text.strip_suffix('?') {
        return Ok(TypeDescriptor::nullable(parse_shorthand(inner)?));
    }
    if text.is_empty() || text.contains(char::is_whitespace) {
        return Err(format!("`{text}` is not a type name"));
    }

    if KEYWORD_TYPES.contains(&text) {
        Ok(TypeDescriptor::primitive(text))
    } else {
        Ok(TypeDescriptor::named(text))
    }
}
