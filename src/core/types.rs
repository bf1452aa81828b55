//! Contract model shared by the symbol provider, the resolver passes and the renderer

use serde::Serialize;

/// Prefix that pins a type name to the root namespace in generated code
pub const GLOBAL_PREFIX: &str = "global::";

/// An RPC interface as reported by a symbol provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInterfaceDefinition {
    /// Containing namespace, `None` for the global namespace
    pub namespace: Option<String>,
    pub name: String,
    /// Unary service contract (as opposed to a streaming or receiver contract)
    pub is_service_definition: bool,
    pub methods: Vec<MethodDefinition>,
}

impl ServiceInterfaceDefinition {
    pub fn new(namespace: Option<&str>, name: impl Into<String>, is_service: bool) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            is_service_definition: is_service,
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Namespace-qualified interface name, e.g. `global::Chat.Shared.IChatService`
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{GLOBAL_PREFIX}{ns}.{}", self.name),
            None => format!("{GLOBAL_PREFIX}{}", self.name),
        }
    }
}

/// A single remotely callable method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDefinition {
    pub name: String,
    /// Payload type after unwrapping any async/result envelope
    pub response_type: TypeDescriptor,
    pub parameters: Vec<ParameterDefinition>,
}

impl MethodDefinition {
    pub fn new(name: impl Into<String>, response_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            response_type,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterDefinition {
            name: name.into(),
            ty,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

/// Enum type details carried through to the generated formatter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumType {
    pub name: String,
    pub namespace: Option<String>,
    /// Storage type name used by the binary writer (`Int32`, `Byte`, ...)
    pub underlying_type: String,
}

impl EnumType {
    /// Dotted name without the global prefix
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Resolved type shape.
///
/// Every descriptor has two spellings: the *display name* (`int[]`,
/// `Chat.Shared.Item[]`) which is what the embedded type set is keyed on, and
/// the *qualified name* (`int[]`, `global::Chat.Shared.Item[]`) which is what
/// generated code and entry identity use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Language keyword type (`int`, `string`, `void`)
    Primitive { name: String },
    /// Named class or struct, optionally generic
    Named {
        full_name: String,
        type_arguments: Vec<TypeDescriptor>,
    },
    Nullable { inner: Box<TypeDescriptor> },
    Array {
        element: Box<TypeDescriptor>,
        rank: u32,
    },
    Enum(EnumType),
    /// A kind the symbol provider reported but the generator has no rule for
    Unknown { type_kind: String, full_name: String },
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive { name: name.into() }
    }

    pub fn named(full_name: impl Into<String>) -> Self {
        Self::Named {
            full_name: full_name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(full_name: impl Into<String>, type_arguments: Vec<TypeDescriptor>) -> Self {
        Self::Named {
            full_name: full_name.into(),
            type_arguments,
        }
    }

    pub fn nullable(inner: TypeDescriptor) -> Self {
        Self::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn enumeration(
        namespace: Option<&str>,
        name: impl Into<String>,
        underlying_type: impl Into<String>,
    ) -> Self {
        Self::Enum(EnumType {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            underlying_type: underlying_type.into(),
        })
    }

    pub fn display_name(&self) -> String {
        self.spell(false)
    }

    pub fn qualified_name(&self) -> String {
        self.spell(true)
    }

    fn spell(&self, qualify: bool) -> String {
        let prefix = if qualify { GLOBAL_PREFIX } else { "" };
        match self {
            TypeDescriptor::Primitive { name } => name.clone(),
            TypeDescriptor::Named {
                full_name,
                type_arguments,
            } => {
                if type_arguments.is_empty() {
                    format!("{prefix}{full_name}")
                } else {
                    let args: Vec<String> =
                        type_arguments.iter().map(|arg| arg.spell(qualify)).collect();
                    format!("{prefix}{full_name}<{}>", args.join(", "))
                }
            }
            TypeDescriptor::Nullable { inner } => format!("{}?", inner.spell(qualify)),
            TypeDescriptor::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                format!("{}[{commas}]", element.spell(qualify))
            }
            TypeDescriptor::Enum(enum_type) => format!("{prefix}{}", enum_type.full_name()),
            TypeDescriptor::Unknown { full_name, .. } => format!("{prefix}{full_name}"),
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}
