//! Final emission order.
//!
//! A run produces, in this order: one registration block listing the service
//! definitions as discovered, one resolver table over every distinct entry,
//! one enum formatter block per enum namespace, and one interface block per
//! definition namespace. Namespace groups are sorted ascending with the
//! global namespace first; members keep their discovery order.

use crate::core::ServiceInterfaceDefinition;
use crate::resolver::{EnumFormatterEntry, ResolverEntries};
use serde::Serialize;
use std::collections::BTreeMap;

/// Naming knobs that shape the generated blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmitOptions {
    pub namespace_root: String,
    pub resolver_name: String,
    pub unuse_unity_attribute: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace_root: "MagicOnion".to_string(),
            resolver_name: "MagicOnionResolver".to_string(),
            unuse_unity_attribute: false,
        }
    }
}

impl EmitOptions {
    pub fn resolvers_namespace(&self) -> String {
        format!("{}.Resolvers", self.namespace_root)
    }

    pub fn formatters_namespace(&self) -> String {
        format!("{}.Formatters", self.namespace_root)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Registration(RegistrationBlock),
    Resolver(ResolverBlock),
    EnumFormatters(EnumFormatterBlock),
    Interfaces(InterfaceBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationBlock {
    pub namespace: String,
    pub services: Vec<ServiceInterfaceDefinition>,
    pub unuse_unity_attribute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverBlock {
    pub namespace: String,
    pub formatter_namespace: String,
    pub resolver_name: String,
    pub registrations: Vec<ResolverRegistration>,
}

/// One row of the resolver lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverRegistration {
    pub full_name: String,
    pub construct_expr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumFormatterBlock {
    /// Namespace of the enums, `None` for the global namespace
    pub namespace: Option<String>,
    pub formatter_namespace: String,
    pub entries: Vec<EnumFormatterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceBlock {
    pub namespace: Option<String>,
    pub interfaces: Vec<ServiceInterfaceDefinition>,
}

/// Group items by namespace. Groups come out sorted with `None` first and
/// members keep their input order.
pub fn group_by_namespace<T, F>(items: &[T], namespace: F) -> BTreeMap<Option<String>, Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> Option<&String>,
{
    let mut groups: BTreeMap<Option<String>, Vec<T>> = BTreeMap::new();
    for item in items {
        groups
            .entry(namespace(item).cloned())
            .or_default()
            .push(item.clone());
    }
    groups
}

pub fn registration_block(
    definitions: &[ServiceInterfaceDefinition],
    options: &EmitOptions,
) -> RegistrationBlock {
    RegistrationBlock {
        namespace: options.namespace_root.clone(),
        services: definitions
            .iter()
            .filter(|d| d.is_service_definition)
            .cloned()
            .collect(),
        unuse_unity_attribute: options.unuse_unity_attribute,
    }
}

/// Generic entries sorted by full name, followed by enum entries sorted by
/// full name
pub fn resolver_block(entries: &ResolverEntries, options: &EmitOptions) -> ResolverBlock {
    let formatter_namespace = options.formatters_namespace();

    let generic = entries
        .sorted_generic()
        .into_iter()
        .map(|e| ResolverRegistration {
            full_name: e.full_name,
            construct_expr: e.construct_expr,
        });
    let enums = entries
        .sorted_enums()
        .into_iter()
        .map(|e| ResolverRegistration {
            construct_expr: e.construct_expr(&formatter_namespace),
            full_name: e.full_name,
        });

    let registrations: Vec<ResolverRegistration> = generic.chain(enums).collect();

    ResolverBlock {
        namespace: options.resolvers_namespace(),
        formatter_namespace,
        resolver_name: options.resolver_name.clone(),
        registrations,
    }
}

pub fn enum_blocks(entries: &ResolverEntries, options: &EmitOptions) -> Vec<EnumFormatterBlock> {
    let in_discovery_order: Vec<EnumFormatterEntry> = entries.enums.iter().cloned().collect();
    let formatter_namespace = options.formatters_namespace();

    group_by_namespace(&in_discovery_order, |e| e.namespace.as_ref())
        .into_iter()
        .map(|(namespace, entries)| EnumFormatterBlock {
            namespace,
            formatter_namespace: formatter_namespace.clone(),
            entries,
        })
        .collect()
}

pub fn interface_blocks(definitions: &[ServiceInterfaceDefinition]) -> Vec<InterfaceBlock> {
    group_by_namespace(definitions, |d| d.namespace.as_ref())
        .into_iter()
        .map(|(namespace, interfaces)| InterfaceBlock {
            namespace,
            interfaces,
        })
        .collect()
}

/// Full block sequence for one run
pub fn plan_blocks(
    definitions: &[ServiceInterfaceDefinition],
    entries: &ResolverEntries,
    options: &EmitOptions,
) -> Vec<Block> {
    let mut blocks = vec![
        Block::Registration(registration_block(definitions, options)),
        Block::Resolver(resolver_block(entries, options)),
    ];
    blocks.extend(
        enum_blocks(entries, options)
            .into_iter()
            .map(Block::EnumFormatters),
    );
    blocks.extend(interface_blocks(definitions).into_iter().map(Block::Interfaces));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MethodDefinition, TypeDescriptor};
    use crate::resolver::collect_entries;
    use pretty_assertions::assert_eq;

    fn enum_method(ns: Option<&str>, name: &str) -> MethodDefinition {
        MethodDefinition::new("Get", TypeDescriptor::enumeration(ns, name, "Int32"))
    }

    fn definitions() -> Vec<ServiceInterfaceDefinition> {
        vec![
            ServiceInterfaceDefinition::new(Some("Zoo"), "IZooService", true)
                .with_method(enum_method(Some("Zoo"), "Animal"))
                .with_method(enum_method(Some("Zoo"), "Cage")),
            ServiceInterfaceDefinition::new(Some("Alpha"), "IAlphaReceiver", false)
                .with_method(enum_method(None, "Mood")),
            ServiceInterfaceDefinition::new(None, "IPing", true).with_method(
                MethodDefinition::new("Ping", TypeDescriptor::primitive("void")).with_parameter(
                    "items",
                    TypeDescriptor::array_of(TypeDescriptor::named("Zoo.Feed")),
                ),
            ),
            ServiceInterfaceDefinition::new(Some("Zoo"), "IKeeperService", true)
                .with_method(enum_method(Some("Zoo"), "Animal")),
        ]
    }

    #[test]
    fn test_registration_keeps_discovery_order() {
        let block = registration_block(&definitions(), &EmitOptions::default());
        let names: Vec<_> = block.services.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["IZooService", "IPing", "IKeeperService"]);
        assert_eq!(block.namespace, "MagicOnion");
    }

    #[test]
    fn test_resolver_orders_generic_before_enums() {
        let defs = definitions();
        let entries = collect_entries(&defs, false);
        let block = resolver_block(&entries, &EmitOptions::default());

        let names: Vec<_> = block
            .registrations
            .iter()
            .map(|r| r.full_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "global::Zoo.Feed[]",
                "global::Mood",
                "global::Zoo.Animal",
                "global::Zoo.Cage",
            ]
        );
        assert_eq!(block.namespace, "MagicOnion.Resolvers");
        assert_eq!(block.formatter_namespace, "MagicOnion.Formatters");
        assert_eq!(
            block.registrations[1].construct_expr,
            "new global::MagicOnion.Formatters.MoodFormatter()"
        );
    }

    #[test]
    fn test_enum_groups_sorted_with_global_first() {
        let defs = definitions();
        let entries = collect_entries(&defs, false);
        let blocks = enum_blocks(&entries, &EmitOptions::default());

        let layout: Vec<(Option<&str>, Vec<&str>)> = blocks
            .iter()
            .map(|b| {
                (
                    b.namespace.as_deref(),
                    b.entries.iter().map(|e| e.name.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            layout,
            vec![(None, vec!["Mood"]), (Some("Zoo"), vec!["Animal", "Cage"])]
        );
    }

    #[test]
    fn test_interface_groups() {
        let blocks = interface_blocks(&definitions());
        let layout: Vec<(Option<&str>, Vec<&str>)> = blocks
            .iter()
            .map(|b| {
                (
                    b.namespace.as_deref(),
                    b.interfaces.iter().map(|d| d.name.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            layout,
            vec![
                (None, vec!["IPing"]),
                (Some("Alpha"), vec!["IAlphaReceiver"]),
                (Some("Zoo"), vec!["IZooService", "IKeeperService"]),
            ]
        );
    }

    #[test]
    fn test_empty_run_still_has_resolver() {
        let blocks = plan_blocks(&[], &ResolverEntries::default(), &EmitOptions::default());
        assert_eq!(blocks.len(), 2);
        match &blocks[1] {
            Block::Resolver(resolver) => assert!(resolver.registrations.is_empty()),
            other => panic!("expected resolver block, got {other:?}"),
        }
    }

    #[test]
    fn test_namespaces_sort_by_byte_order() {
        let definitions = vec![
            ServiceInterfaceDefinition::new(Some("alpha"), "ILower", true),
            ServiceInterfaceDefinition::new(Some("Zoo"), "IUpper", true),
            ServiceInterfaceDefinition::new(Some("Beta"), "IMiddle", true),
        ];
        let order: Vec<_> = interface_blocks(&definitions)
            .into_iter()
            .map(|b| b.namespace.unwrap())
            .collect();
        assert_eq!(order, vec!["Beta", "Zoo", "alpha"]);
    }
}
