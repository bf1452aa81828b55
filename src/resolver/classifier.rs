//! Decides which formatter registrations a single method needs.
//!
//! Classification runs in two stages. The response type is inspected first;
//! an embedded array response ends classification for the whole method,
//! while a custom array or an enum response emits an entry and falls through.
//! The parameters are inspected second, at most once per method.

use super::embedded::is_embedded;
use super::entries::{EnumFormatterEntry, GenericFormatterEntry, RawEntry};
use crate::core::{MethodDefinition, ParameterDefinition, TypeDescriptor};

/// Result of inspecting the response type
enum ResponseOutcome {
    /// Embedded array response: the method contributes nothing at all
    Stop,
    /// Continue to the parameters, carrying what the response produced
    Continue(Option<RawEntry>),
}

/// Formatter entries required by `method`, in discovery order
pub fn classify(method: &MethodDefinition) -> Vec<RawEntry> {
    let mut entries = Vec::new();

    match classify_response(&method.response_type) {
        ResponseOutcome::Stop => return entries,
        ResponseOutcome::Continue(entry) => entries.extend(entry),
    }

    entries.extend(classify_parameters(&method.parameters));
    entries
}

fn classify_response(response: &TypeDescriptor) -> ResponseOutcome {
    match response {
        TypeDescriptor::Array { element, .. } => {
            if is_embedded(&response.display_name()) {
                return ResponseOutcome::Stop;
            }
            ResponseOutcome::Continue(Some(array_entry(element, response)))
        }
        TypeDescriptor::Enum(enum_type) => ResponseOutcome::Continue(Some(RawEntry::Enum(
            EnumFormatterEntry::from_enum(enum_type),
        ))),
        _ => ResponseOutcome::Continue(None),
    }
}

fn classify_parameters(parameters: &[ParameterDefinition]) -> Option<RawEntry> {
    match parameters {
        [] => None,
        [single] => match &single.ty {
            TypeDescriptor::Array { element, .. } => {
                if is_embedded(&single.ty.display_name()) {
                    None
                } else {
                    Some(array_entry(element, &single.ty))
                }
            }
            TypeDescriptor::Enum(enum_type) => {
                Some(RawEntry::Enum(EnumFormatterEntry::from_enum(enum_type)))
            }
            _ => None,
        },
        // the tuple type is signature specific, so it never has a built-in formatter
        many => Some(RawEntry::Generic(GenericFormatterEntry::argument_tuple(
            many,
        ))),
    }
}

fn array_entry(element: &TypeDescriptor, array: &TypeDescriptor) -> RawEntry {
    RawEntry::Generic(GenericFormatterEntry::array(element, array))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn custom_array() -> TypeDescriptor {
        TypeDescriptor::array_of(TypeDescriptor::named("CustomType"))
    }

    fn custom_enum() -> TypeDescriptor {
        TypeDescriptor::enumeration(None, "CustomEnum", "Int32")
    }

    fn names(entries: &[RawEntry]) -> Vec<&str> {
        entries.iter().map(RawEntry::full_name).collect()
    }

    #[test]
    fn test_embedded_array_response_skips_parameters() {
        // Preserved behavior: the embedded-array response check also
        // suppresses parameter inspection, unlike the enum branch. Nothing
        // available explains the asymmetry, so it is kept as observed.
        let method = MethodDefinition::new(
            "Foo",
            TypeDescriptor::array_of(TypeDescriptor::primitive("int")),
        )
        .with_parameter("x", custom_array());

        assert!(classify(&method).is_empty());
    }

    #[test]
    fn test_embedded_array_response_skips_tuple_too() {
        let method = MethodDefinition::new(
            "Foo",
            TypeDescriptor::array_of(TypeDescriptor::primitive("string")),
        )
        .with_parameter("a", TypeDescriptor::primitive("int"))
        .with_parameter("b", TypeDescriptor::primitive("int"));

        assert!(classify(&method).is_empty());
    }

    #[test]
    fn test_enum_response_with_multiple_parameters() {
        let method = MethodDefinition::new("Bar", custom_enum())
            .with_parameter("a", TypeDescriptor::primitive("string"))
            .with_parameter("b", TypeDescriptor::primitive("int"));

        assert_eq!(
            names(&classify(&method)),
            vec![
                "global::CustomEnum",
                "global::MagicOnion.DynamicArgumentTuple<string, int>"
            ]
        );
    }

    #[test]
    fn test_single_custom_array_parameter() {
        let method = MethodDefinition::new("Baz", TypeDescriptor::primitive("void"))
            .with_parameter("item", custom_array());

        let entries = classify(&method);
        assert_eq!(names(&entries), vec!["global::CustomType[]"]);
        assert!(matches!(entries[0], RawEntry::Generic(_)));
    }

    #[test]
    fn test_custom_array_response_falls_through_to_parameters() {
        let method = MethodDefinition::new("Items", custom_array())
            .with_parameter("mood", custom_enum());

        assert_eq!(
            names(&classify(&method)),
            vec!["global::CustomType[]", "global::CustomEnum"]
        );
    }

    #[test]
    fn test_single_embedded_array_parameter_is_skipped() {
        let method = MethodDefinition::new("Upload", custom_enum())
            .with_parameter("data", TypeDescriptor::array_of(TypeDescriptor::primitive("byte")));

        assert_eq!(names(&classify(&method)), vec!["global::CustomEnum"]);
    }

    #[test]
    fn test_single_plain_parameter_emits_nothing() {
        let method = MethodDefinition::new("Echo", TypeDescriptor::primitive("string"))
            .with_parameter("value", TypeDescriptor::named("Chat.Shared.Message"));

        assert!(classify(&method).is_empty());
    }

    #[test]
    fn test_tuple_emitted_even_when_all_parameters_embedded() {
        let method = MethodDefinition::new("Sum", TypeDescriptor::primitive("int"))
            .with_parameter("x", TypeDescriptor::primitive("int"))
            .with_parameter("y", TypeDescriptor::primitive("int"))
            .with_parameter("z", TypeDescriptor::array_of(TypeDescriptor::primitive("int")));

        assert_eq!(
            names(&classify(&method)),
            vec!["global::MagicOnion.DynamicArgumentTuple<int, int, int[]>"]
        );
    }

    #[test]
    fn test_no_parameters_no_entries() {
        let method = MethodDefinition::new("Ping", TypeDescriptor::named("MessagePack.Nil"));
        assert!(classify(&method).is_empty());
    }

    #[test]
    fn test_unknown_kind_falls_through() {
        let method = MethodDefinition::new(
            "Stream",
            TypeDescriptor::Unknown {
                type_kind: "pointer".into(),
                full_name: "Native.Handle".into(),
            },
        )
        .with_parameter("mood", custom_enum());

        assert_eq!(names(&classify(&method)), vec!["global::CustomEnum"]);
    }
}
