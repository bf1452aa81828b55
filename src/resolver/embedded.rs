//! Types the serializer already ships formatters for.
//!
//! Membership is an exact match on the display name; there is no
//! normalization and no subtyping.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const EMBEDDED_TYPE_NAMES: &[&str] = &[
    "short",
    "int",
    "long",
    "ushort",
    "uint",
    "ulong",
    "float",
    "double",
    "bool",
    "byte",
    "sbyte",
    "decimal",
    "char",
    "string",
    "System.Guid",
    "System.TimeSpan",
    "System.DateTime",
    "System.DateTimeOffset",
    "MessagePack.Nil",
    // arrays
    "short[]",
    "int[]",
    "long[]",
    "ushort[]",
    "uint[]",
    "ulong[]",
    "float[]",
    "double[]",
    "bool[]",
    "byte[]",
    "sbyte[]",
    "decimal[]",
    "char[]",
    "string[]",
    "System.DateTime[]",
    "System.ArraySegment<byte>",
    "System.ArraySegment<byte>?",
    // extensions
    "UnityEngine.Vector2",
    "UnityEngine.Vector3",
    "UnityEngine.Vector4",
    "UnityEngine.Quaternion",
    "UnityEngine.Color",
    "UnityEngine.Bounds",
    "UnityEngine.Rect",
    "System.Reactive.Unit",
];

static EMBEDDED_TYPES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| EMBEDDED_TYPE_NAMES.iter().copied().collect());

/// Whether `display_name` has a built-in formatter
pub fn is_embedded(display_name: &str) -> bool {
    EMBEDDED_TYPES.contains(display_name)
}
