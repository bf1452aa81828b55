//! Formatter resolution: which types need a generated formatter and how each
//! one is constructed.

pub mod aggregate;
pub mod classifier;
pub mod embedded;
pub mod entries;

pub use aggregate::{aggregate, collect_entries, EntrySet, ResolverEntries};
pub use classifier::classify;
pub use embedded::is_embedded;
pub use entries::{EnumFormatterEntry, GenericFormatterEntry, RawEntry};
