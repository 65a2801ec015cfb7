//! Map a declared type name to the relation that stores it.

/// The relation backing a type is the type name, lower-cased.
///
/// There is no pluralisation, so `User` and `user` both map to `user`.
pub fn derive_table_name(type_name: &str) -> String {
    type_name.to_lowercase()
}
