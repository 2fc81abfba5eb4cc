//! Wrapped-type resolution for optional declarations.
//!
//! The wrapped type of an optional declaration is not always statically
//! recoverable — a raw `Optional` declaration binds no type argument. Both
//! adapters share the policy implemented here: exactly one resolvable
//! argument means that argument, anything else falls back to `String` (or a
//! caller-supplied type).

use lumen_marshal::EntityType;

/// Returns the descriptor of the wrapped type of an optional declaration,
/// falling back to `String` when no single type argument is resolvable.
#[must_use]
pub fn wrapped_type(declared: &EntityType) -> EntityType {
    wrapped_type_or(declared, &EntityType::of::<String>())
}

/// Returns the descriptor of the wrapped type of an optional declaration,
/// falling back to `fallback` when no single type argument is resolvable.
#[must_use]
pub fn wrapped_type_or(declared: &EntityType, fallback: &EntityType) -> EntityType {
    match declared.args() {
        [arg] => arg.clone(),
        _ => fallback.clone(),
    }
}
