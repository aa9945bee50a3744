//! Type hierarchy table and compatibility resolution.
//!
//! The registry is the process-wide static lookup from type name to family
//! and from family to display color. Ports declare accepted/produced types
//! by name; compatibility is exact membership in the resolved accepted set.
//! The only subtyping that exists is explicit group membership: an accepted
//! entry naming a family expands to that family's members.

use egui::Color32;

/// Grouping of wire types into families, used for colors and expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    /// Conversational text payloads (`Message`, `Text`).
    Language,
    /// Structured/tabular payloads (`Data`, `DataFrame`).
    Tabular,
    /// Plain scalar values (`Number`, `Boolean`).
    Scalar,
    /// Control-flow signals (`Trigger`).
    Control,
    /// Model handles (`LanguageModel`, `Embeddings`).
    Model,
    /// Agent plumbing (`Tool`, `Memory`).
    Agent,
}

impl TypeFamily {
    /// The name used when a template declares a whole family as accepted.
    pub fn label(self) -> &'static str {
        match self {
            TypeFamily::Language => "Language",
            TypeFamily::Tabular => "Tabular",
            TypeFamily::Scalar => "Scalar",
            TypeFamily::Control => "Control",
            TypeFamily::Model => "Model",
            TypeFamily::Agent => "Agent",
        }
    }

    pub fn all() -> &'static [TypeFamily] {
        &[
            TypeFamily::Language,
            TypeFamily::Tabular,
            TypeFamily::Scalar,
            TypeFamily::Control,
            TypeFamily::Model,
            TypeFamily::Agent,
        ]
    }
}

/// Neutral indicator for ports that accept more than one concrete type.
pub const MIXED_COLOR: Color32 = Color32::from_rgb(140, 140, 150);

/// Fallback for unknown types and untyped inputs.
pub const GENERIC_COLOR: Color32 = Color32::from_rgb(100, 100, 100);

/// Static lookup table for the known wire types.
///
/// Read-only after construction and shared by every component that needs
/// type resolution or display colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeRegistry;

impl TypeRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Family of a concrete type name, `None` for unknown types.
    pub fn family_of(&self, type_name: &str) -> Option<TypeFamily> {
        match type_name {
            "Message" | "Text" => Some(TypeFamily::Language),
            "Data" | "DataFrame" => Some(TypeFamily::Tabular),
            "Number" | "Boolean" => Some(TypeFamily::Scalar),
            "Trigger" => Some(TypeFamily::Control),
            "LanguageModel" | "Embeddings" => Some(TypeFamily::Model),
            "Tool" | "Memory" => Some(TypeFamily::Agent),
            _ => None,
        }
    }

    /// Concrete members of a family, in declaration order.
    pub fn members_of(&self, family: TypeFamily) -> &'static [&'static str] {
        match family {
            TypeFamily::Language => &["Message", "Text"],
            TypeFamily::Tabular => &["Data", "DataFrame"],
            TypeFamily::Scalar => &["Number", "Boolean"],
            TypeFamily::Control => &["Trigger"],
            TypeFamily::Model => &["LanguageModel", "Embeddings"],
            TypeFamily::Agent => &["Tool", "Memory"],
        }
    }

    /// Display color token for a family.
    pub fn color_of(&self, family: TypeFamily) -> Color32 {
        match family {
            TypeFamily::Language => Color32::from_rgb(60, 100, 180),
            TypeFamily::Tabular => Color32::from_rgb(170, 90, 190),
            TypeFamily::Scalar => Color32::from_rgb(70, 160, 160),
            TypeFamily::Control => Color32::from_rgb(200, 160, 50),
            TypeFamily::Model => Color32::from_rgb(90, 130, 210),
            TypeFamily::Agent => Color32::from_rgb(190, 100, 70),
        }
    }

    /// Color for a single concrete type, gray when unresolvable.
    pub fn color_for_type(&self, type_name: &str) -> Color32 {
        self.family_of(type_name)
            .map(|f| self.color_of(f))
            .unwrap_or(GENERIC_COLOR)
    }

    /// Resolve a declared accepted-type list into the ordered,
    /// de-duplicated set of concrete type names.
    ///
    /// Entries naming a family expand into that family's members; unknown
    /// names are kept verbatim (forward compatibility with custom types).
    /// An empty declaration stays empty, meaning "accepts everything".
    pub fn resolve_accepted(&self, declared: &[String]) -> Vec<String> {
        let mut resolved: Vec<String> = Vec::with_capacity(declared.len());
        for entry in declared {
            let family = TypeFamily::all()
                .iter()
                .copied()
                .find(|f| f.label() == entry.as_str());
            match family {
                Some(f) => {
                    for member in self.members_of(f) {
                        if !resolved.iter().any(|r| r == member) {
                            resolved.push((*member).to_string());
                        }
                    }
                }
                None => {
                    if !resolved.iter().any(|r| r == entry) {
                        resolved.push(entry.clone());
                    }
                }
            }
        }
        resolved
    }

    /// Exact-membership compatibility check against a resolved accepted
    /// set. An empty set accepts all types.
    pub fn is_compatible(&self, produced: &str, accepted: &[String]) -> bool {
        accepted.is_empty() || accepted.iter().any(|a| a == produced)
    }

    /// Display color for an input given its resolved accepted set:
    /// multi-type ports get the neutral mixed indicator, single-type ports
    /// the type's family color, untyped ports the generic gray.
    pub fn display_color(&self, accepted: &[String]) -> Color32 {
        match accepted {
            [] => GENERIC_COLOR,
            [single] => self.color_for_type(single),
            _ => MIXED_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_family_lookup() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.family_of("Message"), Some(TypeFamily::Language));
        assert_eq!(reg.family_of("DataFrame"), Some(TypeFamily::Tabular));
        assert_eq!(reg.family_of("Widget"), None);
    }

    #[test]
    fn test_family_members_round_trip() {
        let reg = TypeRegistry::new();
        for family in TypeFamily::all() {
            for member in reg.members_of(*family) {
                assert_eq!(reg.family_of(member), Some(*family));
            }
        }
    }

    #[test]
    fn test_resolve_expands_family_names() {
        let reg = TypeRegistry::new();
        let resolved = reg.resolve_accepted(&names(&["Tabular", "Message"]));
        assert_eq!(resolved, names(&["Data", "DataFrame", "Message"]));
    }

    #[test]
    fn test_resolve_deduplicates_preserving_order() {
        let reg = TypeRegistry::new();
        let resolved = reg.resolve_accepted(&names(&["Message", "Language", "Message"]));
        assert_eq!(resolved, names(&["Message", "Text"]));
    }

    #[test]
    fn test_compatibility_is_exact_membership() {
        let reg = TypeRegistry::new();
        let accepted = reg.resolve_accepted(&names(&["Message", "Text"]));
        assert!(reg.is_compatible("Message", &accepted));
        assert!(reg.is_compatible("Text", &accepted));
        assert!(!reg.is_compatible("Number", &accepted));
        // Membership and compatibility must agree for every known type.
        for family in TypeFamily::all() {
            for member in reg.members_of(*family) {
                assert_eq!(
                    reg.is_compatible(member, &accepted),
                    accepted.iter().any(|a| a == member),
                );
            }
        }
    }

    #[test]
    fn test_empty_accepted_set_accepts_everything() {
        let reg = TypeRegistry::new();
        assert!(reg.is_compatible("Message", &[]));
        assert!(reg.is_compatible("NotARealType", &[]));
    }

    #[test]
    fn test_display_color_agrees_with_compatibility() {
        let reg = TypeRegistry::new();
        // Single type: the family color.
        let single = names(&["Message"]);
        assert_eq!(
            reg.display_color(&single),
            reg.color_of(TypeFamily::Language)
        );
        // Multiple types: the neutral mixed indicator, never a member color.
        let multi = names(&["Message", "Data"]);
        assert_eq!(reg.display_color(&multi), MIXED_COLOR);
        // Untyped: generic gray.
        assert_eq!(reg.display_color(&[]), GENERIC_COLOR);
    }

    #[test]
    fn test_unknown_type_color_is_generic() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.color_for_type("Widget"), GENERIC_COLOR);
    }
}
