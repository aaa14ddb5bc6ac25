// ============================================================================
// Type Catalogue
// Ordered, immutable list of registered numeric representations
// ============================================================================

use super::descriptor::TypeDescriptor;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A name registered more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameConflict {
    /// The duplicated canonical name
    pub name: String,
    /// Index that wins lookups
    pub first: usize,
    /// Index shadowed by `first`
    pub duplicate: usize,
}

impl fmt::Display for NameConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type '{}' registered at index {} duplicates index {}",
            self.name, self.duplicate, self.first
        )
    }
}

/// Ordered catalogue of registered numeric representations.
///
/// The index of a descriptor is its position of first registration and is
/// stable for the lifetime of the catalogue. Lookups by name are
/// first-match-wins; any duplicate is recorded in [`Catalogue::conflicts`]
/// and logged at construction.
///
/// # Example
/// ```
/// use fluid_dispatch::domain::{Catalogue, TypeDescriptor};
///
/// let catalogue = Catalogue::new([
///     TypeDescriptor::float(),
///     TypeDescriptor::double(),
///     TypeDescriptor::fixed(32, 16),
/// ]);
/// assert_eq!(catalogue.size(), 3);
/// assert_eq!(catalogue.index_of("FIXED(32,16)"), Some(2));
/// assert_eq!(catalogue.name_at(1), "DOUBLE");
/// ```
#[derive(Debug, Clone)]
pub struct Catalogue {
    descriptors: Vec<TypeDescriptor>,
    names: Vec<String>,
    index: HashMap<String, usize>,
    conflicts: SmallVec<[NameConflict; 2]>,
}

impl Catalogue {
    /// Build a catalogue from descriptors in registration order.
    pub fn new(descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let descriptors: Vec<TypeDescriptor> = descriptors.into_iter().collect();
        let names: Vec<String> = descriptors.iter().map(TypeDescriptor::name).collect();

        let mut index = HashMap::with_capacity(names.len());
        let mut conflicts = SmallVec::new();

        for (position, name) in names.iter().enumerate() {
            if let Some(&first) = index.get(name) {
                let conflict = NameConflict {
                    name: name.clone(),
                    first,
                    duplicate: position,
                };
                tracing::warn!("Catalogue name conflict: {}", conflict);
                conflicts.push(conflict);
            } else {
                index.insert(name.clone(), position);
            }
        }

        Self {
            descriptors,
            names,
            index,
            conflicts,
        }
    }

    /// Number of registered descriptors.
    #[inline]
    pub fn size(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Canonical name at `index`.
    ///
    /// # Panics
    /// Panics if `index >= size()`; validate first or use [`Catalogue::get_name`].
    #[inline]
    pub fn name_at(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Canonical name at `index`, if in range.
    #[inline]
    pub fn get_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Descriptor at `index`, if in range.
    #[inline]
    pub fn descriptor_at(&self, index: usize) -> Option<&TypeDescriptor> {
        self.descriptors.get(index)
    }

    /// Index of the first descriptor registered under `name`.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Descriptors with their indices, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TypeDescriptor)> {
        self.descriptors.iter().enumerate()
    }

    /// Canonical names in registration order (duplicates included).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Duplicate registrations found at construction.
    pub fn conflicts(&self) -> &[NameConflict] {
        &self.conflicts
    }

    /// Strict validation: fails on the first duplicate name.
    pub fn validate(&self) -> Result<(), NameConflict> {
        match self.conflicts.first() {
            Some(conflict) => Err(conflict.clone()),
            None => Ok(()),
        }
    }

    /// "Available types" listing for command line help.
    pub fn help_text(&self) -> String {
        let width = self.names.iter().map(String::len).max().unwrap_or(0);
        let mut text = String::from("Available types:\n");
        for (position, descriptor) in self.iter() {
            if self.index_of(&self.names[position]) != Some(position) {
                continue;
            }
            text.push_str(&format!(
                "  {:<width$}  - {}\n",
                self.names[position],
                descriptor.summary(),
                width = width
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_catalogue() -> Catalogue {
        Catalogue::new([
            TypeDescriptor::float(),
            TypeDescriptor::double(),
            TypeDescriptor::fixed(32, 16),
        ])
    }

    #[test]
    fn test_indices_follow_registration_order() {
        let catalogue = scenario_catalogue();
        assert_eq!(catalogue.size(), 3);
        assert_eq!(catalogue.index_of("FLOAT"), Some(0));
        assert_eq!(catalogue.index_of("DOUBLE"), Some(1));
        assert_eq!(catalogue.index_of("FIXED(32,16)"), Some(2));
        assert_eq!(catalogue.name_at(2), "FIXED(32,16)");
    }

    #[test]
    fn test_unknown_names() {
        let catalogue = scenario_catalogue();
        assert_eq!(catalogue.index_of("FIXED(64,32)"), None);
        assert_eq!(catalogue.index_of("float"), None);
        assert!(!catalogue.contains(""));
        assert_eq!(catalogue.get_name(3), None);
        assert!(catalogue.descriptor_at(3).is_none());
    }

    #[test]
    #[should_panic]
    fn test_name_at_out_of_range_panics() {
        scenario_catalogue().name_at(3);
    }

    #[test]
    fn test_duplicates_first_match_wins() {
        let catalogue = Catalogue::new([
            TypeDescriptor::fixed(32, 16),
            TypeDescriptor::double(),
            TypeDescriptor::fixed(32, 16),
        ]);

        assert_eq!(catalogue.size(), 3);
        assert_eq!(catalogue.index_of("FIXED(32,16)"), Some(0));
        assert_eq!(
            catalogue.conflicts(),
            &[NameConflict {
                name: "FIXED(32,16)".to_string(),
                first: 0,
                duplicate: 2,
            }]
        );
        assert!(catalogue.validate().is_err());
    }

    #[test]
    fn test_validate_clean_catalogue() {
        assert!(scenario_catalogue().validate().is_ok());
        assert!(scenario_catalogue().conflicts().is_empty());
    }

    #[test]
    fn test_empty_catalogue() {
        let catalogue = Catalogue::new(Vec::<TypeDescriptor>::new());
        assert!(catalogue.is_empty());
        assert_eq!(catalogue.index_of("FLOAT"), None);
    }

    #[test]
    fn test_help_text_lists_each_name_once() {
        let catalogue = Catalogue::new([
            TypeDescriptor::float(),
            TypeDescriptor::float(),
            TypeDescriptor::fast_fixed(16, 8),
        ]);
        let help = catalogue.help_text();
        assert_eq!(help.matches("FLOAT").count(), 1);
        assert!(help.contains("FAST_FIXED(16,8)  - Fixed point number represented as `int_fast16_t` divided by 2^8"));
    }
}
