//! Query metadata: named selectors over typed properties.
//!
//! Selectors and properties are `const` declarations on each element type.
//! Membership and type checks happen at runtime in `Query::set_property`.

use super::ValueType;

/// Named, typed slot a query can bind a value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Property {
    name: &'static str,
    value_type: ValueType,
}

impl Property {
    /// Storage identifier, bound by the `id` selector.
    pub const ID: Property = Property::new("id", ValueType::Integer);

    pub const fn new(name: &'static str, value_type: ValueType) -> Self {
        Self { name, value_type }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

/// How many results a selector is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Matches on the storage identifier.
    Key,
    /// Matches at most one element by its natural key.
    Single,
    Multiple,
}

/// Named query shape with a closed set of properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    name: &'static str,
    cardinality: Cardinality,
    properties: &'static [Property],
}

impl Selector {
    pub const ID: Selector = Selector::new("id", Cardinality::Key, &[Property::ID]);
    pub const ALL: Selector = Selector::new("all", Cardinality::Multiple, &[]);

    pub const fn new(
        name: &'static str,
        cardinality: Cardinality,
        properties: &'static [Property],
    ) -> Self {
        Self {
            name,
            cardinality,
            properties,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn properties(&self) -> &'static [Property] {
        self.properties
    }

    pub fn contains(&self, property: &Property) -> bool {
        self.properties.contains(property)
    }
}
