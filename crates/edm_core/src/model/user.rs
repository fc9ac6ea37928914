//! People known to the system.

use super::{
    check_non_negative, check_text, read_integer, read_text, record_of, Cardinality, Element,
    ElementId, ElementKind, Property, Record, Selector, ValueType,
};
use crate::builder::UserBuilder;
use crate::datastore::StoreResult;
use crate::error::DomainResult;
use crate::loader::UserLoader;

/// A user identified by institutional id number and login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    id: Option<ElementId>,
    id_number: i64,
    username: String,
    first_name: String,
    last_name: String,
}

impl User {
    pub const ID_NUMBER: Property = Property::new("id_number", ValueType::Integer);
    pub const USERNAME: Property = Property::new("username", ValueType::Text);
    pub const FIRST_NAME: Property = Property::new("first_name", ValueType::Text);
    pub const LAST_NAME: Property = Property::new("last_name", ValueType::Text);

    pub const SELECTOR_ID_NUMBER: Selector =
        Selector::new("id_number", Cardinality::Single, &[Self::ID_NUMBER]);
    pub const SELECTOR_USERNAME: Selector =
        Selector::new("username", Cardinality::Single, &[Self::USERNAME]);

    pub fn new(
        id_number: i64,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            id_number,
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn id_number(&self) -> i64 {
        self.id_number
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `first last`, as shown in reports.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Element for User {
    const KIND: ElementKind = ElementKind::User;
    const SELECTORS: &'static [Selector] = &[
        Selector::ID,
        Selector::ALL,
        Self::SELECTOR_ID_NUMBER,
        Self::SELECTOR_USERNAME,
    ];

    type Builder = dyn UserBuilder;
    type Loader = dyn UserLoader;

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn with_id(self, id: ElementId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn to_record(&self) -> Record {
        record_of([
            (Self::ID_NUMBER, Some(self.id_number.into())),
            (Self::USERNAME, Some(self.username.as_str().into())),
            (Self::FIRST_NAME, Some(self.first_name.as_str().into())),
            (Self::LAST_NAME, Some(self.last_name.as_str().into())),
        ])
    }

    fn from_record(id: ElementId, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            id: Some(id),
            id_number: read_integer(record, &Self::ID_NUMBER)?,
            username: read_text(record, &Self::USERNAME)?,
            first_name: read_text(record, &Self::FIRST_NAME)?,
            last_name: read_text(record, &Self::LAST_NAME)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        check_non_negative("id_number", self.id_number)?;
        check_text("username", &self.username)?;
        check_text("first_name", &self.first_name)?;
        check_text("last_name", &self.last_name)
    }
}
