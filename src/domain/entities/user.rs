use crate::core::reader::FieldReader;
use crate::domain::enums::{EntityKind, Role};
use crate::domain::model::{Entity, ValidatedEntity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Login handle.
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    const FIELDS: &'static [&'static str] = &["id", "name", "username", "role", "avatar"];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let name = reader.required_str("name");
        let username = reader.required_str("username");
        let role = reader.required_enum::<Role>("role");
        let avatar = reader.optional_str("avatar");

        Some(Self {
            id: id?,
            name: name?,
            username: username?,
            role: role?,
            avatar,
        })
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::User(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::User(user) => Some(user),
            _ => None,
        }
    }
}
