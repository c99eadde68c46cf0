use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a person within a product. The discriminants are the values
/// persisted in `product_persons.role` and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum ProductRole {
    #[default]
    Follower = 0,
    Contributor = 1,
    Manager = 2,
    Admin = 3,
}

impl ProductRole {
    pub const ALL: [ProductRole; 4] = [
        ProductRole::Follower,
        ProductRole::Contributor,
        ProductRole::Manager,
        ProductRole::Admin,
    ];

    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductRole::Follower => "Follower",
            ProductRole::Contributor => "Contributor",
            ProductRole::Manager => "Manager",
            ProductRole::Admin => "Admin",
        }
    }
}

impl TryFrom<i16> for ProductRole {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        ProductRole::ALL
            .into_iter()
            .find(|role| role.as_i16() == value)
            .ok_or_else(|| format!("Unknown product role: {value}"))
    }
}

/// A product a person is associated with, joined with the product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRoleView {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub role: ProductRole,
}
