use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Empty if the contact has no email address.
    #[serde(default)]
    pub email: String,
}

impl Contact {
    pub fn new(name: String, phone: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            phone,
            email,
        }
    }

    /// Case-insensitive substring match against name, phone and email.
    ///
    /// The `term` must already be lower-cased.
    pub fn matches(&self, term: &str) -> bool {
        [&self.name, &self.phone, &self.email]
            .into_iter()
            .any(|field| !field.is_empty() && field.to_lowercase().contains(term))
    }
}
