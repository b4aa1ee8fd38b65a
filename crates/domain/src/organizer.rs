use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The party responsible for an `Event`. Organizers both send and
/// receive the reminder mails of their events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl Organizer {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Organizer {
    fn id(&self) -> &ID {
        &self.id
    }
}
