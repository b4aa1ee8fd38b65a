use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: ID,
    pub name: String,
    /// Days of notice this speaker needs if the event gets canceled
    pub cancelation_period_days: u32,
}

impl Speaker {
    pub fn new(name: &str, cancelation_period_days: u32) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            cancelation_period_days,
        }
    }
}

impl Entity for Speaker {
    fn id(&self) -> &ID {
        &self.id
    }
}
