use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A `Registration` of one or more attendees for an `Event`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: ID,
    /// Number of seats booked with this registration. A stored value of 0
    /// is counted as one seat.
    pub seats: u32,
    /// Registrations on the waiting list do not occupy any seats until
    /// they are promoted to regular registrations.
    pub on_queue: bool,
    /// Timestamp in millis
    pub registered_at: i64,
}

impl Registration {
    pub fn new(seats: u32, registered_at: i64) -> Self {
        Self {
            id: Default::default(),
            seats,
            on_queue: false,
            registered_at,
        }
    }

    pub fn new_on_queue(seats: u32, registered_at: i64) -> Self {
        Self {
            on_queue: true,
            ..Self::new(seats, registered_at)
        }
    }

    pub fn seats(&self) -> u32 {
        self.seats.max(1)
    }

    pub fn is_regular(&self) -> bool {
        !self.on_queue
    }
}

impl Entity for Registration {
    fn id(&self) -> &ID {
        &self.id
    }
}
