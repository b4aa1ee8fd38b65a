pub mod date;
mod event;
mod organizer;
mod price;
mod registration;
mod reminder;
mod shared;
mod speaker;

pub use event::{Event, EventStatus};
pub use organizer::Organizer;
pub use price::{AvailablePrices, EventPrices, PriceError, PriceTier};
pub use registration::Registration;
pub use reminder::{ReminderKind, ReminderSettings};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use speaker::Speaker;
