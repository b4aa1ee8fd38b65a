mod inmemory;

pub use inmemory::InMemoryEventRepo;
use seminars_domain::{Event, EventStatus, ReminderKind, ID};

/// Data source and persistence sink for `Event`s.
///
/// Implementations return fully populated events including their
/// registrations, speakers and organizers.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    async fn save(&self, e: &Event) -> anyhow::Result<()>;
    /// Sets only the sent flag of the given reminder kind
    async fn mark_reminder_sent(&self, event_id: &ID, kind: ReminderKind) -> anyhow::Result<()>;
    /// Sets only the date of the last registration digest
    async fn set_last_registration_digest_date(&self, event_id: &ID, date: i64)
        -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    async fn find_by_status(&self, status: EventStatus) -> anyhow::Result<Vec<Event>>;
    /// Events with registrations that have not been part of a registration digest yet
    async fn find_needing_registration_digest(&self) -> anyhow::Result<Vec<Event>>;
}
