use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use seminars_domain::{Event, EventStatus, ReminderKind, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        if save(e, &self.events) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Event with id: {} does not exist", e.id))
        }
    }

    async fn mark_reminder_sent(&self, event_id: &ID, kind: ReminderKind) -> anyhow::Result<()> {
        if update(event_id, &self.events, |event| event.mark_reminder_sent(kind)) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Event with id: {} does not exist", event_id))
        }
    }

    async fn set_last_registration_digest_date(
        &self,
        event_id: &ID,
        date: i64,
    ) -> anyhow::Result<()> {
        let found = update(event_id, &self.events, |event| {
            event.date_of_last_registration_digest_email = Some(date)
        });
        if found {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Event with id: {} does not exist", event_id))
        }
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        find(event_id, &self.events)
    }

    async fn find_by_status(&self, status: EventStatus) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |event| event.status == status))
    }

    async fn find_needing_registration_digest(&self) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |event| {
            !event.is_canceled()
                && event.registrations_since(event.date_of_last_registration_digest_email) > 0
        }))
    }
}
