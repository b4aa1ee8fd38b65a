use crate::{
    date::days_to_millis,
    event::{Event, EventStatus},
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The reminders organizers get about their events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    /// A confirmed event is about to begin
    EventTakesPlace,
    /// The last day to cancel a planned event is coming up
    CancelationDeadline,
}

impl ReminderKind {
    /// Only events in this status can get a reminder of this kind
    pub fn required_status(&self) -> EventStatus {
        match self {
            Self::EventTakesPlace => EventStatus::Confirmed,
            Self::CancelationDeadline => EventStatus::Planned,
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventTakesPlace => write!(f, "event takes place"),
            Self::CancelationDeadline => write!(f, "cancelation deadline"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderSettings {
    /// 0 disables event takes place reminders
    pub event_takes_place_days_before_begin_date: u32,
    pub send_cancelation_deadline_reminder: bool,
    /// How many days before the cancelation deadline the reminder is sent.
    /// 0 disables cancelation deadline reminders.
    pub cancelation_deadline_days_before_deadline: u32,
}

/// `target` lies in the future and no further away than `days`
fn is_within_days(target: i64, days: u32, now: i64) -> bool {
    days > 0 && target > now && target - now <= days_to_millis(days)
}

impl ReminderSettings {
    pub fn is_enabled(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::EventTakesPlace => self.event_takes_place_days_before_begin_date > 0,
            ReminderKind::CancelationDeadline => {
                self.send_cancelation_deadline_reminder
                    && self.cancelation_deadline_days_before_deadline > 0
            }
        }
    }

    pub fn is_due(&self, kind: ReminderKind, event: &Event, now: i64) -> bool {
        match kind {
            ReminderKind::EventTakesPlace => self.is_event_takes_place_reminder_due(event, now),
            ReminderKind::CancelationDeadline => {
                self.is_cancelation_deadline_reminder_due(event, now)
            }
        }
    }

    pub fn is_event_takes_place_reminder_due(&self, event: &Event, now: i64) -> bool {
        let kind = ReminderKind::EventTakesPlace;
        if event.is_reminder_sent(kind) || event.status != kind.required_status() {
            return false;
        }
        match event.begin_date {
            Some(begin) => is_within_days(begin, self.event_takes_place_days_before_begin_date, now),
            None => false,
        }
    }

    pub fn is_cancelation_deadline_reminder_due(&self, event: &Event, now: i64) -> bool {
        let kind = ReminderKind::CancelationDeadline;
        if !self.is_enabled(kind)
            || event.is_reminder_sent(kind)
            || event.status != kind.required_status()
            || event.speakers.is_empty()
        {
            return false;
        }
        match event.cancelation_deadline() {
            Some(deadline) => {
                is_within_days(deadline, self.cancelation_deadline_days_before_deadline, now)
            }
            None => false,
        }
    }
}

impl Event {
    pub fn is_reminder_sent(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::EventTakesPlace => self.event_takes_place_reminder_sent,
            ReminderKind::CancelationDeadline => self.cancelation_deadline_reminder_sent,
        }
    }

    /// Flags are never reset here, marking twice is a no-op
    pub fn mark_reminder_sent(&mut self, kind: ReminderKind) {
        match kind {
            ReminderKind::EventTakesPlace => self.event_takes_place_reminder_sent = true,
            ReminderKind::CancelationDeadline => self.cancelation_deadline_reminder_sent = true,
        }
    }

    /// The date a reminder of the given kind counts down to
    pub fn reminder_target_date(&self, kind: ReminderKind) -> Option<i64> {
        match kind {
            ReminderKind::EventTakesPlace => self.begin_date,
            ReminderKind::CancelationDeadline => self.cancelation_deadline(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{date::MILLIS_PER_DAY, Speaker};

    const NOW: i64 = 1613862000000;

    fn settings(days: u32) -> ReminderSettings {
        ReminderSettings {
            event_takes_place_days_before_begin_date: days,
            send_cancelation_deadline_reminder: true,
            cancelation_deadline_days_before_deadline: days,
        }
    }

    fn confirmed_event(begin_date: Option<i64>) -> Event {
        let mut event = Event::new("Macros in practice");
        event.status = EventStatus::Confirmed;
        event.begin_date = begin_date;
        event
    }

    fn planned_event_with_speaker(begin_date: i64, period_days: u32) -> Event {
        let mut event = Event::new("Embedded Rust");
        event.begin_date = Some(begin_date);
        event.speakers.push(Speaker::new("Ferris", period_days));
        event
    }

    #[test]
    fn takes_place_reminder_due_for_confirmed_event_within_window() {
        let event = confirmed_event(Some(NOW + MILLIS_PER_DAY));
        assert!(settings(2).is_event_takes_place_reminder_due(&event, NOW));
        assert!(settings(1).is_event_takes_place_reminder_due(&event, NOW));
        assert!(settings(2).is_due(ReminderKind::EventTakesPlace, &event, NOW));
    }

    #[test]
    fn takes_place_reminder_disabled_with_zero_days() {
        let event = confirmed_event(Some(NOW + MILLIS_PER_DAY));
        assert!(!settings(0).is_event_takes_place_reminder_due(&event, NOW));
    }

    #[test]
    fn takes_place_reminder_not_due_outside_window() {
        let event = confirmed_event(Some(NOW + 3 * MILLIS_PER_DAY));
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));

        // Already begun
        let event = confirmed_event(Some(NOW));
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));
        let event = confirmed_event(Some(NOW - MILLIS_PER_DAY));
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));

        let event = confirmed_event(None);
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));
    }

    #[test]
    fn takes_place_reminder_only_for_confirmed_events() {
        let mut event = confirmed_event(Some(NOW + MILLIS_PER_DAY));
        event.status = EventStatus::Planned;
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));
        event.status = EventStatus::Canceled;
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));
    }

    #[test]
    fn takes_place_reminder_not_due_when_already_sent() {
        let mut event = confirmed_event(Some(NOW + MILLIS_PER_DAY));
        event.mark_reminder_sent(ReminderKind::EventTakesPlace);
        assert!(event.is_reminder_sent(ReminderKind::EventTakesPlace));
        assert!(!event.is_reminder_sent(ReminderKind::CancelationDeadline));
        assert!(!settings(2).is_event_takes_place_reminder_due(&event, NOW));

        event.mark_reminder_sent(ReminderKind::EventTakesPlace);
        assert!(event.event_takes_place_reminder_sent);
    }

    #[test]
    fn enabled_reminder_kinds() {
        assert!(settings(2).is_enabled(ReminderKind::EventTakesPlace));
        assert!(settings(2).is_enabled(ReminderKind::CancelationDeadline));
        assert!(!settings(0).is_enabled(ReminderKind::EventTakesPlace));
        assert!(!settings(0).is_enabled(ReminderKind::CancelationDeadline));
        assert!(!ReminderSettings::default().is_enabled(ReminderKind::CancelationDeadline));
    }

    #[test]
    fn cancelation_reminder_due_within_window_before_deadline() {
        // Deadline is 1 day from now
        let event = planned_event_with_speaker(NOW + 3 * MILLIS_PER_DAY, 2);
        assert!(settings(2).is_cancelation_deadline_reminder_due(&event, NOW));
        assert!(settings(1).is_cancelation_deadline_reminder_due(&event, NOW));
        assert_eq!(
            event.reminder_target_date(ReminderKind::CancelationDeadline),
            Some(NOW + MILLIS_PER_DAY)
        );
    }

    #[test]
    fn cancelation_reminder_not_due_after_deadline_or_too_early() {
        // Deadline passed yesterday
        let event = planned_event_with_speaker(NOW + MILLIS_PER_DAY, 2);
        assert!(!settings(2).is_cancelation_deadline_reminder_due(&event, NOW));

        // Deadline right now
        let event = planned_event_with_speaker(NOW + 2 * MILLIS_PER_DAY, 2);
        assert!(!settings(2).is_cancelation_deadline_reminder_due(&event, NOW));

        // Deadline in 5 days
        let event = planned_event_with_speaker(NOW + 7 * MILLIS_PER_DAY, 2);
        assert!(!settings(2).is_cancelation_deadline_reminder_due(&event, NOW));
    }

    #[test]
    fn cancelation_reminder_requires_speaker_planned_status_and_setting() {
        let mut event = planned_event_with_speaker(NOW + 3 * MILLIS_PER_DAY, 2);

        let mut disabled = settings(2);
        disabled.send_cancelation_deadline_reminder = false;
        assert!(!disabled.is_cancelation_deadline_reminder_due(&event, NOW));

        let mut no_window = settings(2);
        no_window.cancelation_deadline_days_before_deadline = 0;
        assert!(!no_window.is_cancelation_deadline_reminder_due(&event, NOW));

        event.status = EventStatus::Confirmed;
        assert!(!settings(2).is_cancelation_deadline_reminder_due(&event, NOW));

        event.status = EventStatus::Planned;
        event.speakers.clear();
        assert!(!settings(2).is_cancelation_deadline_reminder_due(&event, NOW));

        event.speakers.push(Speaker::new("Ferris", 2));
        event.mark_reminder_sent(ReminderKind::CancelationDeadline);
        assert!(!settings(2).is_due(ReminderKind::CancelationDeadline, &event, NOW));
    }
}
