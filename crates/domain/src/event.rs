use crate::{
    date::days_to_millis,
    organizer::Organizer,
    price::{AvailablePrices, EventPrices},
    registration::Registration,
    shared::entity::{Entity, ID},
    speaker::Speaker,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Planned,
    Canceled,
    Confirmed,
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Planned
    }
}

/// An `Event` (seminar date) attendees can register for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub status: EventStatus,
    /// Timestamp in millis, `None` if no date has been set yet
    pub begin_date: Option<i64>,
    pub minimum_seats: u32,
    /// 0 means that the number of seats is not limited
    pub maximum_seats: u32,
    /// Attendees registered outside of this system
    pub offline_seats: u32,
    pub registrations: Vec<Registration>,
    pub prices: EventPrices,
    pub early_bird_deadline: Option<i64>,
    pub speakers: Vec<Speaker>,
    /// The first organizer is the main organizer
    pub organizers: Vec<Organizer>,
    pub event_takes_place_reminder_sent: bool,
    pub cancelation_deadline_reminder_sent: bool,
    pub date_of_last_registration_digest_email: Option<i64>,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Event {
    pub fn new(title: &str) -> Self {
        Self {
            id: Default::default(),
            title: title.into(),
            status: Default::default(),
            begin_date: None,
            minimum_seats: 0,
            maximum_seats: 0,
            offline_seats: 0,
            registrations: Vec::new(),
            prices: Default::default(),
            early_bird_deadline: None,
            speakers: Vec::new(),
            organizers: Vec::new(),
            event_takes_place_reminder_sent: false,
            cancelation_deadline_reminder_sent: false,
            date_of_last_registration_digest_email: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == EventStatus::Confirmed
    }

    pub fn is_canceled(&self) -> bool {
        self.status == EventStatus::Canceled
    }

    fn regular_registrations(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter().filter(|r| r.is_regular())
    }

    fn queue_registrations(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter().filter(|r| !r.is_regular())
    }

    pub fn registered_regular_seats(&self) -> u32 {
        self.regular_registrations()
            .fold(0u32, |seats, r| seats.saturating_add(r.seats()))
    }

    pub fn queue_seats(&self) -> u32 {
        self.queue_registrations()
            .fold(0u32, |seats, r| seats.saturating_add(r.seats()))
    }

    pub fn regular_registration_count(&self) -> usize {
        self.regular_registrations().count()
    }

    pub fn queue_registration_count(&self) -> usize {
        self.queue_registrations().count()
    }

    /// Seats taken by regular registrations and offline attendees.
    /// Registrations on the waiting list are not counted.
    pub fn registered_seats(&self) -> u32 {
        self.registered_regular_seats()
            .saturating_add(self.offline_seats)
    }

    pub fn has_unlimited_vacancies(&self) -> bool {
        self.maximum_seats == 0
    }

    /// Number of free seats. Events with unlimited seats always report 0
    /// as the count is meaningless for them, use `has_vacancies` instead.
    pub fn vacancies(&self) -> u32 {
        if self.has_unlimited_vacancies() {
            return 0;
        }
        self.maximum_seats.saturating_sub(self.registered_seats())
    }

    pub fn has_vacancies(&self) -> bool {
        self.has_unlimited_vacancies() || self.vacancies() > 0
    }

    pub fn is_full(&self) -> bool {
        !self.has_unlimited_vacancies() && self.registered_seats() >= self.maximum_seats
    }

    pub fn has_enough_registrations(&self) -> bool {
        self.registered_seats() >= self.minimum_seats
    }

    /// Registrations received after the given timestamp, or all of them
    /// if `since` is `None`
    pub fn registrations_since(&self, since: Option<i64>) -> usize {
        self.registrations
            .iter()
            .filter(|r| since.map(|ts| r.registered_at > ts).unwrap_or(true))
            .count()
    }

    pub fn available_prices(&self, now: i64) -> AvailablePrices {
        self.prices.available_prices(self.early_bird_deadline, now)
    }

    pub fn early_bird_applies(&self, now: i64) -> bool {
        self.prices.early_bird_applies(self.early_bird_deadline, now)
    }

    /// The longest cancelation period any speaker of this event needs
    pub fn max_speaker_cancelation_period_days(&self) -> u32 {
        self.speakers
            .iter()
            .map(|s| s.cancelation_period_days)
            .max()
            .unwrap_or(0)
    }

    /// Latest point in time at which the event can be canceled without
    /// violating the cancelation period of any speaker.
    /// `None` if the event has no begin date.
    pub fn cancelation_deadline(&self) -> Option<i64> {
        self.begin_date
            .map(|begin| begin - days_to_millis(self.max_speaker_cancelation_period_days()))
    }

    pub fn main_organizer(&self) -> Option<&Organizer> {
        self.organizers.first()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date::MILLIS_PER_DAY;

    fn event_with_seats(maximum_seats: u32, registered: &[u32], offline_seats: u32) -> Event {
        let mut event = Event::new("Rust for PHP developers");
        event.maximum_seats = maximum_seats;
        event.offline_seats = offline_seats;
        event.registrations = registered.iter().map(|s| Registration::new(*s, 0)).collect();
        event
    }

    #[test]
    fn counts_regular_and_offline_seats() {
        let event = event_with_seats(10, &[2, 3], 1);
        assert_eq!(event.registered_regular_seats(), 5);
        assert_eq!(event.registered_seats(), 6);
        assert_eq!(event.regular_registration_count(), 2);
    }

    #[test]
    fn registration_without_seats_counts_as_one_seat() {
        let event = event_with_seats(10, &[0], 0);
        assert_eq!(event.registered_seats(), 1);
    }

    #[test]
    fn queue_registrations_do_not_occupy_seats() {
        let mut event = event_with_seats(4, &[2], 0);
        let before = event.registered_seats();

        event.registrations.push(Registration::new_on_queue(3, 0));

        assert_eq!(event.registered_seats(), before);
        assert_eq!(event.queue_seats(), 3);
        assert_eq!(event.queue_registration_count(), 1);
        assert_eq!(event.vacancies(), 2);
    }

    #[test]
    fn unlimited_events_always_have_vacancies() {
        for registered in &[vec![], vec![1], vec![500, 500]] {
            let event = event_with_seats(0, registered, 20);
            assert!(event.has_unlimited_vacancies());
            assert_eq!(event.vacancies(), 0);
            assert!(event.has_vacancies());
            assert!(!event.is_full());
        }
    }

    #[test]
    fn limited_events_get_full() {
        let event = event_with_seats(5, &[2, 2], 0);
        assert_eq!(event.vacancies(), 1);
        assert!(event.has_vacancies());
        assert!(!event.is_full());

        let event = event_with_seats(5, &[2, 2], 1);
        assert_eq!(event.vacancies(), 0);
        assert!(!event.has_vacancies());
        assert!(event.is_full());

        // Overbooked
        let event = event_with_seats(5, &[4, 2], 1);
        assert_eq!(event.vacancies(), 0);
        assert!(event.is_full());
    }

    #[test]
    fn full_and_vacancies_are_complementary_for_limited_events() {
        for maximum_seats in 1..6 {
            for offline_seats in 0..7 {
                let event = event_with_seats(maximum_seats, &[1], offline_seats);
                assert_eq!(event.is_full(), event.registered_seats() >= maximum_seats);
                assert_eq!(event.has_vacancies(), !event.is_full());
            }
        }
    }

    #[test]
    fn huge_seat_numbers_saturate() {
        let mut event = event_with_seats(10, &[u32::MAX, 1], u32::MAX);
        event
            .registrations
            .push(Registration::new_on_queue(u32::MAX, 0));
        event.registrations.push(Registration::new_on_queue(5, 0));

        assert_eq!(event.registered_regular_seats(), u32::MAX);
        assert_eq!(event.registered_seats(), u32::MAX);
        assert_eq!(event.queue_seats(), u32::MAX);
        assert_eq!(event.vacancies(), 0);
        assert!(event.is_full());
    }

    #[test]
    fn enough_registrations() {
        let mut event = event_with_seats(0, &[1, 1], 0);
        event.minimum_seats = 3;
        assert!(!event.has_enough_registrations());

        event.offline_seats = 1;
        assert!(event.has_enough_registrations());

        event.minimum_seats = 0;
        event.offline_seats = 0;
        event.registrations.clear();
        assert!(event.has_enough_registrations());
    }

    #[test]
    fn cancelation_deadline_uses_longest_speaker_period() {
        let mut event = Event::new("Ownership deep dive");
        assert_eq!(event.cancelation_deadline(), None);

        let begin = 100 * MILLIS_PER_DAY;
        event.begin_date = Some(begin);
        assert_eq!(event.cancelation_deadline(), Some(begin));

        event.speakers.push(Speaker::new("Ferris", 2));
        event.speakers.push(Speaker::new("Crab", 5));
        event.speakers.push(Speaker::new("Corro", 1));
        assert_eq!(event.max_speaker_cancelation_period_days(), 5);
        assert_eq!(event.cancelation_deadline(), Some(begin - 5 * MILLIS_PER_DAY));
    }

    #[test]
    fn counts_registrations_since() {
        let mut event = Event::new("Async Rust");
        event.registrations = vec![
            Registration::new(1, 100),
            Registration::new(1, 200),
            Registration::new_on_queue(1, 300),
        ];

        assert_eq!(event.registrations_since(None), 3);
        assert_eq!(event.registrations_since(Some(100)), 2);
        assert_eq!(event.registrations_since(Some(300)), 0);
    }
}
