use chrono_tz::Tz;
use seminars_domain::{
    date::{days_until, format_date},
    Event, Organizer, ReminderKind,
};
use seminars_infra::{Mail, Mailbox};

fn format_optional_date(ts: Option<i64>, tz: &Tz) -> String {
    ts.map(|ts| format_date(ts, tz))
        .unwrap_or_else(|| "no date".into())
}

fn seats_summary(event: &Event) -> String {
    if event.has_unlimited_vacancies() {
        format!("{} seat(s) are taken, seats are not limited", event.registered_seats())
    } else {
        format!(
            "{} of {} seat(s) are taken, {} vacancies left",
            event.registered_seats(),
            event.maximum_seats,
            event.vacancies()
        )
    }
}

/// The reminder an organizer sends to themself about one of their events
pub fn compose_reminder_mail(
    kind: ReminderKind,
    event: &Event,
    organizer: &Organizer,
    now: i64,
    tz: &Tz,
) -> Mail {
    let mailbox = Mailbox::new(&organizer.name, &organizer.email);
    let begin_date = format_optional_date(event.begin_date, tz);
    let days_until_begin = event.begin_date.map(|b| days_until(b, now)).unwrap_or(0);

    let (subject, details) = match kind {
        ReminderKind::EventTakesPlace => (
            format!("Event #{} takes place soon: {}", event.id, event.title),
            format!(
                "the event \"{}\" will take place on {}, that is in {} day(s).",
                event.title, begin_date, days_until_begin
            ),
        ),
        ReminderKind::CancelationDeadline => {
            let enough = if event.has_enough_registrations() {
                "The minimum number of seats has been reached."
            } else {
                "The minimum number of seats has not been reached yet."
            };
            (
                format!(
                    "Event #{}: the cancelation deadline is coming up: {}",
                    event.id, event.title
                ),
                format!(
                    "the event \"{}\" begins on {}, that is in {} day(s). \
                     It can be canceled without conflicting with any speaker until {}.\n{}",
                    event.title,
                    begin_date,
                    days_until_begin,
                    format_optional_date(event.cancelation_deadline(), tz),
                    enough
                ),
            )
        }
    };

    let body = format!(
        "Hello {},\n\n{}\n\nThere are {} registration(s) for this event, {}.\n",
        organizer.name,
        details,
        event.regular_registration_count(),
        seats_summary(event)
    );

    Mail {
        from: mailbox.clone(),
        to: mailbox,
        subject,
        body,
        attachment: None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use seminars_domain::{date::MILLIS_PER_DAY, Registration, Speaker};

    const NOW: i64 = 1613862000000;

    fn event() -> Event {
        let mut event = Event::new("Unsafe Rust");
        event.begin_date = Some(NOW + 2 * MILLIS_PER_DAY + 60 * 60 * 1000);
        event.maximum_seats = 10;
        event.minimum_seats = 5;
        event.registrations = vec![Registration::new(2, NOW), Registration::new(1, NOW)];
        event
    }

    #[test]
    fn takes_place_mail_goes_from_and_to_the_organizer() {
        let event = event();
        let organizer = Organizer::new("Ada", "ada@example.com");

        let mail = compose_reminder_mail(
            ReminderKind::EventTakesPlace,
            &event,
            &organizer,
            NOW,
            &Tz::UTC,
        );

        assert_eq!(mail.from, Mailbox::new("Ada", "ada@example.com"));
        assert_eq!(mail.to, mail.from);
        assert!(mail.subject.contains(&event.id.to_string()));
        assert!(mail.subject.contains("Unsafe Rust"));
        assert!(mail.body.contains("2021-02-23 00:00"));
        assert!(mail.body.contains("in 2 day(s)"));
        assert!(mail.body.contains("2 registration(s)"));
        assert!(mail.body.contains("3 of 10 seat(s) are taken, 7 vacancies left"));
        assert!(mail.attachment.is_none());
    }

    #[test]
    fn begin_date_is_rendered_in_configured_timezone() {
        let event = event();
        let organizer = Organizer::new("Ada", "ada@example.com");

        let mail = compose_reminder_mail(
            ReminderKind::EventTakesPlace,
            &event,
            &organizer,
            NOW,
            &chrono_tz::Europe::Berlin,
        );

        assert!(mail.body.contains("2021-02-23 01:00"));
    }

    #[test]
    fn cancelation_mail_mentions_deadline_and_minimum_seats() {
        let mut event = event();
        event.speakers.push(Speaker::new("Ferris", 2));
        let organizer = Organizer::new("Ada", "ada@example.com");

        let mail = compose_reminder_mail(
            ReminderKind::CancelationDeadline,
            &event,
            &organizer,
            NOW,
            &Tz::UTC,
        );

        assert!(mail.subject.contains("cancelation deadline"));
        assert!(mail.body.contains("until 2021-02-21 00:00"));
        assert!(mail.body.contains("has not been reached yet"));
    }
}
