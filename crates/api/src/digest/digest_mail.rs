use chrono_tz::Tz;
use seminars_domain::{date::format_date, Event};
use seminars_infra::{Mail, Mailbox, RegistrationDigestConfig};

fn vacancies_summary(event: &Event) -> String {
    if event.has_unlimited_vacancies() {
        "unlimited vacancies".into()
    } else if event.is_full() {
        "fully booked".into()
    } else {
        format!("{} vacancies", event.vacancies())
    }
}

fn event_line(event: &Event, tz: &Tz) -> String {
    let begin_date = event
        .begin_date
        .map(|ts| format_date(ts, tz))
        .unwrap_or_else(|| "no date".into());
    format!(
        "- {} ({}): {} new registration(s), {} in total, {}",
        event.title,
        begin_date,
        event.registrations_since(event.date_of_last_registration_digest_email),
        event.registrations.len(),
        vacancies_summary(event)
    )
}

/// Fills in the `{{event_count}}`, `{{events}}` and `{{date}}` placeholders
pub fn render_template(template: &str, events: &[Event], now: i64, tz: &Tz) -> String {
    let lines = events
        .iter()
        .map(|event| event_line(event, tz))
        .collect::<Vec<_>>()
        .join("\n");

    template
        .replace("{{event_count}}", &events.len().to_string())
        .replace("{{date}}", &format_date(now, tz))
        .replace("{{events}}", &lines)
}

pub fn compose_digest_mail(
    config: &RegistrationDigestConfig,
    events: &[Event],
    now: i64,
    tz: &Tz,
) -> Mail {
    Mail {
        from: Mailbox::new(&config.from_name, &config.from_email),
        to: Mailbox::new(&config.to_name, &config.to_email),
        subject: config.subject.clone(),
        body: render_template(&config.template, events, now, tz),
        attachment: None,
    }
}
