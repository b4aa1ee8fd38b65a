pub mod mail_notifier;
mod reminder_mail;
