// src/responder.rs

use crate::constants::*;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// What a rule answers with once it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Static(&'static str),
    CurrentTime,
    CurrentDate,
}

impl Reply {
    fn render<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        match self {
            Reply::Static(text) => text.to_string(),
            Reply::CurrentTime => format!("{}{}", TIME_REPLY_PREFIX, now.format("%X")),
            Reply::CurrentDate => format!("{}{}", DATE_REPLY_PREFIX, now.format("%x")),
        }
    }
}

/// A keyword rule: matches when the normalized input contains any trigger.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub triggers: &'static [&'static str],
    pub reply: Reply,
}

impl Rule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t))
    }
}

/// Checked top to bottom, first match wins. Order is significant.
pub static RULES: [Rule; 6] = [
    Rule {
        triggers: &["hello", "hi"],
        reply: Reply::Static(GREETING_REPLY),
    },
    Rule {
        triggers: &["how are you"],
        reply: Reply::Static(STATUS_REPLY),
    },
    Rule {
        triggers: &["time"],
        reply: Reply::CurrentTime,
    },
    Rule {
        triggers: &["date"],
        reply: Reply::CurrentDate,
    },
    Rule {
        triggers: &["weather"],
        reply: Reply::Static(WEATHER_REPLY),
    },
    Rule {
        triggers: &["bye"],
        reply: Reply::Static(FAREWELL_REPLY),
    },
];

const FALLBACK: Reply = Reply::Static(FALLBACK_REPLY);

/// Picks the reply for `input` using the local wall clock.
pub fn select_response(input: &str) -> String {
    select_response_at(input, &Local::now())
}

/// Same as [`select_response`] with an explicit instant for the clock replies.
pub fn select_response_at<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let normalized = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK)
        .render(now)
}
