use std::time::Duration;

// Conversation Constants
pub const REPLY_DELAY: Duration = Duration::from_millis(500);

pub const GREETING_REPLY: &str = "Hello! How can I help you today?";
pub const STATUS_REPLY: &str = "I'm just a bot 🤖, but I'm doing great! Thanks for asking.";
pub const TIME_REPLY_PREFIX: &str = "The current time is ";
pub const DATE_REPLY_PREFIX: &str = "Today's date is ";
pub const WEATHER_REPLY: &str = "I can't check the weather right now 🌤, but it looks nice outside!";
pub const FAREWELL_REPLY: &str = "Goodbye! Have a nice day 👋";
pub const FALLBACK_REPLY: &str = "I'm not sure how to respond to that. 🤔";

// UI Constants
pub const APP_TITLE: &str = "rulebot";
pub const SEND_BUTTON_LABEL: &str = "[ Send ]";
pub const INPUT_PREFIX: &str = "→ ";
pub const MESSAGE_INDENT: &str = "  ";

// Config Constants
pub const CONFIG_DIR_NAME: &str = "rulebot";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_DIR_NAME: &str = "logs";
