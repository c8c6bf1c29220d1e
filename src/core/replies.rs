//! Canned replies keyed off sentiment polarity.

pub const POSITIVE_REPLY: &str = "That sounds great! Keep up the positive energy!";
pub const NEGATIVE_REPLY: &str = "I'm here for you. How can I help you feel better?";
pub const NEUTRAL_REPLY: &str = "I understand. Let's talk about it.";

/// Anything that is not exactly `POSITIVE` or `NEGATIVE` gets the neutral reply,
/// including classifier error text.
pub fn select_reply(mood: &str) -> &'static str {
    match mood {
        "POSITIVE" => POSITIVE_REPLY,
        "NEGATIVE" => NEGATIVE_REPLY,
        _ => NEUTRAL_REPLY,
    }
}
