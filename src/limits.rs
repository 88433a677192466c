use thiserror::Error;

/// Largest limit (in minutes) the backend accepts, global or per app.
pub const MAX_LIMIT_MINUTES: u32 = 180;

const OVER_LIMIT_MESSAGE: &str = "🚫 Over 3 hours? Go touch some grass, hydrate, maybe even see the sun. Limit is 180 mins max.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("not a number")]
    NotANumber,
    #[error("negative limit: {0}")]
    Negative(i64),
    #[error("limit {0} is above the {MAX_LIMIT_MINUTES} minute maximum")]
    AboveMaximum(i64),
}

impl LimitError {
    /// Inline message for the global limit field.
    pub fn global_message(&self) -> &'static str {
        match self {
            Self::NotANumber | Self::Negative(_) => {
                "🚫 Invalid limit. Please enter a positive number."
            }
            Self::AboveMaximum(_) => OVER_LIMIT_MESSAGE,
        }
    }

    /// Inline message for a per-application limit field.
    pub fn app_message(&self) -> &'static str {
        "🚫 Invalid limit. Please enter a number between 0-180."
    }
}

/// Parse the leading integer of a text field.
///
/// Surrounding whitespace and an optional sign are accepted and anything
/// after the leading digits is ignored (`"45min"` is 45, `"3.9"` is 3).
/// Returns `None` when no digit follows the optional sign.
pub fn parse_minutes(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    // Saturate absurdly long inputs instead of failing; they are rejected
    // by the range checks anyway.
    let value = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn checked_minutes(input: &str) -> Result<u32, LimitError> {
    let value = parse_minutes(input).ok_or(LimitError::NotANumber)?;
    if value < 0 {
        return Err(LimitError::Negative(value));
    }
    if value > i64::from(MAX_LIMIT_MINUTES) {
        return Err(LimitError::AboveMaximum(value));
    }
    u32::try_from(value).map_err(|_| LimitError::AboveMaximum(value))
}

/// Validate a per-application limit: an integer in `[0, 180]`.
pub fn validate_app_limit(input: &str) -> Result<u32, LimitError> {
    checked_minutes(input)
}

/// How a valid global limit submission proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalLimitDecision {
    /// Equal to or below the current limit: send it straight away.
    ApplyNow(u32),
    /// An increase: it has to pass the confirmation gate first.
    RequiresConfirmation(u32),
}

/// Validate a global limit submission against the currently displayed limit.
pub fn decide_global_limit(input: &str, current: u32) -> Result<GlobalLimitDecision, LimitError> {
    let value = checked_minutes(input)?;
    Ok(if value > current {
        GlobalLimitDecision::RequiresConfirmation(value)
    } else {
        GlobalLimitDecision::ApplyNow(value)
    })
}

/// Feedback shown under the global limit field while the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitHint {
    pub text: &'static str,
    pub submit_enabled: bool,
}

pub fn global_limit_hint(input: &str) -> LimitHint {
    let value = parse_minutes(input);
    let text = match value {
        Some(v) if v > i64::from(MAX_LIMIT_MINUTES) => {
            return LimitHint {
                text: OVER_LIMIT_MESSAGE,
                submit_enabled: false,
            };
        }
        Some(v) if v > 120 => "🫠 2+ hours? Alright, just don’t forget what year it is.",
        Some(v) if v > 60 => "😎 1+ hour? Solid. Gamer but functioning.",
        Some(v) if v > 0 => "🧘 Discipline? In this economy? Impressive.",
        _ => "⌛ 0 mins? Either you're enlightened or lying.",
    };
    LimitHint {
        text,
        submit_enabled: true,
    }
}
