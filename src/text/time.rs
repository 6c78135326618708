//! Clock time expansion (`3:05 pm` → `three oh five p m`)

use regex::Captures;

use super::numbers::cardinal;

fn expand_time(c: &Captures) -> String {
    let mut hour: u64 = c[1].parse().unwrap_or(0);
    let minute: u64 = c[2].parse().unwrap_or(0);

    let mut past_noon = hour >= 12;
    if hour > 12 {
        hour -= 12;
    } else if hour == 0 {
        hour = 12;
        past_noon = true;
    }

    let mut words = vec![cardinal(hour)];
    if minute > 0 {
        if minute < 10 {
            words.push("oh".to_string());
        }
        words.push(cardinal(minute));
    }

    match c.get(3) {
        Some(suffix) => words.extend(
            suffix
                .as_str()
                .chars()
                .filter(|ch| *ch != '.')
                .map(|ch| ch.to_ascii_lowercase().to_string()),
        ),
        None if past_noon => words.push("p m".to_string()),
        None => words.push("a m".to_string()),
    }

    words.join(" ")
}

/// Spell out `h:mm` clock times with an optional am/pm suffix. Hours run
/// from 0 to 23; afternoon hours are read on the 12-hour clock.
pub fn expand_time_english(text: &str) -> String {
    regex!(r"(?i)\b(0?[0-9]|1[0-9]|2[0-3])\s*:\s*([0-5][0-9])\s*(a\.m\.|am|pm|p\.m\.|a\.m|p\.m)?\b")
        .replace_all(text, expand_time)
        .into_owned()
}
