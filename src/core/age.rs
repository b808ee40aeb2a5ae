use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use crate::models::Profile;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 birthday into a calendar date
///
/// Accepts `YYYY-MM-DD`, naive datetimes with `T` or space separator, and
/// RFC 3339 timestamps (the date is taken in the timestamp's own offset).
/// Blank or unparseable input yields `None`.
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Whole years between `birth` and `today`, one less if the birthday has not
/// come round yet this year
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(before_birthday)
}

/// Age of a profile on `today`: the direct age if given, else derived from
/// the birthday
pub fn resolve_age(profile: &Profile, today: NaiveDate) -> Option<i32> {
    if let Some(age) = profile.age {
        return Some(age);
    }

    parse_birthday(&profile.personal_info.birthday).map(|birth| age_on(birth, today))
}
