use chrono::{Datelike, NaiveDate, NaiveTime};

/// Wire format for entry dates: `DD.MM.YY`, two digits per segment.
/// All arithmetic happens on the parsed `NaiveDate`; the string form is
/// storage/display only.
pub fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_entry_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%d.%m.%y").ok()
}

pub fn format_entry_date(date: NaiveDate) -> String {
    date.format("%d.%m.%y").to_string()
}

pub fn looks_like_entry_date(value: &str) -> bool {
    if value.len() != 8 {
        return false;
    }

    let bytes = value.as_bytes();
    if bytes[2] != b'.' || bytes[5] != b'.' {
        return false;
    }

    for index in [0usize, 1, 3, 4, 6, 7] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

/// Month periods use `MM.YY`. Returns (year, month).
pub fn parse_month_period(value: &str) -> Option<(i32, u32)> {
    if value.len() != 5 {
        return None;
    }

    let bytes = value.as_bytes();
    if bytes[2] != b'.' {
        return None;
    }
    for index in [0usize, 1, 3, 4] {
        if !bytes[index].is_ascii_digit() {
            return None;
        }
    }

    let month = value[..2].parse::<u32>().ok()?;
    let short_year = value[3..].parse::<i32>().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    // Same pivot chrono applies to %y: 00-68 land in the 2000s.
    let year = if short_year < 69 {
        2000 + short_year
    } else {
        1900 + short_year
    };
    Some((year, month))
}

pub fn format_month_period(year: i32, month: u32) -> String {
    format!("{month:02}.{:02}", year.rem_euclid(100))
}

pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    if !looks_like_clock_time(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

pub fn looks_like_clock_time(value: &str) -> bool {
    if value.len() != 5 {
        return false;
    }

    let bytes = value.as_bytes();
    if bytes[2] != b':' {
        return false;
    }
    for index in [0usize, 1, 3, 4] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Inclusive (first day, last day) of a calendar month. Returns `None` only
/// for out-of-range months, which callers reject before reaching here.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    Some((first, last))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
