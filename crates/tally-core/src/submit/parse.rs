use crate::dates::{looks_like_entry_date, parse_clock_time, parse_entry_date};
use crate::store::EntryKind;
use crate::{LedgerError, LedgerResult};

/// Glyph users may append to the amount field; stripped before the digits
/// are interpreted.
pub const CURRENCY_GLYPH: char = '₽';

/// A validated submission, not yet deduplicated or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: EntryKind,
    pub date: String,
    pub user_tag: String,
    pub time: String,
    pub amount: String,
}

/// Parses the submission grammar:
/// `[#]<kind>/<DD.MM.YY>/<@tag>/<HH:MM>/<amount>[glyph]`.
///
/// Any deviation is a `submission_format` error carrying a corrective
/// example; there is no partial recovery.
pub fn parse_submission(text: &str) -> LedgerResult<Submission> {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let fields: Vec<&str> = body.split('/').collect();
    let [kind_field, date_field, tag_field, time_field, amount_field] = fields.as_slice() else {
        return Err(LedgerError::submission_format(text));
    };

    let Some(kind) = EntryKind::parse(kind_field) else {
        return Err(LedgerError::submission_format(text));
    };

    if !looks_like_entry_date(date_field) || parse_entry_date(date_field).is_none() {
        return Err(LedgerError::submission_format(text));
    }

    if !is_valid_user_tag(tag_field) {
        return Err(LedgerError::submission_format(text));
    }

    if parse_clock_time(time_field).is_none() {
        return Err(LedgerError::submission_format(text));
    }

    let Some(amount) = normalize_amount(amount_field) else {
        return Err(LedgerError::submission_format(text));
    };

    Ok(Submission {
        kind,
        date: (*date_field).to_string(),
        user_tag: (*tag_field).to_string(),
        time: (*time_field).to_string(),
        amount,
    })
}

/// `@` followed by at least one word character.
pub fn is_valid_user_tag(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('@') else {
        return false;
    };
    !rest.is_empty()
        && rest
            .chars()
            .all(|character| character.is_alphanumeric() || character == '_')
}

/// Strips the currency glyph and every `.`/`,` separator, yielding a pure
/// digit string. "7.000" and "7000" deliberately collapse to the same
/// value; the separators are thousands markers, not decimal points.
pub fn normalize_amount(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let without_glyph = trimmed.strip_suffix(CURRENCY_GLYPH).unwrap_or(trimmed);

    let mut digits = String::with_capacity(without_glyph.len());
    for character in without_glyph.chars() {
        if character == '.' || character == ',' {
            continue;
        }
        if !character.is_ascii_digit() {
            return None;
        }
        digits.push(character);
    }

    if digits.is_empty() {
        return None;
    }
    Some(digits)
}
