use chrono::{DateTime, NaiveDate, NaiveDateTime};

// Year-first forms are never ambiguous
const YEAR_FIRST_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const YEAR_FIRST_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DAY_FIRST_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"];
const MONTH_FIRST_FORMATS: [&str; 3] = ["%m/%d/%Y", "%m.%d.%Y", "%m-%d-%Y"];
// %y: 00-68 → 20xx, 69-99 → 19xx
const DAY_FIRST_SHORT_YEAR_FORMATS: [&str; 3] = ["%d/%m/%y", "%d.%m.%y", "%d-%m-%y"];
const MONTH_FIRST_SHORT_YEAR_FORMATS: [&str; 3] = ["%m/%d/%y", "%m.%d.%y", "%m-%d-%y"];

const DATE_SEPARATORS: [char; 3] = ['-', '/', '.'];

/// Parses an observation date the way the data portal publishes them.
///
/// Ambiguous numeric dates (`01/02/2023`) are read day-first when `day_first`
/// is set and month-first otherwise. The preferred order is tried first and
/// the other one only when it fails, so `13/25/2023` is never a valid date but
/// `01/13/2023` still resolves to 13 January. A two-digit year is only
/// accepted in the last position (`15.06.21` is 15 June 2021) and a year-first
/// form needs all four digits. A trailing time of day is ignored.
/// Returns `None` for anything that is not a date.
pub fn parse_observation_date(raw: &str, day_first: bool) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    // chrono's %Y takes any digit count, so field widths pick the format family
    if field_len(text.split(DATE_SEPARATORS).next()) == 4 {
        return parse_year_first(text);
    }

    // "01/02/2023 10:15" → date part only
    let date_part = text.split_whitespace().next().unwrap_or(text);
    let (day_month, month_day) = match field_len(date_part.rsplit(DATE_SEPARATORS).next()) {
        4 => (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS),
        2 => (DAY_FIRST_SHORT_YEAR_FORMATS, MONTH_FIRST_SHORT_YEAR_FORMATS),
        _ => return None,
    };
    let (preferred, fallback) = if day_first {
        (day_month, month_day)
    } else {
        (month_day, day_month)
    };

    parse_with(date_part, &preferred).or_else(|| parse_with(date_part, &fallback))
}

fn field_len(field: Option<&str>) -> usize {
    field.map_or(0, str::len)
}

fn parse_year_first(text: &str) -> Option<NaiveDate> {
    parse_with(text, &YEAR_FIRST_DATE_FORMATS).or_else(|| {
        YEAR_FIRST_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|dt| dt.date())
    })
}

fn parse_with(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
