//! Display formatting for entity timestamps.

use time::OffsetDateTime;

/// Render a timestamp for display according to a mode tag.
///
/// `"short"` yields `DD/MM/YYYY`; `"full"` yields the long Spanish form
/// `DD de MM de YYYY` with a numeric month. A missing value or an
/// unrecognised mode yields the empty string. Total; never panics.
pub fn format_datetime(value: Option<OffsetDateTime>, mode: &str) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let day = value.day();
    let month = u8::from(value.month());
    let year = value.year();

    match mode {
        "short" => format!("{day:02}/{month:02}/{year:04}"),
        // The month stays numeric in the long form.
        "full" => format!("{day:02} de {month:02} de {year:04}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::format_datetime;

    #[test]
    fn missing_value_yields_empty_string() {
        assert_eq!(format_datetime(None, "short"), "");
        assert_eq!(format_datetime(None, "full"), "");
        assert_eq!(format_datetime(None, "anything"), "");
    }

    #[test]
    fn short_mode_renders_numeric_date() {
        let value = datetime!(2026-03-05 09:30 UTC);
        assert_eq!(format_datetime(Some(value), "short"), "05/03/2026");
    }

    #[test]
    fn full_mode_keeps_numeric_month() {
        let value = datetime!(2026-11-21 17:00 UTC);
        assert_eq!(format_datetime(Some(value), "full"), "21 de 11 de 2026");
    }

    #[test]
    fn unrecognised_mode_yields_empty_string() {
        let value = datetime!(2026-03-05 09:30 UTC);
        assert_eq!(format_datetime(Some(value), "long"), "");
        assert_eq!(format_datetime(Some(value), ""), "");
    }
}
