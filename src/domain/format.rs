//! Display lines for a place.
//!
//! Each dropdown row shows two lines built from a [`Placemark`]: the street line
//! (house number and street) and the locality line (district, city, state).
//! Absent fields are skipped entirely, so a separator never sits next to a
//! missing field.

use crate::domain::Placemark;

/// Formats the street line: `sub_thoroughfare` then `thoroughfare`, joined by a
/// single space.
///
/// Returns an empty string when both are absent.
///
/// # Examples
///
/// ```
/// use mapcomplete::domain::{format_street_line, Placemark};
///
/// let pm = Placemark {
///     sub_thoroughfare: Some("123".into()),
///     thoroughfare: Some("Main St".into()),
///     ..Default::default()
/// };
/// assert_eq!(format_street_line(&pm), "123 Main St");
///
/// let street_only = Placemark { thoroughfare: Some("Main St".into()), ..Default::default() };
/// assert_eq!(format_street_line(&street_only), "Main St");
/// ```
#[must_use]
pub fn format_street_line(placemark: &Placemark) -> String {
    [&placemark.sub_thoroughfare, &placemark.thoroughfare]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the locality line.
///
/// Each present field contributes its own prefix: `" "` before
/// `sub_locality`, `", "` before `locality`, `" "` before
/// `administrative_area`.
///
/// # Examples
///
/// ```
/// use mapcomplete::domain::{format_locality_line, Placemark};
///
/// let pm = Placemark {
///     locality: Some("Springfield".into()),
///     administrative_area: Some("IL".into()),
///     ..Default::default()
/// };
/// assert_eq!(format_locality_line(&pm), ", Springfield IL");
/// ```
#[must_use]
pub fn format_locality_line(placemark: &Placemark) -> String {
    let mut line = String::new();

    if let Some(sub_locality) = &placemark.sub_locality {
        line.push(' ');
        line.push_str(sub_locality);
    }
    if let Some(locality) = &placemark.locality {
        line.push_str(", ");
        line.push_str(locality);
    }
    if let Some(area) = &placemark.administrative_area {
        line.push(' ');
        line.push_str(area);
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(present: bool, value: &str) -> Option<String> {
        present.then(|| value.to_string())
    }

    #[test]
    fn street_line_skips_absent_fields() {
        let both = Placemark {
            sub_thoroughfare: Some("123".into()),
            thoroughfare: Some("Main St".into()),
            ..Placemark::default()
        };
        let number_only = Placemark {
            sub_thoroughfare: Some("123".into()),
            ..Placemark::default()
        };

        assert_eq!(format_street_line(&both), "123 Main St");
        assert_eq!(format_street_line(&number_only), "123");
        assert_eq!(format_street_line(&Placemark::default()), "");
    }

    #[test]
    fn locality_line_matches_row_subtitle() {
        let pm = Placemark {
            sub_thoroughfare: Some("123".into()),
            thoroughfare: Some("Main St".into()),
            locality: Some("Springfield".into()),
            administrative_area: Some("IL".into()),
            ..Placemark::default()
        };
        assert_eq!(format_locality_line(&pm), ", Springfield IL");

        let with_district = Placemark {
            sub_locality: Some("Downtown".into()),
            ..pm
        };
        assert_eq!(format_locality_line(&with_district), " Downtown, Springfield IL");
    }

    #[test]
    fn locality_line_without_city_has_no_comma() {
        let pm = Placemark {
            sub_locality: Some("Downtown".into()),
            administrative_area: Some("IL".into()),
            ..Placemark::default()
        };
        assert_eq!(format_locality_line(&pm), " Downtown IL");
        assert_eq!(format_locality_line(&Placemark::default()), "");
    }

    #[test]
    fn no_separator_next_to_an_absent_field() {
        for mask in 0u8..32 {
            let pm = Placemark {
                sub_thoroughfare: field(mask & 1 != 0, "12"),
                thoroughfare: field(mask & 2 != 0, "Elm St"),
                sub_locality: field(mask & 4 != 0, "Old Town"),
                locality: field(mask & 8 != 0, "Shelbyville"),
                administrative_area: field(mask & 16 != 0, "IL"),
            };

            let street = format_street_line(&pm);
            assert!(!street.contains("  "), "double space in {street:?}");
            assert!(!street.starts_with(' ') && !street.ends_with(' '), "padding in {street:?}");

            let locality = format_locality_line(&pm);
            assert!(!locality.contains("  "), "double space in {locality:?}");
            assert!(!locality.ends_with(' '), "trailing space in {locality:?}");
            assert_eq!(locality.contains(", "), pm.locality.is_some(), "comma in {locality:?}");
        }
    }
}
