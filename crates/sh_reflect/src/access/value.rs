use crate::Reflect;
use crate::info::{Scalar, TypeInfo, TypeKind};

/// Formats a value for display.
///
/// Dates print in their short form (`%Y-%m-%d`), `Option` prints its inner
/// value, and every other type uses [`Reflect::reflect_display`]. Returns
/// `None` for `None` and for types without a display form.
///
/// ```
/// use sh_reflect::access::print_value;
///
/// assert_eq!(print_value(&42_u8).as_deref(), Some("42"));
/// assert_eq!(print_value(&Some(1.5_f32)).as_deref(), Some("1.5"));
/// assert_eq!(print_value(&None::<i32>), None);
/// assert_eq!(print_value(&vec![1_u8]), None);
/// ```
pub fn print_value(value: &dyn Reflect) -> Option<String> {
    let info = value.reflect_type_info();
    match info.kind() {
        TypeKind::Nullable(nullable) => print_value(nullable.unwrap(value)?),
        TypeKind::Scalar(scalar) if scalar.is_date() => print_date(value, *scalar),
        _ => value.reflect_display(),
    }
}

#[cfg(feature = "chrono")]
fn print_date(value: &dyn Reflect, scalar: Scalar) -> Option<String> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    const SHORT: &str = "%Y-%m-%d";

    let date = match scalar {
        Scalar::Date => *value.downcast_ref::<NaiveDate>()?,
        Scalar::DateTime => value.downcast_ref::<NaiveDateTime>()?.date(),
        Scalar::DateTimeUtc => value.downcast_ref::<DateTime<Utc>>()?.date_naive(),
        _ => return value.reflect_display(),
    };
    Some(date.format(SHORT).to_string())
}

#[cfg(not(feature = "chrono"))]
fn print_date(value: &dyn Reflect, _scalar: Scalar) -> Option<String> {
    value.reflect_display()
}

/// Builds the default value of the described type.
///
/// `String` yields the empty string. Returns `None` for types without a
/// default, such as arrays or structs not marked `#[reflect(default)]`.
///
/// ```
/// use sh_reflect::{access::create_new, info::Typed};
///
/// let value = create_new(String::type_info()).unwrap();
/// assert_eq!(value.take::<String>().unwrap(), "");
/// ```
#[inline]
pub fn create_new(info: &TypeInfo) -> Option<Box<dyn Reflect>> {
    info.create_default()
}

#[cfg(all(test, feature = "chrono"))]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::print_value;

    #[test]
    fn dates_print_short() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(print_value(&date).as_deref(), Some("2023-07-01"));

        let stamp = date.and_hms_opt(13, 45, 0).unwrap();
        assert_eq!(print_value(&stamp).as_deref(), Some("2023-07-01"));
        assert_eq!(print_value(&Some(stamp)).as_deref(), Some("2023-07-01"));

        let utc = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(print_value(&utc).as_deref(), Some("2020-01-02"));
    }
}
