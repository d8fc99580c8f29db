use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

crate::impls::impl_scalar_reflect! {
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    DateTime<Utc> => DateTimeUtc,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::Reflect;
    use crate::info::{Scalar, Typed};

    #[test]
    fn dates_are_scalars() {
        assert_eq!(NaiveDate::type_info().as_scalar(), Some(Scalar::Date));

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date.reflect_display().as_deref(), Some("2024-02-29"));
    }
}
