use core::fmt;

// -----------------------------------------------------------------------------
// Scalar

/// The leaf types accessors read and write directly.
///
/// The date and identifier variants are only produced when the `chrono` and
/// `uuid` features are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
    Str,
    /// `chrono::NaiveDate`
    Date,
    /// `chrono::NaiveDateTime`
    DateTime,
    /// `chrono::DateTime<Utc>`
    DateTimeUtc,
    /// `uuid::Uuid`
    Uuid,
}

impl Scalar {
    /// Returns `true` for the integer types.
    #[inline]
    pub const fn is_int_number(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    /// Returns `true` for `f32` and `f64`.
    #[inline]
    pub const fn is_dec_number(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[inline]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::DateTimeUtc)
    }

    #[inline]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::Str)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
