//! Conversion between user-facing decimal opacity and native units.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::{Error, Result};

/// Fully opaque, in native units (`0xffffffff`).
pub const MAX_OPACITY: u32 = u32::MAX;

/// Opacity in the native 32-bit domain of `_NET_WM_WINDOW_OPACITY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Opacity(u32);

impl Opacity {
    /// Fully opaque.
    pub const OPAQUE: Self = Self(MAX_OPACITY);

    /// Wrap a native value.
    pub const fn from_native(value: u32) -> Self {
        Self(value)
    }

    /// Convert a decimal in `[0, 1]`, rounding to the nearest native unit.
    pub fn from_decimal(decimal: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&decimal) {
            return Err(Error::InvalidOpacity(decimal.to_string()));
        }
        // In range, so the product is within [0, u32::MAX].
        Ok(Self((decimal * f64::from(MAX_OPACITY)).round() as u32))
    }

    /// Native value.
    pub const fn native(self) -> u32 {
        self.0
    }

    /// Decimal value in `[0, 1]`.
    pub fn as_decimal(self) -> f64 {
        f64::from(self.0) / f64::from(MAX_OPACITY)
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl Display for Opacity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Opacity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let decimal: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidOpacity(s.to_string()))?;
        Self::from_decimal(decimal)
    }
}

/// Convert a decimal opacity to native units.
pub fn format_opacity(decimal: f64) -> Result<u32> {
    Opacity::from_decimal(decimal).map(Opacity::native)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(format_opacity(0.0).unwrap(), 0);
        assert_eq!(format_opacity(1.0).unwrap(), 4_294_967_295);
    }

    #[test]
    fn rounds_to_nearest() {
        // 0.5 * 0xffffffff = 2147483647.5
        assert_eq!(format_opacity(0.5).unwrap(), 2_147_483_648);
        for d in [0.1, 0.25, 0.9, 0.999] {
            let want = (d * 4_294_967_295.0_f64).round() as u32;
            assert_eq!(format_opacity(d).unwrap(), want, "decimal {d}");
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        for d in [1.5, -0.1, 1.000_001, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(format_opacity(d), Err(Error::InvalidOpacity(_))),
                "decimal {d}"
            );
        }
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("1.0".parse::<Opacity>().unwrap(), Opacity::OPAQUE);
        assert_eq!(" 0 ".parse::<Opacity>().unwrap().native(), 0);
        assert!("half".parse::<Opacity>().is_err());
        assert!("1.5".parse::<Opacity>().is_err());
    }

    #[test]
    fn decimal_view() {
        assert_eq!(Opacity::OPAQUE.as_decimal(), 1.0);
        assert_eq!(Opacity::from_native(0).as_decimal(), 0.0);
        assert!(!Error::InvalidOpacity("2".into()).to_string().is_empty());
    }
}
