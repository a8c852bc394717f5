//! Validated conversion parameters
//!
//! Every value that reaches the pipeline goes through one of these types, so
//! an out-of-range stride or a non-power-of-two side length is rejected before
//! a single frame is decoded.

use crate::transform::default_side;
use crate::{Error, Result};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Side length of one animation tile; always a positive power of two
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution(u32);

impl Resolution {
    /// Validates an explicit side length
    pub fn new(side: i64) -> Result<Self> {
        if side <= 0 {
            return Err(Error::invalid_parameter(
                "the resolution must be bigger than 0",
            ));
        }
        let side = u32::try_from(side)
            .map_err(|_| Error::invalid_parameter(format!("the resolution {side} is too large")))?;
        if !side.is_power_of_two() {
            return Err(Error::invalid_parameter(format!(
                "the resolution must be a power of 2, got {side}"
            )));
        }
        Ok(Self(side))
    }

    /// Largest power-of-two side that fits inside a `width x height` frame
    pub fn for_source(width: u32, height: u32) -> Result<Self> {
        default_side(width, height).map(Self)
    }

    /// Returns the side length in pixels
    pub fn side(self) -> u32 {
        self.0
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_integer(s, "resolution")?)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frame-reduction factor: keep every `n`th decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride(NonZeroU32);

impl Stride {
    /// Validates a stride; anything below 1 is rejected
    pub fn new(n: i64) -> Result<Self> {
        if n <= 0 {
            return Err(Error::invalid_parameter("the stride must be bigger than 0"));
        }
        u32::try_from(n)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| Error::invalid_parameter(format!("the stride {n} is too large")))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns true when the frame at `index` is part of the sample
    pub fn selects(self, index: u64) -> bool {
        index % u64::from(self.get()) == 0
    }
}

impl Default for Stride {
    fn default() -> Self {
        Self(NonZeroU32::MIN)
    }
}

impl FromStr for Stride {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_integer(s, "stride")?)
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for one video-to-animation conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    /// Explicit tile side length (None = derive from the source dimensions)
    pub resolution: Option<Resolution>,
    /// Keep every `stride`th frame
    pub stride: Stride,
}

/// Parses user text as an integer, accepting integral decimals like "16.0"
fn parse_integer(s: &str, what: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(value) = s.parse::<i64>() {
        return Ok(value);
    }
    let value: f64 = s
        .parse()
        .map_err(|_| Error::invalid_parameter(format!("the {what} must be a number, got {s:?}")))?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::invalid_parameter(format!(
            "the {what} must be an integer, got {s:?}"
        )));
    }
    if value.abs() > i64::MAX as f64 {
        return Err(Error::invalid_parameter(format!("the {what} {s} is too large")));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid<T: fmt::Debug>(result: Result<T>) -> bool {
        matches!(result, Err(Error::InvalidParameter(_)))
    }

    #[test]
    fn test_resolution_accepts_powers_of_two() {
        for side in [1, 2, 16, 64, 1024] {
            assert_eq!(Resolution::new(side).unwrap().side(), side as u32);
        }
        assert_eq!("32".parse::<Resolution>().unwrap().side(), 32);
        assert_eq!(" 128 ".parse::<Resolution>().unwrap().side(), 128);
        assert_eq!("16.0".parse::<Resolution>().unwrap().side(), 16);
    }

    #[test]
    fn test_resolution_rejects_invalid_values() {
        assert!(is_invalid(Resolution::new(0)));
        assert!(is_invalid(Resolution::new(-16)));
        assert!(is_invalid(Resolution::new(100)));
        assert!(is_invalid(Resolution::new(3)));
        assert!(is_invalid(Resolution::new(1 << 40)));
        assert!(is_invalid("abc".parse::<Resolution>()));
        assert!(is_invalid("16.5".parse::<Resolution>()));
        assert!(is_invalid("".parse::<Resolution>()));
    }

    #[test]
    fn test_resolution_error_messages_are_distinct() {
        let msg = |s: &str| s.parse::<Resolution>().unwrap_err().to_string();
        assert!(msg("x").contains("must be a number"));
        assert!(msg("2.5").contains("must be an integer"));
        assert!(msg("0").contains("bigger than 0"));
        assert!(msg("12").contains("power of 2"));
    }

    #[test]
    fn test_resolution_for_source() {
        assert_eq!(Resolution::for_source(100, 300).unwrap().side(), 64);
        assert_eq!(Resolution::for_source(64, 64).unwrap().side(), 64);
        assert_eq!(Resolution::for_source(1, 9).unwrap().side(), 1);
        assert!(matches!(
            Resolution::for_source(0, 0),
            Err(Error::MalformedFrame { .. })
        ));
    }

    #[test]
    fn test_stride_validation() {
        assert_eq!(Stride::new(1).unwrap().get(), 1);
        assert_eq!("3".parse::<Stride>().unwrap().get(), 3);
        assert!(is_invalid(Stride::new(0)));
        assert!(is_invalid(Stride::new(-2)));
        assert!(is_invalid("-1".parse::<Stride>()));
        assert!(is_invalid("two".parse::<Stride>()));
        assert!(is_invalid("1.5".parse::<Stride>()));
    }

    #[test]
    fn test_stride_selects_multiples() {
        let stride = Stride::new(3).unwrap();
        let picked: Vec<u64> = (0..10).filter(|&i| stride.selects(i)).collect();
        assert_eq!(picked, vec![0, 3, 6, 9]);
        assert!((0..5).all(|i| Stride::default().selects(i)));
    }

    #[test]
    fn test_config_default() {
        let config = ConversionConfig::default();
        assert!(config.resolution.is_none());
        assert_eq!(config.stride.get(), 1);
    }
}
