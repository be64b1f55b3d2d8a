use core::fmt;
use core::str::FromStr;

/// A tab route: a stable, unique key plus the label shown in the tab bar.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabRoute {
    pub key: String,
    pub title: String,
}

impl TabRoute {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// How a platform responds when the header is pulled past the top.
///
/// Selected once when the synchronizer is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlatformFamily {
    /// The list itself is displaced (damped) and acts as the pull-to-refresh visual.
    DirectListPull,
    /// The list stays put; a separate pull signal drives the refresh indicator.
    AuxiliarySignalPull,
}

impl PlatformFamily {
    /// The family matching the compilation target (`DirectListPull` on Apple mobile targets).
    pub const fn current() -> Self {
        if cfg!(any(target_os = "ios", target_os = "tvos", target_os = "visionos")) {
            Self::DirectListPull
        } else {
            Self::AuxiliarySignalPull
        }
    }
}

impl Default for PlatformFamily {
    fn default() -> Self {
        Self::current()
    }
}

/// Measured header height. Unmeasured until the first layout pass reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderHeight {
    #[default]
    Unmeasured,
    Measured(f32),
}

impl HeaderHeight {
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }

    pub fn measured(&self) -> Option<f32> {
        match *self {
            Self::Measured(h) => Some(h),
            Self::Unmeasured => None,
        }
    }

    /// The height used for transforms; `0.0` while unmeasured.
    pub fn value(&self) -> f32 {
        self.measured().unwrap_or(0.0)
    }
}

/// A two-point linear interpolation, clamped at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolation {
    pub input: (f32, f32),
    pub output: (f32, f32),
}

impl Interpolation {
    pub const fn new(input: (f32, f32), output: (f32, f32)) -> Self {
        Self { input, output }
    }

    pub fn sample(&self, value: f32) -> f32 {
        let (in0, in1) = self.input;
        let (out0, out1) = self.output;
        let span = in1 - in0;
        if span == 0.0 || !value.is_finite() {
            return out0;
        }
        let t = ((value - in0) / span).clamp(0.0, 1.0);
        out0 + (out1 - out0) * t
    }
}

/// An sRGB colour with alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("colour must start with '#': {0:?}")]
    MissingHash(String),
    #[error("colour must have 3, 4, 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in colour: {0:?}")]
    BadDigit(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_owned()))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_owned()));
        }
        let nibble = |i: usize| {
            u8::from_str_radix(&digits[i..i + 1], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_owned()))
        };
        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_owned()))
        };
        match digits.len() {
            3 | 4 => {
                let r = nibble(0)? * 0x11;
                let g = nibble(1)? * 0x11;
                let b = nibble(2)? * 0x11;
                let a = if digits.len() == 4 { nibble(3)? * 0x11 } else { 0xFF };
                Ok(Self::rgba(r, g, b, a))
            }
            6 | 8 => {
                let a = if digits.len() == 8 { byte(6)? } else { 0xFF };
                Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
            }
            _ => Err(ColorParseError::BadLength(s.to_owned())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}
