use core::str::{FromStr, Split};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    UnknownPath,
    InvalidValue,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::UnknownPath => "Specified path not exists or invalid",
            Self::InvalidValue => "Value not valid",
        };
        write!(f, "{}", err_string)
    }
}

/// Value part of a `set` command, `None` restores the default of the field
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Value<'a>(pub Option<&'a str>);

impl<'a> Value<'a> {
    pub fn of(string: &'a str) -> Value<'a> {
        Value(Some(string))
    }

    pub fn parse_or<T: FromStr>(&self, or: T) -> Result<T, Error> {
        match self.0 {
            Some(s) => T::from_str(s).map_err(|_| Error::InvalidValue),
            None => Ok(or),
        }
    }

    /// Like `parse_or`, rejecting NaN and infinities
    pub fn parse_finite_or(&self, or: f32) -> Result<f32, Error> {
        let value: f32 = self.parse_or(or)?;
        match value.is_finite() {
            true => Ok(value),
            false => Err(Error::InvalidValue),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Path<'a>(Split<'a, char>);

impl<'a> Path<'a> {
    pub fn str(&mut self) -> Result<&'a str, Error> {
        self.0.next().ok_or(Error::UnknownPath)
    }
}

impl<'a> From<&'a str> for Path<'a> {
    fn from(string: &'a str) -> Self {
        Self(string.split('.'))
    }
}

pub trait PathSet {
    fn set(&mut self, path: Path, value: Value) -> Result<(), Error>;
}
