use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PduParseErr {
    InvalidMessageType { expected: u64, found: u64 },
    BufferEnded { field: Option<&'static str> },
    InvalidValue { field: &'static str, value: u64 },
    InconsistentLength { expected: usize, found: usize },
    Inconsistency { field: &'static str, reason: &'static str },
    NotImplemented { field: Option<&'static str> },
}

impl fmt::Display for PduParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PduParseErr::InvalidMessageType { expected, found } =>
                write!(f, "invalid message type {:#04x}, expected {:#04x}", found, expected),
            PduParseErr::BufferEnded { field } =>
                write!(f, "buffer ended while reading {}", field.unwrap_or("<unnamed>")),
            PduParseErr::InvalidValue { field, value } =>
                write!(f, "invalid value {} for {}", value, field),
            PduParseErr::InconsistentLength { expected, found } =>
                write!(f, "inconsistent length: expected {}, found {}", expected, found),
            PduParseErr::Inconsistency { field, reason } =>
                write!(f, "inconsistent {}: {}", field, reason),
            PduParseErr::NotImplemented { field } =>
                write!(f, "not implemented: {}", field.unwrap_or("<unnamed>")),
        }
    }
}

impl std::error::Error for PduParseErr {}

/// Checks whether a message type value matches the expected value. If not, returns PduParseErr::InvalidMessageType
#[macro_export]
macro_rules! expect_message_type {
    ($value:expr, $expected:expr) => {{
        let raw_expected = $expected.into_raw();
        if $value == raw_expected {
            Ok(())
        } else {
            Err(PduParseErr::InvalidMessageType {
                expected: raw_expected as u64,
                found: $value,
            })
        }
    }};
}

/// Checks whether a value matches an expected value. If not, returns PduParseErr::InvalidValue
#[macro_export]
macro_rules! expect_value {
    ($value:ident, $expected:expr) => {
        $crate::expect_value!(@inner $value, $expected, stringify!($value))
    };
    ($value:expr, $expected:expr, $field:expr) => {
        $crate::expect_value!(@inner $value, $expected, $field)
    };

    (@inner $value:expr, $expected:expr, $field:expr) => {{
        let val = $value;
        if val == $expected {
            Ok(())
        } else {
            Err(PduParseErr::InvalidValue {
                field: $field,
                value: val.into(),
            })
        }
    }};
}

#[macro_export]
macro_rules! let_field {
    ($buf:expr, $ident:ident, $bits:expr) => {
        let $ident = $buf.read_field($bits, stringify!($ident))?;
    };
}
