//! Error macros for kpoint

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::KpointError::invalid_value($context, $value))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::KpointError::UsageError($msg.to_string()))
    };
}

/// Macro for creating catalog validation errors
#[macro_export]
macro_rules! bail_catalog {
    ($($arg:tt)*) => {
        return Err($crate::error::KpointError::invalid_catalog(format!($($arg)*)))
    };
}
