use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::Display;

/// Result codes used by store endpoints. Codes not listed here are decoded
/// as [`EResult::Invalid`].
#[derive(Default, Serialize_repr, Deserialize_repr, Display, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum EResult {
    #[default]
    Invalid = 0,
    OK = 1,
    Fail = 2,
    NoConnection = 3,
    InvalidPassword = 5,
    Busy = 10,
    InvalidState = 11,
    AccessDenied = 15,
    Timeout = 16,
    ServiceUnavailable = 20,
    Pending = 22,
    InsufficientFunds = 24,
    LimitExceeded = 25,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_primitive() {
        assert_eq!(EResult::try_from(1u8).unwrap(), EResult::OK);
        assert_eq!(EResult::try_from(2u8).unwrap(), EResult::Fail);
        assert!(EResult::try_from(200u8).is_err());
    }
}
