use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};

/// The caller's permission level. Levels are ordered; a command is available
/// at its required level and above.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, PartialEq, Eq, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum AccessLevel {
    None = 0,
    FamilySharing = 1,
    Guest = 2,
    Operator = 3,
    Master = 4,
    Owner = 5,
}
