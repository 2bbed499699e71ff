use strum_macros::Display;

/// The store catalog item kinds addressable by numeric ID, plus the marker
/// for tokens that failed to parse.
#[derive(Display, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ItemKind {
    App,
    Sub,
    Bundle,
    /// The token was not a valid identifier for the calling command.
    Error,
}
