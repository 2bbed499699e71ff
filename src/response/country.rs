/// One shipping/billing country offered by the cart page. The set is
/// replaced wholesale on each query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOption {
    /// The two-letter country code.
    pub code: String,
    pub name: String,
    /// Whether this is the account's current selection.
    pub current: bool,
}
