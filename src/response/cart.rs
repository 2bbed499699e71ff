use crate::types::WalletAmount;

/// One line of the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// The item's category label, e.g. "app" or "bundle".
    pub path: String,
    pub name: String,
    /// Price in the wallet currency's minor units.
    pub price: WalletAmount,
}

/// A snapshot of the cart page. Rebuilt fresh on every query.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    /// Total price in the wallet currency's minor units.
    pub total_price: WalletAmount,
    pub allows_self_purchase: bool,
    pub allows_gift_purchase: bool,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
