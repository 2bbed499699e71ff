//! User-facing strings.
//!
//! Kept in one place so an embedding application can substitute its own
//! wording or localization on top of the raw command results.

use crate::enums::EResult;
use crate::response::CartLine;
use crate::types::WalletAmount;

pub(crate) const BOT_NOT_CONNECTED: &str = "This bot instance is not connected!";
pub(crate) const CART_IS_EMPTY: &str = "The cart is empty";
pub(crate) const EMPTY_RESPONSE: &str = "The store did not respond";
pub(crate) const NETWORK_ERROR: &str = "Network error";
pub(crate) const NO_COUNTRIES: &str = "No available countries";
pub(crate) const COUNTRIES_HEADER: &str = "Available countries:";

pub(crate) fn flag(value: bool) -> &'static str {
    if value { "√" } else { "×" }
}

/// Formats minor units for display, e.g. 1499 -> "14.99".
pub(crate) fn price(amount: WalletAmount) -> String {
    format!("{:.2}", amount as f64 / 100.0)
}

pub(crate) fn bots_not_found(pattern: &str) -> String {
    format!("Couldn't find any bots matching \"{pattern}\"!")
}

pub(crate) fn cart_total(total: WalletAmount, currency: Option<&str>) -> String {
    format!("Cart total: {} {}", price(total), currency.unwrap_or("(unknown currency)"))
}

pub(crate) fn cart_line(line: &CartLine) -> String {
    format!("{} | {} | {}", line.path, line.name, price(line.price))
}

pub(crate) fn self_purchase(allowed: bool) -> String {
    format!("Self purchase: {}", flag(allowed))
}

pub(crate) fn gift_purchase(allowed: bool) -> String {
    format!("Gift purchase: {}", flag(allowed))
}

pub(crate) fn invalid_token(token: &str) -> String {
    format!("{token} is invalid")
}

pub(crate) fn token_result(token: &str, result: EResult) -> String {
    format!("{token}: {result}")
}

pub(crate) fn token_text(token: &str, text: &str) -> String {
    format!("{token}: {text}")
}

pub(crate) fn cart_reset(success: bool) -> String {
    format!("Cart reset: {}", success_text(success))
}

pub(crate) fn country_line(code: &str, name: &str, current: bool) -> String {
    if current {
        format!("{code} - {name} (current)")
    } else {
        format!("{code} - {name}")
    }
}

pub(crate) fn set_country(success: bool) -> String {
    format!("Set country: {}", success_text(success))
}

pub(crate) fn purchase_done(formatted_total: &str) -> String {
    format!("Purchase finished! Receipt total: {formatted_total}")
}

pub(crate) fn game_status_line(name: &str, in_wishlist: bool, followed: bool, owned: bool) -> String {
    format!(
        "{} | Wishlist: {} | Followed: {} | Owned: {}",
        name,
        flag(in_wishlist),
        flag(followed),
        flag(owned),
    )
}

fn success_text(success: bool) -> &'static str {
    if success { "Success" } else { "Failure" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prices_in_minor_units() {
        assert_eq!(price(1499), "14.99");
        assert_eq!(price(0), "0.00");
        assert_eq!(price(100000), "1000.00");
    }

    #[test]
    fn formats_cart_totals_without_a_known_currency() {
        assert_eq!(cart_total(2435, Some("USD")), "Cart total: 24.35 USD");
        assert_eq!(cart_total(2435, None), "Cart total: 24.35 (unknown currency)");
    }
}
