use crate::error::ParseHtmlError;
use crate::helpers::parse_price_text;
use crate::response::{Cart, CartLine, CountryOption, GameStatus};
use crate::types::{AppId, WalletAmount};
use scraper::{Html, Selector, ElementRef};
use url::Url;

fn selector(selectors: &str) -> Result<Selector, ParseHtmlError> {
    Selector::parse(selectors).map_err(|_error| ParseHtmlError::ParseSelector)
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether an element is rendered. The store hides state markers with an
/// inline `display: none` rather than removing them.
fn is_shown(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("style")
        .map(|style| !style.contains("display: none"))
        .unwrap_or(true)
}

pub fn parse_cart_page(body: &str) -> Result<Cart, ParseHtmlError> {
    let fragment = Html::parse_document(body);
    let row_selector = selector(".cart_row")?;
    let title_selector = selector(".cart_item_title a")?;
    let price_selector = selector(".cart_item_price .price")?;
    let total_selector = selector("#cart_estimated_total")?;
    let self_selector = selector(r#"a[href*="purchasetype=self"]"#)?;
    let gift_selector = selector(r#"a[href*="purchasetype=gift"]"#)?;
    let mut lines = Vec::new();

    for row in fragment.select(&row_selector) {
        let title = row.select(&title_selector).next()
            .ok_or(ParseHtmlError::Malformed("Cart row without a title"))?;
        let name = element_text(title);
        let path = title.value().attr("href")
            .map(item_path)
            .unwrap_or_default();
        let price = row.select(&price_selector).next()
            // free items carry no numeric price
            .and_then(|element| parse_price_text(&element_text(element)))
            .unwrap_or(0);

        lines.push(CartLine {
            path,
            name,
            price,
        });
    }

    if lines.is_empty() {
        return Ok(Cart::default());
    }

    let total_price = fragment.select(&total_selector).next()
        .and_then(|element| parse_price_text(&element_text(element)))
        .unwrap_or_else(|| lines.iter().map(|line| line.price).sum());

    Ok(Cart {
        lines,
        total_price,
        allows_self_purchase: fragment.select(&self_selector).next().is_some(),
        allows_gift_purchase: fragment.select(&gift_selector).next().is_some(),
    })
}

/// The catalog path of an item link, e.g. "/sub/54029".
fn item_path(href: &str) -> String {
    Url::parse(href)
        .map(|url| url.path().trim_end_matches('/').to_string())
        .unwrap_or_else(|_| href.to_string())
}

pub fn parse_country_options(body: &str) -> Result<Vec<CountryOption>, ParseHtmlError> {
    let fragment = Html::parse_document(body);
    let option_selector = selector("#usecountry option")?;
    let countries = fragment.select(&option_selector)
        .filter_map(|option| {
            let code = option.value().attr("value")?;

            if code.is_empty() {
                return None;
            }

            Some(CountryOption {
                code: code.to_string(),
                name: element_text(option),
                current: option.value().attr("selected").is_some(),
            })
        })
        .collect();

    Ok(countries)
}

pub fn parse_app_page(appid: AppId, body: &str) -> Result<GameStatus, ParseHtmlError> {
    let fragment = Html::parse_document(body);
    let name_selector = selector("#appHubAppName")?;
    let wishlist_selector = selector("#add_to_wishlist_area_success")?;
    let follow_selector = selector(".queue_btn_follow .queue_btn_active")?;
    let owned_selector = selector(".game_area_already_owned")?;
    let name = fragment.select(&name_selector).next()
        .map(element_text)
        .ok_or(ParseHtmlError::Malformed("Missing app name"))?;
    let in_wishlist = fragment.select(&wishlist_selector).next()
        .map(is_shown)
        .unwrap_or(false);
    let followed = fragment.select(&follow_selector).next()
        .map(is_shown)
        .unwrap_or(false);
    let owned = fragment.select(&owned_selector).next().is_some();

    Ok(GameStatus {
        appid,
        name,
        in_wishlist,
        followed,
        owned,
    })
}

pub fn parse_wallet_balance(body: &str) -> Result<WalletAmount, ParseHtmlError> {
    let fragment = Html::parse_document(body);
    let balance_selector = selector("#header_wallet_balance")?;
    let text = fragment.select(&balance_selector).next()
        .map(element_text)
        .ok_or(ParseHtmlError::Malformed("Missing wallet balance"))?;

    parse_price_text(&text)
        .ok_or(ParseHtmlError::Malformed("Wallet balance is not a price"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cart_page() {
        let cart = parse_cart_page(include_str!("fixtures/cart.html")).unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].name, "Prime Status Upgrade");
        assert_eq!(cart.lines[0].path, "/sub/54029");
        assert_eq!(cart.lines[0].price, 1499);
        assert_eq!(cart.lines[1].path, "/bundle/232");
        assert_eq!(cart.lines[1].price, 936);
        assert_eq!(cart.total_price, 2435);
        assert!(cart.allows_self_purchase);
        assert!(cart.allows_gift_purchase);
    }

    #[test]
    fn parses_an_empty_cart_page() {
        let cart = parse_cart_page("<html><body><div class=\"cart_area_body\"></div></body></html>").unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price, 0);
    }

    #[test]
    fn parses_country_options() {
        let countries = parse_country_options(include_str!("fixtures/cart.html")).unwrap();

        assert_eq!(countries.len(), 3);
        assert_eq!(countries[0].code, "US");
        assert_eq!(countries[0].name, "United States");
        assert!(countries[0].current);
        assert_eq!(countries[1].code, "DE");
        assert!(!countries[1].current);
    }

    #[test]
    fn parses_app_page() {
        let status = parse_app_page(440, include_str!("fixtures/app_page.html")).unwrap();

        assert_eq!(status.name, "Team Fortress 2");
        assert!(status.in_wishlist);
        assert!(status.followed);
        assert!(status.owned);
    }

    #[test]
    fn parses_wallet_balance() {
        let balance = parse_wallet_balance(include_str!("fixtures/account.html")).unwrap();

        assert_eq!(balance, 12050);
    }
}
