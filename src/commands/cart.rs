//! Cart commands.

use super::{format_bot_response, respond_for_bots};
use crate::bot::Bot;
use crate::enums::{AccessLevel, EResult, ItemKind};
use crate::error::Error;
use crate::messages;
use crate::registry::BotRegistry;
use crate::request::parse_store_items;

const REQUIRED_ACCESS: AccessLevel = AccessLevel::Operator;
const PURCHASE_ACCESS: AccessLevel = AccessLevel::Master;

/// The item kinds the cart accepts. Apps are licensed through their subs and
/// cannot be added directly.
const CART_KINDS: &[ItemKind] = &[ItemKind::Sub, ItemKind::Bundle];

/// Reports the bot's cart contents.
pub async fn view(bot: &Bot, access: AccessLevel) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let cart = match bot.api.get_cart().await {
        Ok(cart) => cart,
        Err(error) => {
            log::warn!("{}: Failed to get the cart: {}", bot.name, error);
            return Some(format_bot_response(bot, messages::NETWORK_ERROR));
        },
    };

    if cart.is_empty() {
        return Some(format_bot_response(bot, messages::CART_IS_EMPTY));
    }

    let wallet = bot.wallet();
    let mut responses = vec![
        format_bot_response(bot, &messages::cart_total(cart.total_price, wallet.currency.as_deref())),
    ];

    for line in &cart.lines {
        responses.push(messages::cart_line(line));
    }

    responses.push(format_bot_response(bot, &messages::self_purchase(cart.allows_self_purchase)));
    responses.push(format_bot_response(bot, &messages::gift_purchase(cart.allows_gift_purchase)));

    Some(responses.join("\n"))
}

/// Reports the cart contents of every bot a pattern resolves to.
pub async fn view_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        view(&bot, access).await
    }).await
}

/// Adds the subs and bundles in a token list to the bot's cart, reporting
/// each token independently.
pub async fn add(bot: &Bot, access: AccessLevel, query: &str) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let items = parse_store_items(query, CART_KINDS, ItemKind::Sub);
    let mut responses = Vec::with_capacity(items.len());

    for (token, item) in items {
        if item.is_error() {
            responses.push(format_bot_response(bot, &messages::invalid_token(&token)));
            continue;
        }

        let line = match bot.api.add_to_cart(&item).await {
            Ok(true) => messages::token_result(&token, EResult::OK),
            Ok(false) => messages::token_result(&token, EResult::Fail),
            Err(error) => {
                log::warn!("{}: Failed to add {} to the cart: {}", bot.name, token, error);
                messages::token_text(&token, messages::NETWORK_ERROR)
            },
        };

        responses.push(format_bot_response(bot, &line));
    }

    if responses.is_empty() {
        None
    } else {
        Some(responses.join("\n"))
    }
}

/// Adds items to the carts of every bot a pattern resolves to.
pub async fn add_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    query: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        add(&bot, access, query).await
    }).await
}

/// Empties the bot's cart. A store that did not respond is reported
/// distinctly from one that refused.
pub async fn clear(bot: &Bot, access: AccessLevel) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let response = match bot.api.clear_cart().await {
        Ok(success) => messages::cart_reset(success),
        Err(error) => {
            log::warn!("{}: Failed to clear the cart: {}", bot.name, error);
            messages::EMPTY_RESPONSE.into()
        },
    };

    Some(format_bot_response(bot, &response))
}

/// Empties the carts of every bot a pattern resolves to.
pub async fn clear_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        clear(&bot, access).await
    }).await
}

/// Lists the shipping countries the store offers the bot, marking the
/// current selection.
pub async fn countries(bot: &Bot, access: AccessLevel) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let countries = match bot.api.get_cart_countries().await {
        Ok(countries) => countries,
        Err(error) => {
            log::warn!("{}: Failed to get cart countries: {}", bot.name, error);
            return Some(format_bot_response(bot, messages::NETWORK_ERROR));
        },
    };

    if countries.is_empty() {
        return Some(format_bot_response(bot, messages::NO_COUNTRIES));
    }

    let mut responses = vec![
        format_bot_response(bot, messages::COUNTRIES_HEADER),
    ];

    for country in &countries {
        responses.push(messages::country_line(&country.code, &country.name, country.current));
    }

    Some(responses.join("\n"))
}

/// Lists shipping countries for every bot a pattern resolves to.
pub async fn countries_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        countries(&bot, access).await
    }).await
}

/// Sets the bot's store country. The code goes to the store as-is; whether
/// it is one of the offered countries is the store's call.
pub async fn set_country(bot: &Bot, access: AccessLevel, country_code: &str) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let response = match bot.api.set_country(country_code).await {
        Ok(success) => messages::set_country(success),
        Err(error) => {
            log::warn!("{}: Failed to set country {}: {}", bot.name, country_code, error);
            messages::NETWORK_ERROR.into()
        },
    };

    Some(format_bot_response(bot, &response))
}

/// Sets the store country of every bot a pattern resolves to.
pub async fn set_country_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    country_code: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        set_country(&bot, access, country_code).await
    }).await
}

/// Purchases the bot's cart with wallet funds. Requires a higher access
/// level than every other command.
pub async fn purchase(bot: &Bot, access: AccessLevel) -> Option<String> {
    if access < PURCHASE_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let response = match bot.purchase_cart().await {
        Ok(purchase) => messages::purchase_done(&purchase.formatted_total),
        Err(error) => error.to_string(),
    };

    Some(format_bot_response(bot, &response))
}

/// Purchases the carts of every bot a pattern resolves to.
pub async fn purchase_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        purchase(&bot, access).await
    }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_fail_closed_below_their_access_level() {
        let bot = Bot::builder("alice").build();

        assert_eq!(view(&bot, AccessLevel::Guest).await, None);
        assert_eq!(add(&bot, AccessLevel::Guest, "730").await, None);
        assert_eq!(clear(&bot, AccessLevel::Guest).await, None);
        assert_eq!(countries(&bot, AccessLevel::Guest).await, None);
        assert_eq!(set_country(&bot, AccessLevel::Guest, "US").await, None);
    }

    #[tokio::test]
    async fn purchase_requires_more_than_operator() {
        let bot = Bot::builder("alice").build();

        assert_eq!(purchase(&bot, AccessLevel::Operator).await, None);
        // at the right level the disconnected bot answers instead
        assert!(purchase(&bot, AccessLevel::Master).await.is_some());
    }

    #[tokio::test]
    async fn disconnected_bots_answer_without_web_calls() {
        let bot = Bot::builder("alice").build();
        let response = view(&bot, AccessLevel::Operator).await.unwrap();

        assert_eq!(response, "<alice> This bot instance is not connected!");
    }

    #[tokio::test]
    async fn add_reports_nothing_for_an_empty_token_list() {
        let bot = Bot::builder("alice").connected(true).build();

        bot.api.set_cookies(&[]);

        assert_eq!(add(&bot, AccessLevel::Operator, ",,").await, None);
    }

    #[tokio::test]
    async fn add_skips_invalid_tokens_without_web_calls() {
        // not connected to the network - only error-kind tokens produce
        // lines without touching the store
        let bot = Bot::builder("alice").connected(true).build();

        bot.api.set_cookies(&[]);

        let response = add(&bot, AccessLevel::Operator, "abc,a/10").await.unwrap();
        let lines = response.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "<alice> abc is invalid");
        assert_eq!(lines[1], "<alice> a/10 is invalid");
    }
}
