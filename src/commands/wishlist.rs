//! Wishlist and store-page commands.

use super::{format_bot_response, respond_for_bots};
use crate::bot::Bot;
use crate::enums::{AccessLevel, EResult, ItemKind};
use crate::error::Error;
use crate::messages;
use crate::registry::BotRegistry;
use crate::request::parse_store_items;

const REQUIRED_ACCESS: AccessLevel = AccessLevel::Operator;

/// Wishlist commands address apps only.
const WISHLIST_KINDS: &[ItemKind] = &[ItemKind::App];

enum WishlistAction {
    Add,
    Remove,
    Follow,
    Unfollow,
}

/// Adds the apps in a token list to the bot's wishlist.
pub async fn add(bot: &Bot, access: AccessLevel, query: &str) -> Option<String> {
    wishlist_command(bot, access, query, WishlistAction::Add).await
}

/// Removes the apps in a token list from the bot's wishlist.
pub async fn remove(bot: &Bot, access: AccessLevel, query: &str) -> Option<String> {
    wishlist_command(bot, access, query, WishlistAction::Remove).await
}

/// Follows the apps in a token list.
pub async fn follow(bot: &Bot, access: AccessLevel, query: &str) -> Option<String> {
    wishlist_command(bot, access, query, WishlistAction::Follow).await
}

/// Unfollows the apps in a token list.
pub async fn unfollow(bot: &Bot, access: AccessLevel, query: &str) -> Option<String> {
    wishlist_command(bot, access, query, WishlistAction::Unfollow).await
}

async fn wishlist_command(
    bot: &Bot,
    access: AccessLevel,
    query: &str,
    action: WishlistAction,
) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let items = parse_store_items(query, WISHLIST_KINDS, ItemKind::App);
    let mut responses = Vec::with_capacity(items.len());

    for (token, item) in items {
        if item.is_error() {
            responses.push(format_bot_response(bot, &messages::invalid_token(&token)));
            continue;
        }

        let result = match action {
            WishlistAction::Add => bot.api.add_to_wishlist(item.id).await,
            WishlistAction::Remove => bot.api.remove_from_wishlist(item.id).await,
            WishlistAction::Follow => bot.api.follow_game(item.id, true).await,
            WishlistAction::Unfollow => bot.api.follow_game(item.id, false).await,
        };
        let line = match result {
            Ok(true) => messages::token_result(&token, EResult::OK),
            Ok(false) => messages::token_result(&token, EResult::Fail),
            Err(error) => {
                log::warn!("{}: Wishlist request for {} failed: {}", bot.name, token, error);
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

/// Adds apps to the wishlists of every bot a pattern resolves to.
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

/// Removes apps from the wishlists of every bot a pattern resolves to.
pub async fn remove_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    query: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        remove(&bot, access, query).await
    }).await
}

/// Follows apps on every bot a pattern resolves to.
pub async fn follow_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    query: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        follow(&bot, access, query).await
    }).await
}

/// Unfollows apps on every bot a pattern resolves to.
pub async fn unfollow_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    query: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        unfollow(&bot, access, query).await
    }).await
}

/// Reports each app's wishlist/follow/ownership state as seen from its
/// store page.
pub async fn check(bot: &Bot, access: AccessLevel, query: &str) -> Option<String> {
    if access < REQUIRED_ACCESS {
        return None;
    }

    if !bot.is_connected_and_logged_on() {
        return Some(format_bot_response(bot, messages::BOT_NOT_CONNECTED));
    }

    let items = parse_store_items(query, WISHLIST_KINDS, ItemKind::App);
    let mut responses = Vec::with_capacity(items.len());

    for (token, item) in items {
        if item.is_error() {
            responses.push(format_bot_response(bot, &messages::invalid_token(&token)));
            continue;
        }

        let line = match bot.api.get_game_status(item.id).await {
            Ok(status) => messages::token_text(&token, &messages::game_status_line(
                &status.name,
                status.in_wishlist,
                status.followed,
                status.owned,
            )),
            Err(Error::Response(message)) => messages::token_text(&token, &message),
            Err(error) => {
                log::warn!("{}: Failed to check {}: {}", bot.name, token, error);
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

/// Checks apps on every bot a pattern resolves to.
pub async fn check_for_bots(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    query: &str,
) -> Result<Option<String>, Error> {
    respond_for_bots(registry, access, bot_names, |bot| async move {
        check(&bot, access, query).await
    }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_fail_closed_below_their_access_level() {
        let bot = Bot::builder("alice").build();

        assert_eq!(add(&bot, AccessLevel::Guest, "440").await, None);
        assert_eq!(remove(&bot, AccessLevel::Guest, "440").await, None);
        assert_eq!(follow(&bot, AccessLevel::Guest, "440").await, None);
        assert_eq!(check(&bot, AccessLevel::Guest, "440").await, None);
    }

    #[tokio::test]
    async fn non_app_tokens_are_invalid() {
        let bot = Bot::builder("alice").connected(true).build();

        bot.api.set_cookies(&[]);

        let response = add(&bot, AccessLevel::Operator, "sub/10,b/3").await.unwrap();
        let lines = response.lines().collect::<Vec<_>>();

        assert_eq!(lines, vec![
            "<alice> sub/10 is invalid",
            "<alice> b/3 is invalid",
        ]);
    }
}
