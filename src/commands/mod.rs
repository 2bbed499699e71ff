//! The command surface exposed to a command dispatcher.
//!
//! Every command comes in a single-bot form returning `Option<String>` and a
//! multi-bot form resolving a name pattern. `None` is a first-class outcome
//! meaning "produce no reply" - it is never interchangeable with an empty
//! string. Callers below a command's access level always get `None` so the
//! command's existence is not leaked.

pub mod cart;
pub mod wishlist;

use crate::bot::Bot;
use crate::enums::AccessLevel;
use crate::error::Error;
use crate::messages;
use crate::registry::BotRegistry;
use std::future::Future;
use std::sync::Arc;
use futures::future::join_all;

/// Prefixes a message with the bot it originated from.
pub fn format_bot_response(bot: &Bot, message: &str) -> String {
    format!("<{}> {}", bot.name, message)
}

/// Runs a per-bot operation for every bot a name pattern resolves to.
///
/// The operations run concurrently; results are collected in registry
/// resolution order, empty results are dropped, and the remainder is joined
/// with newlines. When nothing resolves, only `Owner`+ callers are told;
/// everyone else gets no reply.
///
/// An empty pattern is a calling-contract violation.
pub(crate) async fn respond_for_bots<F, Fut>(
    registry: &BotRegistry,
    access: AccessLevel,
    bot_names: &str,
    op: F,
) -> Result<Option<String>, Error>
where
    F: Fn(Arc<Bot>) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    if bot_names.is_empty() {
        return Err(Error::Parameter("bot_names must not be empty"));
    }

    let bots = registry.resolve(bot_names);

    if bots.is_empty() {
        return Ok((access >= AccessLevel::Owner).then(|| messages::bots_not_found(bot_names)));
    }

    let results = join_all(bots.into_iter().map(op)).await;

    Ok(join_responses(results))
}

fn join_responses(results: Vec<Option<String>>) -> Option<String> {
    let responses = results
        .into_iter()
        .flatten()
        .filter(|response| !response.is_empty())
        .collect::<Vec<_>>();

    if responses.is_empty() {
        None
    } else {
        Some(responses.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BotRegistry {
        let registry = BotRegistry::new();

        registry.register(Bot::builder("alice").build());
        registry.register(Bot::builder("bob").build());
        registry
    }

    #[tokio::test]
    async fn all_empty_results_produce_no_reply() {
        let registry = registry();
        let response = respond_for_bots(&registry, AccessLevel::Owner, "all", |_bot| async move {
            None
        }).await.unwrap();

        assert_eq!(response, None);
    }

    #[tokio::test]
    async fn non_empty_results_are_joined_in_resolution_order() {
        let registry = registry();
        let response = respond_for_bots(&registry, AccessLevel::Operator, "bob,alice", |bot| async move {
            Some(format_bot_response(&bot, "pong"))
        }).await.unwrap();

        assert_eq!(response.as_deref(), Some("<alice> pong\n<bob> pong"));
    }

    #[tokio::test]
    async fn partial_results_keep_only_the_responding_bots() {
        let registry = registry();
        let response = respond_for_bots(&registry, AccessLevel::Operator, "all", |bot| async move {
            if bot.name == "bob" {
                Some(format_bot_response(&bot, "pong"))
            } else {
                None
            }
        }).await.unwrap();

        assert_eq!(response.as_deref(), Some("<bob> pong"));
    }

    #[tokio::test]
    async fn unresolved_patterns_are_reported_only_to_owners() {
        let registry = registry();
        let response = respond_for_bots(&registry, AccessLevel::Master, "dave", |_bot| async move {
            Some(String::from("unreachable"))
        }).await.unwrap();

        assert_eq!(response, None);

        let response = respond_for_bots(&registry, AccessLevel::Owner, "dave", |_bot| async move {
            Some(String::from("unreachable"))
        }).await.unwrap();

        assert!(response.unwrap().contains("dave"));
    }

    #[tokio::test]
    async fn an_empty_pattern_is_a_contract_violation() {
        let registry = registry();
        let result = respond_for_bots(&registry, AccessLevel::Owner, "", |_bot| async move {
            None
        }).await;

        assert!(matches!(result, Err(Error::Parameter(_))));
    }
}
