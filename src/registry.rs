use crate::bot::Bot;
use std::sync::{Arc, RwLock};

/// The set of registered bots, addressable by name.
///
/// Resolution is case-insensitive and keeps registration order; commands
/// that fan out over several bots report results in this order.
#[derive(Debug, Default)]
pub struct BotRegistry {
    bots: RwLock<Vec<Arc<Bot>>>,
}

impl BotRegistry {
    /// Creates an empty [`BotRegistry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bot, returning the shared handle.
    pub fn register(&self, bot: Bot) -> Arc<Bot> {
        let bot = Arc::new(bot);

        self.bots.write().unwrap().push(Arc::clone(&bot));

        bot
    }

    /// Gets a bot by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<Arc<Bot>> {
        self.bots.read().unwrap()
            .iter()
            .find(|bot| bot.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// All registered bots in registration order.
    pub fn all(&self) -> Vec<Arc<Bot>> {
        self.bots.read().unwrap().clone()
    }

    /// Resolves a comma-separated name pattern to bots.
    ///
    /// Names match case-insensitively and duplicates collapse; the result
    /// keeps registration order regardless of the pattern's order. The
    /// `all`/`ASF` wildcards resolve to every bot. Unknown names resolve to
    /// nothing rather than erroring.
    pub fn resolve(&self, pattern: &str) -> Vec<Arc<Bot>> {
        let tokens = pattern
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();
        let bots = self.bots.read().unwrap();

        if tokens.iter().any(|token| token.eq_ignore_ascii_case("all") || token.eq_ignore_ascii_case("asf")) {
            return bots.clone();
        }

        bots.iter()
            .filter(|bot| tokens.iter().any(|token| bot.name.eq_ignore_ascii_case(token)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BotRegistry {
        let registry = BotRegistry::new();

        registry.register(Bot::builder("alice").build());
        registry.register(Bot::builder("bob").build());
        registry.register(Bot::builder("carol").build());
        registry
    }

    #[test]
    fn gets_bots_case_insensitively() {
        let registry = registry();

        assert!(registry.get("ALICE").is_some());
        assert!(registry.get("dave").is_none());
    }

    #[test]
    fn resolves_patterns_deduplicated_in_registration_order() {
        let registry = registry();
        let bots = registry.resolve("BOB,alice,bob");
        let names = bots.iter().map(|bot| bot.name.as_str()).collect::<Vec<_>>();

        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn resolves_the_all_wildcard() {
        let registry = registry();

        assert_eq!(registry.resolve("all").len(), 3);
        assert_eq!(registry.resolve("ASF").len(), 3);
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        let registry = registry();

        assert!(registry.resolve("dave,erin").is_empty());
    }
}
