use crate::api::StoreApi;
use crate::error::{Error, PurchaseError};
use crate::response::FinalPriceResponse;
use crate::types::{TransactionId, WalletAmount};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use async_std::task::sleep;

/// How long to wait after finalizing a transaction before re-reading the
/// wallet to observe the charge.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// A snapshot of an account's wallet.
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    /// Balance in the wallet currency's minor units.
    pub balance: WalletAmount,
    /// The wallet currency code, when known.
    pub currency: Option<String>,
}

/// The record of one completed purchase. Exists only for the duration of the
/// attempt and is dropped once reported.
#[derive(Debug)]
pub struct CompletedPurchase {
    pub transaction_id: TransactionId,
    /// The quote obtained before finalizing. Carried opaquely.
    pub final_price: FinalPriceResponse,
    pub balance_before: WalletAmount,
    pub balance_after: WalletAmount,
    /// The receipt total as displayed by the store.
    pub formatted_total: String,
}

/// A managed store account session.
#[derive(Debug)]
pub struct Bot {
    /// The bot's name, used to address it in commands and to prefix its
    /// responses.
    pub name: String,
    /// The store API bound to this bot's session.
    pub api: StoreApi,
    settle_delay: Duration,
    connected: AtomicBool,
    wallet: RwLock<Wallet>,
}

impl Bot {
    /// Builder for constructing a [`Bot`].
    pub fn builder<T>(name: T) -> BotBuilder
    where
        T: Into<String>,
    {
        BotBuilder::new(name)
    }

    /// Whether this bot is connected and has a session.
    pub fn is_connected_and_logged_on(&self) -> bool {
        self.connected.load(Ordering::Relaxed) && self.api.is_logged_in()
    }

    /// Marks the bot as connected or disconnected. Commands refuse to issue
    /// web calls for disconnected bots.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// The current wallet snapshot.
    pub fn wallet(&self) -> Wallet {
        self.wallet.read().unwrap().clone()
    }

    /// Replaces the wallet snapshot. For embedders that observe balance
    /// changes through their own channels.
    pub fn set_wallet(&self, wallet: Wallet) {
        *self.wallet.write().unwrap() = wallet;
    }

    /// Re-reads the wallet balance from the account page and updates the
    /// snapshot.
    pub async fn refresh_wallet_balance(&self) -> Result<WalletAmount, Error> {
        let balance = self.api.get_wallet_balance().await?;

        self.wallet.write().unwrap().balance = balance;

        Ok(balance)
    }

    /// Purchases the current cart with wallet funds.
    ///
    /// Runs the four-step checkout sequence. Each step aborts the sequence
    /// with its own [`PurchaseError`]; no step is retried. After finalizing,
    /// waits the settling delay and re-reads the wallet: the purchase
    /// succeeded only if the balance dropped. The finalize response's own
    /// status is not authoritative and is only logged.
    ///
    /// On success the cart is cleared as a side effect.
    pub async fn purchase_cart(&self) -> Result<CompletedPurchase, PurchaseError> {
        self.api.checkout().await
            .map_err(PurchaseError::Checkout)?;

        let init = self.api.init_transaction().await
            .map_err(PurchaseError::InitTransaction)?;
        let transid = init.transaction_id()
            .ok_or(PurchaseError::MissingTransactionId)?
            .to_string();
        let final_price = self.api.get_final_price(&transid).await
            .map_err(|error| PurchaseError::FinalPrice(transid.clone(), error))?;
        let balance_before = self.wallet().balance;
        let status = self.api.finalize_transaction(&transid).await
            .map_err(|error| PurchaseError::Finalize(transid.clone(), error))?;

        log::debug!("{}: Transaction {} finalized with status {}", self.name, transid, status.success);

        sleep(self.settle_delay).await;

        let balance_after = match self.refresh_wallet_balance().await {
            Ok(balance) => balance,
            Err(error) => {
                log::warn!("{}: Failed to re-read the wallet balance: {}", self.name, error);
                balance_before
            },
        };

        if !wallet_was_charged(balance_before, balance_after) {
            return Err(PurchaseError::NotCharged);
        }

        // the purchase went through - the cart is stale now
        if let Err(error) = self.api.clear_cart().await {
            log::warn!("{}: Failed to clear the cart after purchase: {}", self.name, error);
        }

        let formatted_total = status.formatted_total()
            .map(|total| total.to_string())
            .or_else(|| final_price.formatted_total.clone())
            .unwrap_or_else(|| format!("{:.2}", final_price.total as f64 / 100.0));

        Ok(CompletedPurchase {
            transaction_id: transid,
            final_price,
            balance_before,
            balance_after,
            formatted_total,
        })
    }
}

/// Whether a purchase actually went through. The wallet dropping is the only
/// trusted signal.
fn wallet_was_charged(before: WalletAmount, after: WalletAmount) -> bool {
    after < before
}

/// Builder for constructing a [`Bot`].
#[derive(Debug)]
pub struct BotBuilder {
    name: String,
    api: Option<StoreApi>,
    settle_delay: Duration,
    wallet: Wallet,
    connected: bool,
}

impl BotBuilder {
    /// Creates a new [`BotBuilder`] for a bot with the given name.
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            api: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
            wallet: Wallet::default(),
            connected: false,
        }
    }

    /// The store API to use for this bot.
    pub fn api(mut self, api: StoreApi) -> Self {
        self.api = Some(api);
        self
    }

    /// How long to wait between finalizing a transaction and re-reading the
    /// wallet balance.
    pub fn settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// The wallet currency code, for displaying cart totals.
    pub fn wallet_currency<T>(mut self, currency: T) -> Self
    where
        T: Into<String>,
    {
        self.wallet.currency = Some(currency.into());
        self
    }

    /// The initial wallet balance in minor units.
    pub fn wallet_balance(mut self, balance: WalletAmount) -> Self {
        self.wallet.balance = balance;
        self
    }

    /// Whether the bot starts out marked as connected.
    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Builds the [`Bot`].
    pub fn build(self) -> Bot {
        Bot {
            name: self.name,
            api: self.api.unwrap_or_else(|| StoreApi::builder().build()),
            settle_delay: self.settle_delay,
            connected: AtomicBool::new(self.connected),
            wallet: RwLock::new(self.wallet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judges_the_purchase_by_the_balance_delta() {
        assert!(wallet_was_charged(100, 90));
        assert!(!wallet_was_charged(100, 100));
        assert!(!wallet_was_charged(100, 105));
    }

    #[test]
    fn builder_defaults() {
        let bot = Bot::builder("alice").build();

        assert_eq!(bot.name, "alice");
        assert_eq!(bot.settle_delay, DEFAULT_SETTLE_DELAY);
        assert!(!bot.is_connected_and_logged_on());
        assert_eq!(bot.wallet().balance, 0);
    }

    #[test]
    fn connected_without_a_session_is_not_logged_on() {
        let bot = Bot::builder("alice").connected(true).build();

        assert!(!bot.is_connected_and_logged_on());

        bot.api.set_cookies(&[]);

        assert!(bot.is_connected_and_logged_on());
    }

    #[test]
    fn wallet_snapshot_can_be_replaced() {
        let bot = Bot::builder("alice")
            .wallet_balance(1050)
            .wallet_currency("USD")
            .build();

        assert_eq!(bot.wallet().balance, 1050);

        bot.set_wallet(Wallet {
            balance: 900,
            currency: Some("USD".into()),
        });

        assert_eq!(bot.wallet().balance, 900);
        assert_eq!(bot.wallet().currency.as_deref(), Some("USD"));
    }
}
