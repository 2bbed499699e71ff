mod builder;
mod helpers;

pub use builder::StoreApiBuilder;

use helpers::{
    parse_cart_page,
    parse_country_options,
    parse_app_page,
    parse_wallet_balance,
};
use crate::enums::ItemKind;
use crate::error::Error;
use crate::helpers::parses_response;
use crate::request::StoreItem;
use crate::response::{
    Cart,
    CountryOption,
    GameStatus,
    InitTransactionResponse,
    FinalPriceResponse,
    TransactionStatusResponse,
    ResultResponse,
};
use crate::types::{AppId, HttpClient, WalletAmount};
use std::sync::{Arc, RwLock};
use serde::Serialize;
use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use url::Url;

/// The API for interacting with the store on behalf of one account.
///
/// Owns the HTTP client and cookie jar for that account's session. Methods
/// map one-to-one onto store endpoints; sequencing them into commands is the
/// concern of the layers above.
#[derive(Debug, Clone)]
pub struct StoreApi {
    client: HttpClient,
    /// The cookie jar shared with the client.
    pub cookies: Arc<Jar>,
    /// The language used for store pages.
    pub language: String,
    /// The sessionid cookie echoed into store POST forms.
    pub(crate) sessionid: Arc<RwLock<Option<String>>>,
}

impl StoreApi {
    /// The store hostname.
    pub const HOSTNAME: &'static str = "https://store.steampowered.com";

    /// Builder for constructing a [`StoreApi`].
    pub fn builder() -> StoreApiBuilder {
        StoreApiBuilder::new()
    }

    fn get_uri(&self, pathname: &str) -> String {
        format!("{}{}", Self::HOSTNAME, pathname)
    }

    /// Sets cookies for the session. When no `sessionid` cookie is included
    /// a random one is generated, as the store requires one on every form
    /// POST.
    pub fn set_cookies(&self, cookies: &[String]) {
        let mut cookies = cookies.to_owned();
        let sessionid = crate::helpers::get_sessionid_from_cookies(&cookies)
            .unwrap_or_else(|| {
                let sessionid = crate::helpers::generate_sessionid();

                cookies.push(format!("sessionid={sessionid}"));
                sessionid
            });
        // the hostname is a valid URL - this does not fail
        if let Ok(url) = Self::HOSTNAME.parse::<Url>() {
            for cookie_str in &cookies {
                self.cookies.add_cookie_str(cookie_str, &url);
            }
        }

        let mut sessionid_write = self.sessionid.write().unwrap();

        *sessionid_write = Some(sessionid);
    }

    /// Whether a session is present.
    pub fn is_logged_in(&self) -> bool {
        self.sessionid.read().unwrap().is_some()
    }

    fn sessionid(&self) -> Result<String, Error> {
        let sessionid = self.sessionid.read().unwrap().clone();

        match sessionid {
            Some(sessionid) => Ok(sessionid),
            None => {
                log::warn!("No sessionid cookie is set - set cookies first");
                Err(Error::NotLoggedIn)
            },
        }
    }

    async fn fetch_html(&self, uri: &str) -> Result<String, Error> {
        let response = self.client.get(uri)
            .send()
            .await?;

        if response.url().path().starts_with("/login") {
            return Err(Error::NotLoggedIn);
        }

        let status = response.status();

        if !status.is_success() {
            return Err(Error::Http(status));
        }

        Ok(response.text().await?)
    }

    /// Gets the current cart contents.
    pub async fn get_cart(&self) -> Result<Cart, Error> {
        let uri = self.get_uri("/cart/");
        let body = self.fetch_html(&uri).await?;
        let cart = parse_cart_page(&body)?;

        Ok(cart)
    }

    /// Adds a sub or bundle to the cart. Returns whether the store accepted
    /// the item.
    pub async fn add_to_cart(&self, item: &StoreItem) -> Result<bool, Error> {
        #[derive(Serialize)]
        struct AddToCartParams<'a> {
            action: &'static str,
            sessionid: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            subid: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            bundleid: Option<u32>,
        }

        let (subid, bundleid, referer) = match item.kind {
            ItemKind::Sub => (Some(item.id), None, self.get_uri(&format!("/sub/{}", item.id))),
            ItemKind::Bundle => (None, Some(item.id), self.get_uri(&format!("/bundle/{}", item.id))),
            _ => return Err(Error::Parameter("Only subs and bundles can be added to the cart")),
        };
        let sessionid = self.sessionid()?;
        let uri = self.get_uri("/cart/");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&AddToCartParams {
                action: "add_to_cart",
                sessionid: &sessionid,
                subid,
                bundleid,
            })
            .send()
            .await?;
        let body: ResultResponse = parses_response(response).await?;

        Ok(body.is_ok())
    }

    /// Removes everything from the cart. Returns whether the store reported
    /// the reset as successful.
    pub async fn clear_cart(&self) -> Result<bool, Error> {
        #[derive(Serialize)]
        struct ClearCartParams<'a> {
            action: &'static str,
            sessionid: &'a str,
        }

        let sessionid = self.sessionid()?;
        let uri = self.get_uri("/cart/");
        let response = self.client.post(&uri)
            .header(REFERER, &uri)
            .form(&ClearCartParams {
                action: "remove_all",
                sessionid: &sessionid,
            })
            .send()
            .await?;
        let body: ResultResponse = parses_response(response).await?;

        Ok(body.is_ok())
    }

    /// Gets the shipping/billing countries offered by the cart page.
    pub async fn get_cart_countries(&self) -> Result<Vec<CountryOption>, Error> {
        let uri = self.get_uri("/cart/");
        let body = self.fetch_html(&uri).await?;
        let countries = parse_country_options(&body)?;

        Ok(countries)
    }

    /// Sets the account's store country. The code is sent as-is; the store
    /// decides whether it is acceptable.
    pub async fn set_country(&self, country_code: &str) -> Result<bool, Error> {
        #[derive(Serialize)]
        struct SetCountryParams<'a> {
            cc: &'a str,
            sessionid: &'a str,
        }

        let sessionid = self.sessionid()?;
        let referer = self.get_uri("/account/");
        let uri = self.get_uri("/account/setcountry");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&SetCountryParams {
                cc: country_code,
                sessionid: &sessionid,
            })
            .send()
            .await?;
        let body = crate::helpers::check_response(response).await?;
        let text = String::from_utf8_lossy(&body);

        Ok(text.trim().eq_ignore_ascii_case("true"))
    }

    /// Validates the cart for checkout. Fails when the cart is empty or the
    /// store rejects checkout, in which case no transaction can be started.
    pub async fn checkout(&self) -> Result<(), Error> {
        let referer = self.get_uri("/cart/");
        let uri = self.get_uri("/checkout/?purchasetype=self");
        let response = self.client.get(&uri)
            .header(REFERER, referer)
            .send()
            .await?;

        // an empty cart bounces straight back to the cart page
        if response.url().path().starts_with("/cart") {
            return Err(Error::Response("Checkout was rejected".into()));
        }

        if response.url().path().starts_with("/login") {
            return Err(Error::NotLoggedIn);
        }

        let status = response.status();

        if !status.is_success() {
            return Err(Error::Http(status));
        }

        Ok(())
    }

    /// Initializes a wallet transaction for the current cart.
    pub async fn init_transaction(&self) -> Result<InitTransactionResponse, Error> {
        #[derive(Serialize)]
        struct InitTransactionParams<'a> {
            #[serde(rename = "gidShoppingCart")]
            gid_shopping_cart: i64,
            #[serde(rename = "gidReplayOfTransID")]
            gid_replay_of_trans_id: i64,
            #[serde(rename = "PaymentMethod")]
            payment_method: &'static str,
            #[serde(rename = "abortPendingTransactions")]
            abort_pending_transactions: u8,
            sessionid: &'a str,
        }

        let sessionid = self.sessionid()?;
        let referer = self.get_uri("/checkout/");
        let uri = self.get_uri("/checkout/inittransaction/");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&InitTransactionParams {
                gid_shopping_cart: -1,
                gid_replay_of_trans_id: -1,
                payment_method: "steamaccount",
                abort_pending_transactions: 0,
                sessionid: &sessionid,
            })
            .send()
            .await?;
        let body: InitTransactionResponse = parses_response(response).await?;

        Ok(body)
    }

    /// Gets the final price quote for a transaction.
    pub async fn get_final_price(&self, transid: &str) -> Result<FinalPriceResponse, Error> {
        #[derive(Serialize)]
        struct FinalPriceQuery<'a> {
            count: u8,
            transid: &'a str,
            purchasetype: &'static str,
            microtxnid: i64,
            cart: i64,
            #[serde(rename = "gidReplayOfTransID")]
            gid_replay_of_trans_id: i64,
        }

        let referer = self.get_uri("/checkout/");
        let uri = self.get_uri("/checkout/getfinalprice/");
        let response = self.client.get(&uri)
            .header(REFERER, referer)
            .query(&FinalPriceQuery {
                count: 1,
                transid,
                purchasetype: "self",
                microtxnid: -1,
                cart: -1,
                gid_replay_of_trans_id: -1,
            })
            .send()
            .await?;
        let body: FinalPriceResponse = parses_response(response).await?;

        Ok(body)
    }

    /// Finalizes a transaction, charging the wallet.
    pub async fn finalize_transaction(&self, transid: &str) -> Result<TransactionStatusResponse, Error> {
        #[derive(Serialize)]
        struct FinalizeTransactionParams<'a> {
            transid: &'a str,
            #[serde(rename = "CardCVV2")]
            card_cvv2: &'static str,
        }

        let referer = self.get_uri("/checkout/");
        let uri = self.get_uri("/checkout/finalizetransaction/");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&FinalizeTransactionParams {
                transid,
                card_cvv2: "",
            })
            .send()
            .await?;
        let body: TransactionStatusResponse = parses_response(response).await?;

        Ok(body)
    }

    /// Adds an app to the wishlist.
    pub async fn add_to_wishlist(&self, appid: AppId) -> Result<bool, Error> {
        self.wishlist_request("/api/addtowishlist", appid).await
    }

    /// Removes an app from the wishlist.
    pub async fn remove_from_wishlist(&self, appid: AppId) -> Result<bool, Error> {
        self.wishlist_request("/api/removefromwishlist", appid).await
    }

    async fn wishlist_request(&self, pathname: &str, appid: AppId) -> Result<bool, Error> {
        #[derive(Serialize)]
        struct WishlistParams<'a> {
            appid: AppId,
            sessionid: &'a str,
        }

        let sessionid = self.sessionid()?;
        let referer = self.get_uri(&format!("/app/{appid}"));
        let uri = self.get_uri(pathname);
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&WishlistParams {
                appid,
                sessionid: &sessionid,
            })
            .send()
            .await?;
        let body: ResultResponse = parses_response(response).await?;

        if !body.is_ok() {
            log::warn!("Wishlist request for app {} answered {}", appid, body.success);
        }

        Ok(body.is_ok())
    }

    /// Follows or unfollows an app.
    pub async fn follow_game(&self, appid: AppId, follow: bool) -> Result<bool, Error> {
        #[derive(Serialize)]
        struct FollowGameParams<'a> {
            appid: AppId,
            sessionid: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            unfollow: Option<&'static str>,
        }

        let sessionid = self.sessionid()?;
        let referer = self.get_uri(&format!("/app/{appid}"));
        let uri = self.get_uri("/explore/followgame/");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&FollowGameParams {
                appid,
                sessionid: &sessionid,
                unfollow: if follow { None } else { Some("1") },
            })
            .send()
            .await?;
        let body = crate::helpers::check_response(response).await?;
        let text = String::from_utf8_lossy(&body);

        Ok(text.trim().eq_ignore_ascii_case("true"))
    }

    /// Gets the wishlist/follow/ownership state of an app from its store
    /// page.
    pub async fn get_game_status(&self, appid: AppId) -> Result<GameStatus, Error> {
        #[derive(Serialize)]
        struct AppPageQuery<'a> {
            l: &'a str,
        }

        let uri = self.get_uri(&format!("/app/{appid}"));
        let response = self.client.get(&uri)
            .query(&AppPageQuery {
                l: &self.language,
            })
            .send()
            .await?;

        // unknown apps are redirected to the storefront
        if response.url().path() == "/" {
            return Err(Error::Response("Store page not found".into()));
        }

        let status = response.status();

        if !status.is_success() {
            return Err(Error::Http(status));
        }

        let body = response.text().await?;
        let game_status = parse_app_page(appid, &body)?;

        Ok(game_status)
    }

    /// Reads the account's wallet balance from the account page, in minor
    /// units.
    pub async fn get_wallet_balance(&self) -> Result<WalletAmount, Error> {
        let uri = self.get_uri("/account/");
        let body = self.fetch_html(&uri).await?;
        let balance = parse_wallet_balance(&body)?;

        Ok(balance)
    }
}
