use crate::error::Error;
use crate::types::WalletAmount;
use std::sync::Arc;
use reqwest::{header, cookie::CookieStore};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use lazy_regex::{regex, regex_is_match, regex_captures};

pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// Builds the HTTP client used for store requests.
///
/// No retry layer is installed. Every command treats a failed call as
/// terminal and reports it once.
pub fn get_default_middleware<T>(
    cookie_store: Arc<T>,
    user_agent_string: &'static str,
) -> ClientWithMiddleware
where
    T: CookieStore + 'static,
{
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(cookie_store)
        .default_headers(headers)
        .build()
        .unwrap();

    ClientBuilder::new(client).build()
}

/// Generates a random sessionid.
pub fn generate_sessionid() -> String {
    // Should look like "37bf523a24034ec06c60ec61"
    (0..12)
        .map(|_| {
            let b = rand::random::<u8>();

            format!("{b:02x?}")
        })
        .collect()
}

/// Gets the sessionid from a set of cookie strings, if one is present.
pub fn get_sessionid_from_cookies(cookies: &[String]) -> Option<String> {
    cookies
        .iter()
        .find_map(|cookie| {
            let (name, value) = cookie.split_once('=')?;

            if name.trim() != "sessionid" {
                return None;
            }

            let value = value
                .split(';')
                .next()
                .unwrap_or(value)
                .trim();

            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        })
}

fn is_login(location_option: Option<&header::HeaderValue>) -> bool {
    match location_option {
        Some(location) => {
            if let Ok(location_str) = location.to_str() {
                regex_is_match!("/login", location_str)
            } else {
                false
            }
        },
        None => false,
    }
}

pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let status = response.status();

    match status.as_u16() {
        300..=399 if is_login(response.headers().get("location")) => {
            Err(Error::NotLoggedIn)
        },
        400..=599 => {
            Err(Error::Http(status))
        },
        _ => {
            Ok(response.bytes().await?)
        }
    }
}

pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;

    match serde_json::from_slice::<D>(&body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(&body);

            if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(Error::Response(message.into()))
                } else {
                    Err(Error::Response("Unexpected error".into()))
                }
            } else if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(Error::NotLoggedIn)
            } else {
                Err(Error::Parse(parse_error))
            }
        }
    }
}

/// Normalizes a displayed price to integer minor units.
///
/// The store formats wallet and cart amounts per account locale ("$10.50",
/// "10,50€", "R$ 10,50"). Every format keeps two minor-unit digits, so the
/// digits alone carry the amount.
pub fn parse_price_text(text: &str) -> Option<WalletAmount> {
    let digits = regex!(r"\D").replace_all(text, "");

    if digits.is_empty() {
        return None;
    }

    digits.parse::<WalletAmount>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_session() {
        let sessionid = generate_sessionid();

        assert_eq!(sessionid.len(), 24);
    }

    #[test]
    fn gets_sessionid_from_cookies() {
        let cookies = vec![
            String::from("timezoneOffset=0,0"),
            String::from("sessionid=37bf523a24034ec06c60ec61; Path=/; Secure"),
        ];

        assert_eq!(get_sessionid_from_cookies(&cookies).as_deref(), Some("37bf523a24034ec06c60ec61"));
        assert_eq!(get_sessionid_from_cookies(&[]), None);
    }

    #[test]
    fn parses_price_text() {
        assert_eq!(parse_price_text("$10.50"), Some(1050));
        assert_eq!(parse_price_text("10,50€"), Some(1050));
        assert_eq!(parse_price_text("R$ 1.234,56"), Some(123456));
        assert_eq!(parse_price_text("0,--€"), Some(0));
        assert_eq!(parse_price_text("free"), None);
    }
}
