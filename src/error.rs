use crate::types::TransactionId;
use std::num::ParseIntError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A parameter broke the calling contract. Not expected in normal operation.
    #[error("Invalid parameter: {}", .0)]
    Parameter(&'static str),
    /// The response decoded but did not contain what was expected.
    #[error("Unexpected response: {}", .0)]
    Response(String),
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("Error {}", .0)]
    Http(reqwest::StatusCode),
    /// No sessionid cookie is present or the store redirected to the login page.
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Error parsing HTML document: {}", .0)]
    Html(#[from] ParseHtmlError),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ParseHtmlError {
    #[error("{}", .0)]
    Malformed(&'static str),
    #[error("{}", .0)]
    Response(String),
    #[error("{}", .0)]
    ParseInt(#[from] ParseIntError),
    #[error("Failed to parse selector")]
    ParseSelector,
}

/// Where a checkout sequence stopped. Each abort point carries its own message
/// so a failed purchase can be reported unambiguously.
#[derive(thiserror::Error, Debug)]
pub enum PurchaseError {
    /// The checkout page could not be fetched. The cart is empty or checkout
    /// was rejected outright.
    #[error("Checkout failed - the cart may be empty")]
    Checkout(#[source] Error),
    #[error("Failed to initialize the transaction")]
    InitTransaction(#[source] Error),
    /// The init transaction response carried no transaction id in either of
    /// its id fields.
    #[error("No transaction id was returned")]
    MissingTransactionId,
    #[error("Failed to get the final price for transaction {}", .0)]
    FinalPrice(TransactionId, #[source] Error),
    #[error("Failed to finalize transaction {}", .0)]
    Finalize(TransactionId, #[source] Error),
    /// The wallet balance did not drop after finalizing. The finalize status
    /// is not trusted; an uncharged wallet means the purchase did not happen.
    #[error("Purchase failed")]
    NotCharged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_error_messages_are_distinct() {
        let errors = [
            PurchaseError::Checkout(Error::NotLoggedIn).to_string(),
            PurchaseError::InitTransaction(Error::NotLoggedIn).to_string(),
            PurchaseError::MissingTransactionId.to_string(),
            PurchaseError::FinalPrice("1234".into(), Error::NotLoggedIn).to_string(),
            PurchaseError::Finalize("1234".into(), Error::NotLoggedIn).to_string(),
            PurchaseError::NotCharged.to_string(),
        ];

        for (i, a) in errors.iter().enumerate() {
            for b in errors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn not_charged_reports_no_detail() {
        assert_eq!(PurchaseError::NotCharged.to_string(), "Purchase failed");
    }
}
