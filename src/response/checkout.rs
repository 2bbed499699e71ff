use crate::enums::EResult;
use crate::response::deserializers::{to_eresult, from_number_or_string};
use serde::Deserialize;

/// Response to initializing a checkout transaction.
///
/// The store has answered with the transaction id under two different field
/// names over time; [`InitTransactionResponse::transaction_id`] checks both.
#[derive(Deserialize, Debug)]
pub struct InitTransactionResponse {
    #[serde(default)]
    #[serde(deserialize_with = "to_eresult")]
    pub success: EResult,
    #[serde(default)]
    pub transid: Option<String>,
    #[serde(default)]
    pub transactionid: Option<String>,
}

impl InitTransactionResponse {
    /// The transaction id, preferring `transid` over `transactionid`.
    /// Empty strings count as absent.
    pub fn transaction_id(&self) -> Option<&str> {
        self.transid
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.transactionid.as_deref().filter(|id| !id.is_empty()))
    }
}

/// The final price quote for a transaction. Carried through the purchase
/// sequence opaquely; only the formatted total is surfaced to users.
#[derive(Deserialize, Debug)]
pub struct FinalPriceResponse {
    #[serde(default)]
    #[serde(deserialize_with = "to_eresult")]
    pub success: EResult,
    #[serde(default)]
    #[serde(deserialize_with = "from_number_or_string")]
    pub total: i64,
    #[serde(rename = "formattedTotal")]
    #[serde(default)]
    pub formatted_total: Option<String>,
    #[serde(rename = "currencyCode")]
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// Response to finalizing a transaction. Its status is decoded but the
/// purchase outcome is judged from the wallet balance, not from here.
#[derive(Deserialize, Debug)]
pub struct TransactionStatusResponse {
    #[serde(default)]
    #[serde(deserialize_with = "to_eresult")]
    pub success: EResult,
    #[serde(default)]
    pub purchasereceipt: Option<PurchaseReceipt>,
}

#[derive(Deserialize, Debug)]
pub struct PurchaseReceipt {
    #[serde(rename = "formattedTotal")]
    #[serde(default)]
    pub formatted_total: Option<String>,
}

impl TransactionStatusResponse {
    /// The receipt's displayed total, when the store included one.
    pub fn formatted_total(&self) -> Option<&str> {
        self.purchasereceipt
            .as_ref()
            .and_then(|receipt| receipt.formatted_total.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_primary_transaction_id_field() {
        let response: InitTransactionResponse = serde_json::from_str(
            r#"{"success":1,"transid":"12345","transactionid":"67890"}"#
        ).unwrap();

        assert_eq!(response.transaction_id(), Some("12345"));
    }

    #[test]
    fn falls_back_to_the_secondary_field() {
        let response: InitTransactionResponse = serde_json::from_str(
            r#"{"success":1,"transactionid":"67890"}"#
        ).unwrap();

        assert_eq!(response.transaction_id(), Some("67890"));
    }

    #[test]
    fn empty_ids_count_as_absent() {
        let response: InitTransactionResponse = serde_json::from_str(
            r#"{"success":1,"transid":"","transactionid":""}"#
        ).unwrap();

        assert_eq!(response.transaction_id(), None);

        let response: InitTransactionResponse = serde_json::from_str(
            r#"{"success":1,"transid":"","transactionid":"67890"}"#
        ).unwrap();

        assert_eq!(response.transaction_id(), Some("67890"));
    }

    #[test]
    fn missing_ids_count_as_absent() {
        let response: InitTransactionResponse = serde_json::from_str(
            r#"{"success":2}"#
        ).unwrap();

        assert_eq!(response.transaction_id(), None);
    }
}
