//! Types for common values in store responses.

/// Uniquely identifies an application on the store. For example: 440 for Team Fortress 2.
pub type AppId = u32;
/// Uniquely identifies a package ("sub") on the store.
pub type SubId = u32;
/// Uniquely identifies a bundle on the store.
pub type BundleId = u32;
/// A monetary amount in the wallet currency's minor units (cents).
pub type WalletAmount = i64;
/// An opaque identifier correlating the steps of one checkout sequence.
pub type TransactionId = String;

// Types internally used by the crate.
use reqwest_middleware::ClientWithMiddleware;

pub(crate) type HttpClient = ClientWithMiddleware;
