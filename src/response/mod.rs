mod cart;
mod country;
mod checkout;
mod game_status;
mod result;
pub mod deserializers;

pub use cart::{Cart, CartLine};
pub use country::CountryOption;
pub use checkout::{InitTransactionResponse, FinalPriceResponse, TransactionStatusResponse, PurchaseReceipt};
pub use game_status::GameStatus;
pub use result::ResultResponse;
