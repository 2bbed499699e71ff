use crate::enums::EResult;
use crate::response::deserializers::to_eresult;
use serde::Deserialize;

/// The minimal `{ "success": <code> }` body most store POST endpoints answer
/// with.
#[derive(Deserialize, Debug)]
pub struct ResultResponse {
    #[serde(deserialize_with = "to_eresult")]
    pub success: EResult,
}

impl ResultResponse {
    pub fn is_ok(&self) -> bool {
        self.success == EResult::OK
    }
}
