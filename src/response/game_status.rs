use crate::types::AppId;

/// Wishlist/follow/ownership state read off a store app page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatus {
    pub appid: AppId,
    pub name: String,
    pub in_wishlist: bool,
    pub followed: bool,
    pub owned: bool,
}
