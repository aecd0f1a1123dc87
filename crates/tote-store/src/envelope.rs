//! Persisted record format.
//!
//! The slot holds `{"state":{"items":[...]},"version":N}`. Only `items` is
//! part of the state; `version` lets a newer build refuse to misread data
//! it does not understand.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tote_cart::Cart;

/// Envelope version written by this build.
pub const ENVELOPE_VERSION: u32 = 0;

/// Persisted record: the cart state plus its format version.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Persisted state (`{"items":[...]}` for a cart).
    pub state: T,
    /// Format version; missing means 0.
    #[serde(default)]
    pub version: u32,
}

impl Envelope<Cart> {
    /// Check the version and normalize the decoded lines.
    ///
    /// Normalizing means hand-edited or older data cannot introduce zero
    /// quantities or duplicate lines.
    pub fn into_cart(self) -> Result<Cart, StoreError> {
        if self.version > ENVELOPE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                supported: ENVELOPE_VERSION,
            });
        }
        Ok(Cart::normalized(self.state.items))
    }
}

/// Encode a cart into envelope text.
pub fn encode(cart: &Cart) -> Result<String, StoreError> {
    let envelope = Envelope {
        state: cart,
        version: ENVELOPE_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode envelope text into a cart. See [`Envelope::into_cart`].
pub fn decode(text: &str) -> Result<Cart, StoreError> {
    serde_json::from_str::<Envelope<Cart>>(text)?.into_cart()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tote_cart::CartItem;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            CartItem::new("p1", "T-Shirt", 19.99)
                .with_quantity(2)
                .with_option("color", "Red")
                .with_option("size", "M")
                .with_image(serde_json::json!({ "uri": "https://cdn.example/p1.png" })),
        );
        cart.add_item(CartItem::new("p2", "Mug", 7.5).with_image(42));
        cart
    }

    #[test]
    fn test_round_trip_preserves_items_and_order() {
        let cart = sample_cart();
        let text = encode(&cart).unwrap();
        assert_eq!(decode(&text).unwrap(), cart);
    }

    #[test]
    fn test_envelope_shape() {
        let text = encode(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["items"][0]["id"], "p1");
        assert_eq!(value["state"]["items"][0]["options"]["color"], "Red");
        assert_eq!(value["state"]["items"][1]["image"], 42);
    }

    #[test]
    fn test_missing_version_is_accepted() {
        let cart = decode(
            r#"{"state":{"items":[{"id":"p1","title":"Mug","image":null,"price":3.0,"quantity":1}]}}"#,
        )
        .unwrap();
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let err = decode(r#"{"state":{"items":[]},"version":7}"#).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedVersion { found: 7, supported: 0 }
        ));
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        assert!(matches!(decode("{not json"), Err(StoreError::Serialization(_))));
        assert!(matches!(
            decode(r#"{"items":[]}"#),
            Err(StoreError::Serialization(_))
        ));
        assert!(matches!(
            decode(r#"{"state":{"items":[{"id":"p1","quantity":-1}]}}"#),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_decode_normalizes_duplicates() {
        let text = r#"{"state":{"items":[
            {"id":"p1","title":"Mug","price":3.0,"quantity":1},
            {"id":"p1","title":"Mug","price":3.0,"quantity":2},
            {"id":"p2","title":"Cap","price":9.0,"quantity":0}
        ]},"version":0}"#;
        let cart = decode(text).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }
}
