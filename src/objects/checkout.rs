use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::country::CountryCode;
use super::timestamp;

/// A checkout session (one-time payment link).
///
/// The same shape is used for creation requests and API responses; absent
/// fields are omitted from serialized request bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Hosted payment-link URL assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        with = "timestamp::iso_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "timestamp::iso_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address_collection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_promotion_codes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    /// `"open"`, `"completed"`, or `"expired"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<CheckoutLineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address_collection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_countries: Option<Vec<CountryCode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_rates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    /// Free-form account object attached by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<serde_json::Value>,
}

/// A line item inside a checkout session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Unit price in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_payload_omits_server_fields() {
        let session = CheckoutSession {
            success_url: Some("https://shop.example.com/ok".to_owned()),
            cancel_url: Some("https://shop.example.com/cancel".to_owned()),
            line_items: Some(vec![CheckoutLineItem {
                name: Some("Coffee beans".to_owned()),
                currency: Some("USD".to_owned()),
                unit_amount: Some(1250),
                quantity: Some(2),
                ..CheckoutLineItem::default()
            }]),
            ..CheckoutSession::default()
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("createdAt"));
        assert!(json.contains(r#""unitAmount":1250"#));
    }

    #[test]
    fn deserializes_session_response() {
        let json = r#"{
            "id": "cs_123",
            "accountId": "acc_1",
            "url": "https://checkout.onvopay.com/cs_123",
            "status": "open",
            "paymentStatus": "unpaid",
            "createdAt": "2022-06-12T21:21:10.587Z",
            "shippingCountries": ["CR", "US"],
            "account": {"name": "Tuanis Cloud"}
        }"#;
        let session: CheckoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id.as_deref(), Some("cs_123"));
        assert_eq!(session.status.as_deref(), Some("open"));
        let countries = session.shipping_countries.unwrap();
        assert_eq!(countries[0].as_str(), "CR");
        assert!(session.account.unwrap().get("name").is_some());
    }
}
