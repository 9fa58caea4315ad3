use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::timestamp;

/// A customer stored on the OnvoPay platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Total amount spent by the customer, in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_spent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "timestamp::iso_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        with = "timestamp::iso_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transaction_at: Option<OffsetDateTime>,
    /// `"live"` or `"test"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions_count: Option<i32>,
    #[serde(
        default,
        with = "timestamp::iso_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

/// Payload for creating a new customer.
///
/// Absent fields are omitted from the serialized request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Shipping details attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_customer_with_iso_timestamps() {
        let json = r#"{
            "id": "cl502zv0d0127ebdp3zt27651",
            "address": {"city": "San José", "country": "CR", "postalCode": "10101"},
            "amountSpent": 0,
            "createdAt": "2022-06-12T21:21:10.587Z",
            "email": "myEmail@email.com",
            "lastTransactionAt": null,
            "mode": "test",
            "name": "John Doe",
            "transactionsCount": 0,
            "updatedAt": "2022-06-12T21:21:10.587Z",
            "someUnknownField": true
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, "cl502zv0d0127ebdp3zt27651");
        assert_eq!(customer.email.as_deref(), Some("myEmail@email.com"));
        assert_eq!(customer.last_transaction_at, None);
        let created_at = customer.created_at.unwrap();
        assert_eq!(created_at.millisecond(), 587);
        assert_eq!(
            customer.address.as_ref().unwrap().postal_code.as_deref(),
            Some("10101")
        );
    }

    #[test]
    fn customer_timestamps_serialize_with_millis_and_z() {
        let json = r#"{"id":"cus_1","createdAt":"2022-06-12T21:21:10.587Z"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&customer).unwrap();
        assert!(out.contains(r#""createdAt":"2022-06-12T21:21:10.587Z""#), "{out}");
    }

    #[test]
    fn create_customer_omits_absent_fields() {
        let payload = CreateCustomer {
            name: Some("Test User".to_owned()),
            email: Some("myEmail@email.com".to_owned()),
            ..CreateCustomer::default()
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"email":"myEmail@email.com","name":"Test User"}"#
        );
    }
}
