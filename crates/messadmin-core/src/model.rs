//! Mess record model.
//!
//! Field names on the wire follow the backend's JSON (`_id`, `messName`,
//! `isVerified`, ...). Records enter the system only through
//! [`decode_mess_list`], which validates each element on its own so one
//! malformed record does not hide the rest of the list.

use crate::error::{AdminError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Verification lifecycle of a mess.
///
/// A mess is created `Pending` by its owner's registration. This console
/// only moves it to `Verified` or `Rejected`; both are terminal here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Awaiting an admin decision.
    Pending,

    /// Approved by an admin.
    Verified,

    /// Turned down by an admin.
    Rejected,
}

impl VerificationStatus {
    /// All statuses in display order.
    pub const ALL: [VerificationStatus; 3] = [
        VerificationStatus::Verified,
        VerificationStatus::Pending,
        VerificationStatus::Rejected,
    ];

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    /// Returns the capitalised badge label.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "Pending",
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err(format!("invalid verification status: {s}")),
        }
    }
}

/// Kind of meals a mess serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    /// Vegetarian only.
    #[serde(rename = "veg")]
    Veg,

    /// Non-vegetarian only.
    #[serde(rename = "nonveg")]
    NonVeg,

    /// Both vegetarian and non-vegetarian.
    #[serde(rename = "both")]
    Both,
}

impl MealType {
    /// Returns the label shown on cards.
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Veg => "Veg",
            MealType::NonVeg => "Non-Veg",
            MealType::Both => "Veg & Non-Veg",
        }
    }
}

/// Meal slot a timing window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
}

impl MealSlot {
    /// All slots in serving order.
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// Returns the capitalised slot label.
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

/// Time-of-day window for one meal slot, kept as the server sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealWindow {
    /// Opening time, e.g. `07:30`.
    pub start: String,
    /// Closing time, e.g. `09:30`.
    pub end: String,
}

/// Optional serving windows keyed by meal slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTimings {
    #[serde(rename = "breakfastTimings", default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<MealWindow>,

    #[serde(rename = "lunchTimings", default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<MealWindow>,

    #[serde(rename = "dinnerTimings", default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<MealWindow>,
}

impl MealTimings {
    /// Returns the window for `slot`, if the mess serves it.
    pub fn get(&self, slot: MealSlot) -> Option<&MealWindow> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }

    /// Iterates over the served slots in serving order.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &MealWindow)> {
        MealSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|w| (slot, w)))
    }

    /// Returns `true` when no slot has a window.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A subscription plan offered by a mess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Plan name, e.g. `monthly`.
    #[serde(default)]
    pub name: String,

    /// Price in rupees; zero when the server omits it.
    #[serde(default)]
    pub price: f64,

    /// Whether a discount is currently running.
    #[serde(rename = "onGoingDiscount", default)]
    pub discount_active: bool,

    /// Discount in percent, meaningful only while `discount_active`.
    #[serde(rename = "discountOffer", default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SubscriptionPlan {
    /// Returns the running discount in percent, if any.
    pub fn active_discount(&self) -> Option<f64> {
        if self.discount_active {
            self.discount_percent.filter(|p| *p > 0.0)
        } else {
            None
        }
    }
}

/// Photo attached to a mess listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub url: String,
}

/// Customer review of a mess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Reviewer name.
    #[serde(default)]
    pub name: String,

    #[serde(rename = "imgUrl", default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    /// Star rating, nominally 0 to 5 and possibly fractional.
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub description: String,

    /// RFC 3339 timestamp as sent by the server.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A mess facility as managed by the verification workflow.
///
/// # Invariants
///
/// - `id` and `name` are non-empty.
/// - `rejection_reason` is `None` unless `verification_status` is `Rejected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessRecord {
    /// Opaque identifier assigned by the backing store.
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "messName")]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(rename = "ownerName", default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(
        rename = "mobile",
        default,
        deserialize_with = "contact_from_wire",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "messType")]
    pub meal_type: MealType,

    #[serde(rename = "deliveryAvailable", default)]
    pub delivery_available: bool,

    #[serde(flatten)]
    pub timings: MealTimings,

    #[serde(rename = "subscriptionPlans", default, deserialize_with = "lenient_list")]
    pub subscription_plans: Vec<SubscriptionPlan>,

    #[serde(rename = "isVerified")]
    pub verification_status: VerificationStatus,

    #[serde(rename = "rejectionReason", default)]
    pub rejection_reason: Option<String>,

    /// Delivery radius in kilometres.
    #[serde(rename = "serviceRadius", default, skip_serializing_if = "Option::is_none")]
    pub service_radius_km: Option<f64>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub photos: Vec<Photo>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub reviews: Vec<Review>,
}

/// Accepts the owner's mobile number as a string or a bare number.
fn contact_from_wire<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Decodes a list of display-only sub-items, dropping the ones that do not
/// fit instead of failing the whole record.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed mess sub-item");
                None
            }
        })
        .collect())
}

impl MessRecord {
    /// Creates a pending record with no optional data.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        meal_type: MealType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            owner_name: None,
            contact_number: None,
            email: None,
            meal_type,
            delivery_available: false,
            timings: MealTimings::default(),
            subscription_plans: Vec::new(),
            verification_status: VerificationStatus::Pending,
            rejection_reason: None,
            service_radius_km: None,
            photos: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// Decodes and validates one record received from the server.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidRecord` when the value does not match the
    /// record shape or violates a record invariant.
    pub fn from_value(value: Value) -> Result<Self> {
        let record: MessRecord =
            serde_json::from_value(value).map_err(|e| AdminError::InvalidRecord(e.to_string()))?;
        let record = record.normalized();
        record.validate()?;
        Ok(record)
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidRecord` naming the violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AdminError::InvalidRecord("empty id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(AdminError::InvalidRecord(format!(
                "empty name for mess {}",
                self.id
            )));
        }
        if self.rejection_reason.is_some()
            && self.verification_status != VerificationStatus::Rejected
        {
            return Err(AdminError::InvalidRecord(format!(
                "rejection reason set on {} mess {}",
                self.verification_status, self.id
            )));
        }
        Ok(())
    }

    /// Drops a rejection reason left over on a record that is not rejected.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.verification_status != VerificationStatus::Rejected {
            self.rejection_reason = None;
        }
        self
    }

    /// Returns a copy carrying a new status and reason, all else unchanged.
    ///
    /// The reason is dropped unless the new status is `Rejected`.
    #[must_use]
    pub fn with_status(&self, status: VerificationStatus, reason: Option<String>) -> Self {
        let mut next = self.clone();
        next.verification_status = status;
        next.rejection_reason = reason;
        next.normalized()
    }

    /// Returns `true` while the mess awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.verification_status == VerificationStatus::Pending
    }
}

/// Records decoded from one list response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessBatch {
    /// Valid records in server order, unique by id.
    pub records: Vec<MessRecord>,

    /// Number of elements dropped by boundary validation.
    pub skipped: usize,
}

impl MessBatch {
    /// Wraps records that are already known to be valid.
    pub fn from_records(records: Vec<MessRecord>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }
}

/// Decodes a `{ "data": [...] }` list response.
///
/// Invalid elements and repeats of an id already seen are skipped and
/// counted; the first occurrence of an id wins.
///
/// # Errors
///
/// Returns `AdminError::Protocol` when the body has no `data` array.
pub fn decode_mess_list(body: Value) -> Result<MessBatch> {
    let items = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AdminError::Protocol(
                    "mess list response has no data array".to_string(),
                ));
            }
        },
        _ => {
            return Err(AdminError::Protocol(
                "mess list response is not a json object".to_string(),
            ));
        }
    };

    let mut seen = HashSet::new();
    let mut batch = MessBatch::default();

    for item in items {
        match MessRecord::from_value(item) {
            Ok(record) => {
                if seen.insert(record.id.clone()) {
                    batch.records.push(record);
                } else {
                    tracing::warn!(id = %record.id, "skipping duplicate mess record");
                    batch.skipped += 1;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping invalid mess record");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_record(id: &str, status: &str) -> Value {
        json!({
            "_id": id,
            "messName": format!("Mess {id}"),
            "address": "Campus Block A",
            "messType": "both",
            "isVerified": status,
        })
    }

    #[test]
    fn test_decode_full_record() {
        let value = json!({
            "_id": "65f1",
            "messName": "University Main Mess",
            "address": "Campus Block A",
            "ownerName": "John Smith",
            "mobile": "9876543210",
            "email": "owner@example.com",
            "messType": "nonveg",
            "deliveryAvailable": true,
            "lunchTimings": { "start": "12:00", "end": "14:00" },
            "subscriptionPlans": [
                { "_id": "p1", "name": "monthly", "price": 3200, "onGoingDiscount": true, "discountOffer": 10 }
            ],
            "isVerified": "pending",
            "rejectionReason": null,
            "serviceRadius": 3.5,
            "photos": [{ "_id": "ph1", "url": "https://img.example.com/1.jpg" }],
            "reviews": [{ "name": "Asha", "rating": 4, "description": "Good food", "createdAt": "2024-03-01T10:00:00.000Z" }],
            "__v": 0
        });

        let record = MessRecord::from_value(value).unwrap();
        assert_eq!(record.id, "65f1");
        assert_eq!(record.meal_type, MealType::NonVeg);
        assert_eq!(record.contact_number.as_deref(), Some("9876543210"));
        assert_eq!(record.timings.lunch.as_ref().unwrap().start, "12:00");
        assert!(record.timings.breakfast.is_none());
        assert_eq!(record.subscription_plans[0].active_discount(), Some(10.0));
        assert_eq!(record.service_radius_km, Some(3.5));
        assert_eq!(record.reviews[0].rating, 4.0);
        assert!(record.is_pending());
    }

    #[test]
    fn test_display_fields_decode_tolerantly() {
        let value = json!({
            "_id": "65f2",
            "messName": "North Campus Cafeteria",
            "messType": "veg",
            "isVerified": "pending",
            "mobile": 9876543210u64,
            "subscriptionPlans": [
                { "name": "weekly" },
                { "name": "monthly", "price": "lots" }
            ],
            "reviews": [
                { "name": "Asha", "rating": 4.5, "description": "Tasty" },
                "not a review"
            ],
            "photos": null
        });

        let record = MessRecord::from_value(value).unwrap();
        assert_eq!(record.contact_number.as_deref(), Some("9876543210"));
        assert_eq!(record.subscription_plans.len(), 1);
        assert_eq!(record.subscription_plans[0].name, "weekly");
        assert_eq!(record.subscription_plans[0].price, 0.0);
        assert_eq!(record.reviews.len(), 1);
        assert_eq!(record.reviews[0].rating, 4.5);
        assert!(record.photos.is_empty());

        let batch = decode_mess_list(json!({ "data": [
            wire_record("1", "pending"),
            { "_id": "2", "messName": "Odd Review Mess", "messType": "both", "isVerified": "pending",
              "reviews": [{ "name": "Ravi", "rating": 3.7 }] }
        ]}))
        .unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn test_unknown_status_is_invalid() {
        let result = MessRecord::from_value(wire_record("1", "archived"));
        assert!(matches!(result, Err(AdminError::InvalidRecord(_))));
    }

    #[test]
    fn test_reason_cleared_unless_rejected() {
        let mut value = wire_record("1", "verified");
        value["rejectionReason"] = json!("stale");
        let record = MessRecord::from_value(value).unwrap();
        assert_eq!(record.rejection_reason, None);

        let mut value = wire_record("2", "rejected");
        value["rejectionReason"] = json!("Missing license");
        let record = MessRecord::from_value(value).unwrap();
        assert_eq!(record.rejection_reason.as_deref(), Some("Missing license"));
    }

    #[test]
    fn test_decode_list_skips_invalid_and_duplicates() {
        let body = json!({
            "data": [
                wire_record("1", "pending"),
                wire_record("2", "unknown"),
                wire_record("1", "verified"),
                { "_id": "3", "messName": "", "messType": "veg", "isVerified": "pending" },
                wire_record("4", "rejected"),
            ]
        });

        let batch = decode_mess_list(body).unwrap();
        let ids: Vec<&str> = batch.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(batch.records[0].verification_status, VerificationStatus::Pending);
        assert_eq!(batch.skipped, 3);
    }

    #[test]
    fn test_decode_list_requires_data_array() {
        assert!(matches!(
            decode_mess_list(json!({ "messes": [] })),
            Err(AdminError::Protocol(_))
        ));
        assert!(matches!(
            decode_mess_list(json!([])),
            Err(AdminError::Protocol(_))
        ));
    }

    #[test]
    fn test_with_status_only_touches_status_and_reason() {
        let mut original = MessRecord::new("7", "Quick Bites", "Central Courtyard", MealType::Veg);
        original.owner_name = Some("Mike Brown".to_string());

        let verified = original.with_status(VerificationStatus::Verified, Some("ignored".into()));
        assert_eq!(verified.verification_status, VerificationStatus::Verified);
        assert_eq!(verified.rejection_reason, None);
        assert_eq!(verified.owner_name, original.owner_name);
        assert_eq!(verified.name, original.name);

        let rejected = original.with_status(VerificationStatus::Rejected, Some("No license".into()));
        assert_eq!(rejected.rejection_reason.as_deref(), Some("No license"));
    }

    #[test]
    fn test_timings_iterate_in_serving_order() {
        let timings = MealTimings {
            breakfast: None,
            lunch: Some(MealWindow {
                start: "12:00".into(),
                end: "14:00".into(),
            }),
            dinner: Some(MealWindow {
                start: "19:00".into(),
                end: "21:00".into(),
            }),
        };
        let slots: Vec<MealSlot> = timings.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![MealSlot::Lunch, MealSlot::Dinner]);
        assert!(MealTimings::default().is_empty());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in VerificationStatus::ALL {
            assert_eq!(status.as_str().parse::<VerificationStatus>(), Ok(status));
        }
        assert!("approved".parse::<VerificationStatus>().is_err());
    }
}
