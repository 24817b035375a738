//! Presentation view-models.
//!
//! Read-only projections of a [`MessRecord`] for cards and the detail
//! view. They decide which fields are visible for which status; they never
//! change status themselves. Front ends dispatch decisions through
//! [`crate::workflows::verify`].

use crate::model::{MessRecord, Review, SubscriptionPlan, VerificationStatus};
use chrono::DateTime;
use serde::Serialize;

/// One meal window as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingView {
    pub slot: &'static str,
    pub start: String,
    pub end: String,
}

/// One subscription plan as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanView {
    pub name: String,
    /// Price with currency, e.g. `₹2500`.
    pub price: String,
    /// Running discount label, e.g. `10% Discount`.
    pub discount: Option<String>,
    pub description: Option<String>,
}

impl From<&SubscriptionPlan> for PlanView {
    fn from(plan: &SubscriptionPlan) -> Self {
        Self {
            name: plan.name.clone(),
            price: format!("₹{}", format_number(plan.price)),
            discount: plan
                .active_discount()
                .map(|p| format!("{}% Discount", format_number(p))),
            description: plan.description.clone().filter(|d| !d.trim().is_empty()),
        }
    }
}

/// One review as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub name: String,
    pub stars: String,
    /// Rating clamped to 0..=5, formatted like a price.
    pub rating: String,
    /// Review date as `YYYY-MM-DD`; absent when the timestamp is missing
    /// or unreadable.
    pub reviewed_on: Option<String>,
    pub description: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        let rating = if review.rating.is_finite() {
            review.rating.clamp(0.0, 5.0)
        } else {
            0.0
        };
        Self {
            name: review.name.clone(),
            stars: star_string(rating),
            rating: format_number(rating),
            reviewed_on: review
                .created_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.format("%Y-%m-%d").to_string()),
            description: review.description.clone(),
        }
    }
}

/// Card shown in the per-status lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessCardView {
    pub id: String,
    pub name: String,
    pub address: String,
    pub status: VerificationStatus,
    pub status_label: &'static str,
    pub meal_label: &'static str,
    pub delivery_available: bool,

    /// Owner, contact and email are shown for pending and rejected messes.
    pub owner_name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,

    /// Plans and timings are shown for verified messes.
    pub plans: Vec<PlanView>,
    pub timings: Vec<TimingView>,

    /// Only set on rejected messes.
    pub rejection_reason: Option<String>,

    /// Whether accept/reject may be offered: the mess is pending and no
    /// update for it is outstanding.
    pub actions_enabled: bool,
}

impl MessCardView {
    /// Builds the card for `record`; `updating` is whether an update for it
    /// is in flight.
    pub fn from_record(record: &MessRecord, updating: bool) -> Self {
        let status = record.verification_status;
        let shows_contact = matches!(
            status,
            VerificationStatus::Pending | VerificationStatus::Rejected
        );
        let shows_offer = status == VerificationStatus::Verified;

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            address: record.address.clone(),
            status,
            status_label: status.label(),
            meal_label: record.meal_type.label(),
            delivery_available: record.delivery_available,
            owner_name: record.owner_name.clone().filter(|_| shows_contact),
            contact: record.contact_number.clone().filter(|_| shows_contact),
            email: record.email.clone().filter(|_| shows_contact),
            plans: if shows_offer {
                record.subscription_plans.iter().map(PlanView::from).collect()
            } else {
                Vec::new()
            },
            timings: if shows_offer { timing_views(record) } else { Vec::new() },
            rejection_reason: record
                .rejection_reason
                .clone()
                .filter(|_| status == VerificationStatus::Rejected),
            actions_enabled: status == VerificationStatus::Pending && !updating,
        }
    }
}

/// Full detail view of one mess, including photos and reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessDetailView {
    pub id: String,
    pub name: String,
    pub status_label: &'static str,
    pub address: String,
    pub owner_name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub meal_label: &'static str,
    pub delivery_available: bool,
    /// Service radius in km, without trailing zeros.
    pub service_radius: Option<String>,
    pub timings: Vec<TimingView>,
    pub plans: Vec<PlanView>,
    /// Photo locations; entries without a URL are dropped.
    pub photos: Vec<String>,
    pub reviews: Vec<ReviewView>,
    pub rejection_reason: Option<String>,
}

impl MessDetailView {
    pub fn from_record(record: &MessRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            status_label: record.verification_status.label(),
            address: record.address.clone(),
            owner_name: record.owner_name.clone(),
            contact: record.contact_number.clone(),
            email: record.email.clone(),
            meal_label: record.meal_type.label(),
            delivery_available: record.delivery_available,
            service_radius: record
                .service_radius_km
                .filter(|r| *r > 0.0)
                .map(format_number),
            timings: timing_views(record),
            plans: record.subscription_plans.iter().map(PlanView::from).collect(),
            photos: record
                .photos
                .iter()
                .filter(|p| !p.url.trim().is_empty())
                .map(|p| p.url.clone())
                .collect(),
            reviews: record.reviews.iter().map(ReviewView::from).collect(),
            rejection_reason: record
                .rejection_reason
                .clone()
                .filter(|_| record.verification_status == VerificationStatus::Rejected),
        }
    }
}

fn timing_views(record: &MessRecord) -> Vec<TimingView> {
    record
        .timings
        .iter()
        .map(|(slot, window)| TimingView {
            slot: slot.label(),
            start: window.start.clone(),
            end: window.end.clone(),
        })
        .collect()
}

/// Formats a number without a trailing `.0`, with at most two decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Fills a star for every started point of `rating`, which must be in 0..=5.
fn star_string(rating: f64) -> String {
    let filled = rating.ceil() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MealType, MealWindow, Photo};

    fn verified_record() -> MessRecord {
        let mut record = MessRecord::new("m1", "Annapurna", "Sector 4", MealType::Both);
        record.verification_status = VerificationStatus::Verified;
        record.owner_name = Some("Ravi".to_string());
        record.contact_number = Some("9876543210".to_string());
        record.timings.lunch = Some(MealWindow {
            start: "12:00".to_string(),
            end: "14:30".to_string(),
        });
        record.timings.breakfast = Some(MealWindow {
            start: "07:30".to_string(),
            end: "09:30".to_string(),
        });
        record.subscription_plans.push(SubscriptionPlan {
            id: None,
            name: "monthly".to_string(),
            price: 2500.0,
            discount_active: true,
            discount_percent: Some(10.0),
            description: Some("Two meals a day".to_string()),
        });
        record
    }

    #[test]
    fn test_card_fields_follow_status() {
        let verified = MessCardView::from_record(&verified_record(), false);
        assert_eq!(verified.meal_label, "Veg & Non-Veg");
        assert!(verified.contact.is_none());
        assert!(verified.owner_name.is_none());
        assert_eq!(verified.plans.len(), 1);
        assert_eq!(verified.timings[0].slot, "Breakfast");
        assert!(!verified.actions_enabled);

        let pending = verified_record().with_status(VerificationStatus::Pending, None);
        let card = MessCardView::from_record(&pending, false);
        assert_eq!(card.contact.as_deref(), Some("9876543210"));
        assert!(card.plans.is_empty());
        assert!(card.timings.is_empty());
        assert!(card.actions_enabled);
        assert!(!MessCardView::from_record(&pending, true).actions_enabled);

        let rejected = verified_record()
            .with_status(VerificationStatus::Rejected, Some("Unhygienic".to_string()));
        let card = MessCardView::from_record(&rejected, false);
        assert_eq!(card.owner_name.as_deref(), Some("Ravi"));
        assert_eq!(card.rejection_reason.as_deref(), Some("Unhygienic"));
        assert!(!card.actions_enabled);
    }

    #[test]
    fn test_plan_labels() {
        let plan = PlanView::from(&verified_record().subscription_plans[0]);
        assert_eq!(plan.price, "₹2500");
        assert_eq!(plan.discount.as_deref(), Some("10% Discount"));

        let mut inactive = verified_record().subscription_plans[0].clone();
        inactive.discount_active = false;
        inactive.price = 99.5;
        let plan = PlanView::from(&inactive);
        assert_eq!(plan.price, "₹99.5");
        assert!(plan.discount.is_none());
    }

    #[test]
    fn test_detail_view_reviews_and_photos() {
        let mut record = verified_record();
        record.service_radius_km = Some(3.0);
        record.photos = vec![
            Photo {
                id: None,
                url: "https://img.example/a.jpg".to_string(),
            },
            Photo {
                id: None,
                url: String::new(),
            },
        ];
        record.reviews = vec![Review {
            id: None,
            name: "Meera".to_string(),
            img_url: None,
            rating: 4.0,
            description: "Tasty dal".to_string(),
            created_at: Some("2024-03-05T10:15:00.000Z".to_string()),
        }];

        let detail = MessDetailView::from_record(&record);
        assert_eq!(detail.service_radius.as_deref(), Some("3"));
        assert_eq!(detail.photos, vec!["https://img.example/a.jpg".to_string()]);
        assert_eq!(detail.reviews[0].stars, "★★★★☆");
        assert_eq!(detail.reviews[0].reviewed_on.as_deref(), Some("2024-03-05"));
        assert_eq!(detail.timings.len(), 2);
    }

    #[test]
    fn test_fractional_and_out_of_range_ratings() {
        let mut review = Review {
            id: None,
            name: "Asha".to_string(),
            img_url: None,
            rating: 4.5,
            description: String::new(),
            created_at: Some("not a date".to_string()),
        };
        let view = ReviewView::from(&review);
        assert_eq!(view.stars, "★★★★★");
        assert_eq!(view.rating, "4.5");
        assert_eq!(view.reviewed_on, None);

        review.rating = 7.0;
        assert_eq!(ReviewView::from(&review).rating, "5");

        review.rating = -1.0;
        let view = ReviewView::from(&review);
        assert_eq!(view.stars, "☆☆☆☆☆");
        assert_eq!(view.rating, "0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(18.0), "18");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(2.25), "2.25");
    }
}
