//! Property-based tests for booking input handling
//!
//! Uses proptest to generate random inputs and verify properties

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use solzer::shared::booking::{generate_booking_id, is_booking_id, parse_schedule};
use solzer::shared::{normalize_email, BookingRequest};

proptest! {
    #[test]
    fn test_normalize_email_is_idempotent(raw in "[ -~\\t]{0,40}") {
        let once = normalize_email(&raw);
        prop_assert_eq!(normalize_email(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn test_normalize_email_ignores_case_and_padding(
        local in "[a-zA-Z0-9.]{1,12}",
        domain in "[a-zA-Z]{1,10}\\.[a-z]{2,3}",
        left in " {0,3}",
        right in " {0,3}",
    ) {
        let email = format!("{}@{}", local, domain);
        let padded = format!("{}{}{}", left, email.to_uppercase(), right);
        prop_assert_eq!(normalize_email(&padded), email.to_lowercase());
    }

    #[test]
    fn test_booking_ids_have_expected_shape(_ in 0..100u32) {
        let id = generate_booking_id();
        prop_assert!(is_booking_id(&id), "bad id {}", id);
    }

    #[test]
    fn test_date_only_is_midnight(year in 1970i32..2100, month in 1u32..=12, day in 1u32..=28) {
        let input = format!("{:04}-{:02}-{:02}", year, month, day);
        let parsed = parse_schedule(&input).unwrap();
        let expected = NaiveDate::from_ymd_opt(year, month, day).unwrap().and_time(NaiveTime::MIN);
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn test_full_datetime_is_kept(
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        separator in prop_oneof![Just('T'), Just(' ')],
    ) {
        let input = format!("2024-07-{:02}{}{:02}:{:02}", day, separator, hour, minute);
        let parsed = parse_schedule(&input).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 7, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn test_booking_owner_is_normalized(owner in "[a-z]{1,8}@[a-z]{1,8}\\.com") {
        let request = BookingRequest {
            service_name: Some("Plumbing".into()),
            date: Some("2024-05-01".into()),
            ..Default::default()
        };
        let booking = request.into_booking(&format!("  {} ", owner.to_uppercase())).unwrap();
        prop_assert_eq!(booking.user_email, owner);
    }
}
