//! Listing rendering: full records, degraded records, website stripping,
//! zipcode validation.

use outreach_bot::yelp::{
    is_valid_zipcode, render_listing, render_record, strip_website_lines, BusinessDetail,
    BusinessRecord, HoursBlock, OpenSlot,
};

fn summary_record(rank: usize, name: &str) -> BusinessRecord {
    BusinessRecord {
        rank,
        name: name.to_string(),
        phone: Some("(415) 555-0100".to_string()),
        address: vec!["123 Mission St".to_string(), "San Francisco, CA 94107".to_string()],
        rating: 4.5,
        review_count: 120,
        yelp_url: Some("https://www.yelp.com/biz/test-biz".to_string()),
        detail: None,
    }
}

fn full_record() -> BusinessRecord {
    let mut record = summary_record(1, "Test Biz");
    record.detail = Some(BusinessDetail {
        website: Some("https://testbiz.example".to_string()),
        price: Some("$$".to_string()),
        hours: Some(HoursBlock {
            is_open_now: true,
            open: vec![OpenSlot {
                day: 2,
                start: "0900".to_string(),
                end: "1730".to_string(),
            }],
        }),
        categories: vec![
            "Movers".to_string(),
            "Packing Services".to_string(),
            "Storage".to_string(),
            "Extra Category".to_string(),
        ],
        transactions: vec!["pickup".to_string(), "restaurant_reservation".to_string()],
        messaging_use_case: Some("Request a Quote".to_string()),
        messaging_response_rate: None,
    });
    record
}

#[test]
fn zipcode_validation_matrix() {
    assert!(is_valid_zipcode("94107"));
    assert!(is_valid_zipcode("00000"));
    assert!(!is_valid_zipcode(""));
    assert!(!is_valid_zipcode("9410"));
    assert!(!is_valid_zipcode("941070"));
    assert!(!is_valid_zipcode("94a07"));
    assert!(!is_valid_zipcode("94107 "));
    assert!(!is_valid_zipcode("94-07"));
}

#[test]
fn full_record_renders_every_block() {
    let rendered = render_record(&full_record(), 2);
    assert!(rendered.contains("[1] Test Biz"));
    assert!(rendered.contains("📞 (415) 555-0100"));
    assert!(rendered.contains("⭐ 4.5 (120 reviews)"));
    assert!(rendered.contains("📍 123 Mission St, San Francisco, CA 94107"));
    // Price, open state, and today's window share the status line.
    assert!(rendered.contains("💫 $$ • Open • 09:00-17:30"));
    // Categories cap at three.
    assert!(rendered.contains("🏷️ Movers, Packing Services, Storage"));
    assert!(!rendered.contains("Extra Category"));
    // Transactions are title-cased.
    assert!(rendered.contains("💳 Pickup, Restaurant Reservation"));
    assert!(rendered.contains("🔗 https://www.yelp.com/biz/test-biz"));
    assert!(rendered.contains("🌐 https://testbiz.example"));
}

#[test]
fn hours_window_omitted_when_today_has_no_slot() {
    // Slot is for day 2; render as if today were day 5.
    let rendered = render_record(&full_record(), 5);
    assert!(rendered.contains("💫 $$ • Open"));
    assert!(!rendered.contains("09:00-17:30"));
}

#[test]
fn degraded_record_renders_summary_fields_only() {
    let rendered = render_record(&summary_record(3, "Fallback Biz"), 0);
    assert!(rendered.contains("[3] Fallback Biz"));
    assert!(rendered.contains("⭐ 4.5 (120 reviews)"));
    assert!(rendered.contains("📍 123 Mission St"));
    assert!(rendered.contains("🔗 https://www.yelp.com/biz/test-biz"));
    // No detail-only blocks, not even the phone line.
    assert!(!rendered.contains("📞"));
    assert!(!rendered.contains("💫"));
    assert!(!rendered.contains("🏷️"));
    assert!(!rendered.contains("🌐"));
}

#[test]
fn degraded_record_in_a_batch_does_not_disturb_the_others() {
    let records = vec![full_record(), summary_record(2, "Degraded Biz")];
    let listing = render_listing("movers", "94107", &records);
    assert!(listing.starts_with("🔍 Top results for 'movers' in 94107:"));
    assert!(listing.contains("[1] Test Biz"));
    assert!(listing.contains("[2] Degraded Biz"));
}

#[test]
fn website_lines_are_stripped_for_list_output() {
    let listing = render_listing("movers", "94107", &[full_record()]);
    let stripped = strip_website_lines(&listing);
    assert!(!stripped.contains("🌐"));
    assert!(!stripped.contains("https://testbiz.example"));
    // The Yelp listing URL stays.
    assert!(stripped.contains("🔗 https://www.yelp.com/biz/test-biz"));
}
