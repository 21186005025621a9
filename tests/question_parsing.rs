//! Numbered-list parsing and the static fallback list.

use outreach_bot::outreach::{fallback_questions, parse_questions};

#[test]
fn numbered_lines_are_extracted_and_junk_dropped() {
    let response = "1. Foo?\n2.Bar?\nnot a question\n3.   \n";
    assert_eq!(parse_questions(response), vec!["Foo?", "Bar?"]);
}

#[test]
fn leading_whitespace_before_the_number_is_fine() {
    let response = "  1. What rooms need cleaning?\n\t2. How often?";
    assert_eq!(
        parse_questions(response),
        vec!["What rooms need cleaning?", "How often?"]
    );
}

#[test]
fn multi_digit_numbers_parse() {
    let response = "10. Tenth question?\n11. Eleventh?";
    assert_eq!(parse_questions(response), vec!["Tenth question?", "Eleventh?"]);
}

#[test]
fn prose_without_numbering_yields_nothing() {
    let response = "Here are some questions you could ask.\nMaybe ask about price.";
    assert!(parse_questions(response).is_empty());
}

#[test]
fn fallback_list_is_the_fixed_five() {
    let fallback = fallback_questions();
    assert_eq!(fallback.len(), 5);
    assert_eq!(fallback[0], "What specific services do you need?");
    assert_eq!(fallback[3], "What is your budget range?");
    assert_eq!(fallback[4], "Is there anything else the business should know?");
}
