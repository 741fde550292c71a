//! Tests for the page state URL codec.

use feednav_model::{PageState, decode, encode, encode_url};
use proptest::prelude::*;

#[test]
fn stop_takes_priority_over_everything() {
    assert_eq!(
        decode("agency=A1&route=R1&service=WK&stop=S1"),
        PageState::stop("S1")
    );
}

#[test]
fn route_and_service_decode_to_timetable() {
    assert_eq!(
        decode("agency=A1&route=R1&service=WK&direction=1"),
        PageState::timetable("R1", "WK", Some("1".to_string()))
    );
    assert_eq!(
        decode("route=R1&service=WK"),
        PageState::timetable("R1", "WK", None)
    );
}

#[test]
fn partial_timetable_degrades_to_best_variant() {
    assert_eq!(decode("agency=A1&route=R1"), PageState::route("R1"));
    assert_eq!(decode("agency=A1"), PageState::agency("A1"));
    assert_eq!(decode("agency=A1&direction=0"), PageState::agency("A1"));
    assert_eq!(decode("service=WK"), PageState::service("WK"));
}

#[test]
fn garbage_decodes_to_home() {
    assert_eq!(decode(""), PageState::Home);
    assert_eq!(decode("?"), PageState::Home);
    assert_eq!(decode("foo=bar&&="), PageState::Home);
    assert_eq!(decode("stop="), PageState::Home);
    // invalid UTF-8 after percent-decoding
    assert_eq!(decode("stop=%FF%FE"), PageState::Home);
}

#[test]
fn contradictory_parameters_decode_to_home() {
    assert_eq!(decode("route=R1&route=R2"), PageState::Home);
    // repeating the same value is not a contradiction
    assert_eq!(decode("route=R1&route=R1"), PageState::route("R1"));
}

#[test]
fn accepts_full_locations() {
    assert_eq!(decode("/editor?stop=S7#map"), PageState::stop("S7"));
    assert_eq!(decode("/editor"), PageState::Home);
}

#[test]
fn encode_url_joins_base_path() {
    assert_eq!(encode_url("/editor", &PageState::Home), "/editor");
    assert_eq!(encode_url("", &PageState::agency("A")), "/?agency=A");
    assert_eq!(
        encode_url("/editor", &PageState::route("R 1")),
        "/editor?route=R%201"
    );
}

#[test]
fn escapes_reserved_characters() {
    let state = PageState::stop("a&b=c?d#e+f%g");
    let encoded = encode(&state);
    assert!(!encoded[5..].contains('&'));
    assert_eq!(decode(&encoded), state);
}

fn identifier() -> impl Strategy<Value = String> {
    // Any non-empty text, including reserved URL characters and unicode.
    "\\PC{1,16}"
}

fn page_state() -> impl Strategy<Value = PageState> {
    prop_oneof![
        Just(PageState::Home),
        identifier().prop_map(PageState::agency),
        identifier().prop_map(PageState::route),
        (identifier(), identifier(), proptest::option::of(identifier()))
            .prop_map(|(route, service, direction)| PageState::timetable(
                route, service, direction
            )),
        identifier().prop_map(PageState::stop),
        identifier().prop_map(PageState::service),
    ]
}

proptest! {
    #[test]
    fn decode_inverts_encode(state in page_state()) {
        prop_assert_eq!(decode(&encode(&state)), state);
    }

    #[test]
    fn decode_never_panics(input in "\\PC{0,64}") {
        let _ = decode(&input);
    }
}
