use signup_core::validators::{
    is_password_empty, is_password_length_sufficient, is_password_matched, is_username_valid,
};

#[test]
fn username_needs_three_characters() {
    for (input, expected) in [
        ("", false),
        ("a", false),
        ("ab", false),
        ("abc", true),
        ("alice", true),
        ("   ", true),
    ] {
        assert_eq!(is_username_valid(input), expected, "input {input:?}");
    }
}

#[test]
fn username_length_counts_characters_not_bytes() {
    // Two characters, six bytes.
    assert!(!is_username_valid("äö"));
    assert!(is_username_valid("äöü"));
}

#[test]
fn password_emptiness_and_length() {
    assert!(is_password_empty(""));
    assert!(!is_password_empty(" "));

    assert!(!is_password_length_sufficient("abcde"));
    assert!(is_password_length_sufficient("abcdef"));
    assert!(is_password_length_sufficient("a much longer password"));
}

#[test]
fn password_match_is_reflexive_and_symmetric() {
    let samples = ["", "secret", "Secret", "secret ", "pässwörd"];
    for p in samples {
        assert!(is_password_matched(p, p));
        for c in samples {
            assert_eq!(is_password_matched(p, c), is_password_matched(c, p));
            assert_eq!(is_password_matched(p, c), p == c);
        }
    }
}
