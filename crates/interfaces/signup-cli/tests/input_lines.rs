use signup_app_core::FormCommand;
use signup_cli::input::parse_line;
use signup_core::AuthenticationState;

#[test]
fn fields_are_parsed_verbatim() {
    match parse_line("username=alice\n").unwrap() {
        Some(FormCommand::SetUsername(v)) => assert_eq!(v, "alice"),
        other => panic!("unexpected {other:?}"),
    }
    match parse_line("password= a=b ").unwrap() {
        Some(FormCommand::SetPassword(v)) => assert_eq!(v, " a=b "),
        other => panic!("unexpected {other:?}"),
    }
    match parse_line("confirmPassword=").unwrap() {
        Some(FormCommand::SetConfirmPassword(v)) => assert_eq!(v, ""),
        other => panic!("unexpected {other:?}"),
    }
    match parse_line("auth=Authenticating").unwrap() {
        Some(FormCommand::SetAuthenticationState(s)) => {
            assert_eq!(s, AuthenticationState::Authenticating)
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn blanks_and_comments_are_skipped() {
    assert!(parse_line("").unwrap().is_none());
    assert!(parse_line("   \r\n").unwrap().is_none());
    assert!(parse_line("# username=ignored").unwrap().is_none());
}

#[test]
fn malformed_lines_are_rejected() {
    assert!(parse_line("username").is_err());
    assert!(parse_line("email=a@b.c").is_err());
    assert!(parse_line("auth=maybe").is_err());
}
