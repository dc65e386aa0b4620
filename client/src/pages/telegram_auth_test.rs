use super::*;

#[test]
fn magic_link_token_trims_value() {
    assert_eq!(magic_link_token(Some(" abc ".to_owned())).as_deref(), Some("abc"));
}

#[test]
fn magic_link_token_rejects_missing_or_blank() {
    assert_eq!(magic_link_token(None), None);
    assert_eq!(magic_link_token(Some("   ".to_owned())), None);
}
