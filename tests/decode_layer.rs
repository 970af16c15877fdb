use octofetch::decode;
use octofetch::error::FetchError;
use octofetch::github::{UserProfile, UserRepo};

#[test]
fn status_is_checked_before_the_body_is_parsed() {
    // GitHub's 404 body is valid JSON; it must still classify as
    // BadStatus, never as a decode error.
    let body = br#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
    let result: Result<UserProfile, _> = decode::json(404, body);
    assert!(matches!(result, Err(FetchError::BadStatus(404))));
}

#[test]
fn in_range_parse_failure_is_unexpected_with_cause() {
    let result: Result<UserProfile, _> = decode::json(200, b"<!doctype html>");
    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Unexpected(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn profile_round_trip_yields_handle_and_placeholders() {
    let profile: UserProfile = decode::json(200, br#"{"login":"abc"}"#).unwrap();
    assert_eq!(profile.handle(), "abc");
    assert_eq!(profile.display_name(), "");
    assert_eq!(profile.contact(), "");
    assert_eq!(profile.avatar(), "");
}

#[test]
fn repo_list_preserves_input_order() {
    let body = br#"[{"id":2,"name":"z"},{"id":1,"name":"a"},{"id":3}]"#;
    let repos: Vec<UserRepo> = decode::json(200, body).unwrap();
    assert_eq!(repos.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    assert_eq!(repos[2].title(), "No name");
}

#[test]
fn image_decoding_respects_the_same_ordering() {
    assert!(matches!(
        decode::image(503, b"service unavailable"),
        Err(FetchError::BadStatus(503))
    ));
    assert!(matches!(
        decode::image(200, b"not an image"),
        Err(FetchError::Unexpected(_))
    ));
}

#[test]
fn boundary_statuses() {
    assert!(decode::check_status(200).is_ok());
    assert!(decode::check_status(299).is_ok());
    assert!(matches!(
        decode::check_status(300),
        Err(FetchError::BadStatus(300))
    ));
    assert!(matches!(
        decode::check_status(199),
        Err(FetchError::BadStatus(199))
    ));
}
