use super::*;

#[test]
fn failure_displays_its_message() {
    assert_eq!(Notice::Failure("email already used".to_owned()).to_string(), "email already used");
}

#[test]
fn fixed_notices_have_text() {
    for notice in [Notice::Connectivity, Notice::PermissionDenied, Notice::NotFound, Notice::ServerError] {
        assert!(!notice.to_string().is_empty(), "{notice:?}");
    }
}

#[test]
fn notice_log_keeps_order() {
    let log = NoticeLog::new();
    log.notify(Notice::NotFound);
    log.notify(Notice::Failure(GENERIC_FAILURE.to_owned()));

    assert_eq!(log.notices(), vec![Notice::NotFound, Notice::Failure(GENERIC_FAILURE.to_owned())]);
    assert_eq!(log.last(), Some(Notice::Failure(GENERIC_FAILURE.to_owned())));
}
