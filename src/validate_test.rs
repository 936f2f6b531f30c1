use super::*;

fn good_register() -> RegisterParams {
    RegisterParams {
        username: "alice".to_owned(),
        password: "Secret123".to_owned(),
        email: "alice@example.com".to_owned(),
        sex: "F".to_owned(),
        verification_code: "123456".to_owned(),
    }
}

#[test]
fn valid_registration_passes() {
    assert_eq!(register(&good_register()), Ok(()));
}

#[test]
fn username_length_bounds() {
    assert!(username("abc").is_err());
    assert!(username("abcd").is_ok());
    assert!(username(&"a".repeat(32)).is_ok());
    assert!(username(&"a".repeat(33)).is_err());
    assert_eq!(username("   ").unwrap_err().message, "must not be blank");
}

#[test]
fn password_rules() {
    assert!(password("password", "Secret123").is_ok());
    for weak in ["short1A", "alllower123", "ALLUPPER123", "NoDigitsHere", "Has space1A", "Symbol#12aB"] {
        assert!(password("password", weak).is_err(), "{weak}");
    }
}

#[test]
fn password_error_names_field() {
    assert_eq!(password("newPassword", "weak").unwrap_err().field, "newPassword");
}

#[test]
fn email_shapes() {
    assert!(email("a@b.co").is_ok());
    for bad in ["", "plain", "@b.co", "a@", "a@b", "a@.co", "a@b.", "a@@b.co", "a b@c.de"] {
        assert!(email(bad).is_err(), "{bad:?}");
    }
}

#[test]
fn sex_must_be_m_or_f() {
    let params = RegisterParams { sex: "X".to_owned(), ..good_register() };
    assert_eq!(register(&params).unwrap_err().field, "sex");
}

#[test]
fn verification_code_must_be_six_chars() {
    assert!(verification_code("12345").is_err());
    assert!(verification_code("123456").is_ok());
    assert!(verification_code("1234567").is_err());
}

#[test]
fn login_requires_both_fields() {
    let ok = LoginParams { username: "alice".to_owned(), password: "x".to_owned() };
    assert!(login(&ok).is_ok());
    let blank = LoginParams { password: " ".to_owned(), ..ok };
    assert_eq!(login(&blank).unwrap_err().field, "password");
}

#[test]
fn reset_password_checks_every_field() {
    let params = ResetPasswordParams {
        email: "alice@example.com".to_owned(),
        verification_code: "123456".to_owned(),
        new_password: "Newpass123".to_owned(),
    };
    assert!(reset_password(&params).is_ok());
    let bad = ResetPasswordParams { new_password: "weak".to_owned(), ..params };
    assert_eq!(reset_password(&bad).unwrap_err().field, "newPassword");
}

#[test]
fn error_display_includes_field() {
    let err = username("ab").unwrap_err();
    assert_eq!(err.to_string(), "username: must be 4-32 characters");
}
