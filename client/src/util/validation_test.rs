use super::*;

fn valid_form() -> RegisterForm {
    RegisterForm {
        full_name: "  Ada Lovelace ".to_owned(),
        email: "ada@campus.edu".to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
        accept_terms: true,
    }
}

#[test]
fn email_shape_check() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last@dept.campus.edu"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("ab.com"));
    assert!(!is_valid_email("a @b.com"));
}

#[test]
fn login_requires_both_fields() {
    let errors = validate_login("", "");
    assert_eq!(errors.get(Field::Email), Some("Email is required"));
    assert_eq!(errors.get(Field::Password), Some("Password is required"));
}

#[test]
fn login_rejects_malformed_email() {
    let errors = validate_login("not-an-email", "secret");
    assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
    assert_eq!(errors.get(Field::Password), None);
}

#[test]
fn login_accepts_well_formed_input() {
    assert!(validate_login("a@b.com", "x").is_empty());
}

#[test]
fn register_accepts_valid_form_and_trims_name() {
    let form = valid_form();
    assert!(validate_register(&form).is_empty());
    assert_eq!(form.to_request().full_name, "Ada Lovelace");
}

#[test]
fn register_name_rules() {
    let mut form = valid_form();
    form.full_name = "   ".to_owned();
    assert_eq!(validate_register(&form).get(Field::FullName), Some("Full name is required"));

    form.full_name = " A ".to_owned();
    assert_eq!(validate_register(&form).get(Field::FullName), Some("Full name must be at least 2 characters"));
}

#[test]
fn register_password_rules() {
    let mut form = valid_form();
    form.password = "12345".to_owned();
    form.confirm_password = "12345".to_owned();
    assert_eq!(validate_register(&form).get(Field::Password), Some("Password must be at least 6 characters"));

    form.password = "123456".to_owned();
    form.confirm_password = "654321".to_owned();
    let errors = validate_register(&form);
    assert_eq!(errors.get(Field::Password), None);
    assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
}

#[test]
fn register_requires_terms() {
    let mut form = valid_form();
    form.accept_terms = false;
    assert_eq!(validate_register(&form).get(Field::Terms), Some("You must accept the terms and conditions"));
}

#[test]
fn clearing_a_field_removes_only_its_error() {
    let mut errors = validate_login("", "");
    errors.clear(Field::Email);
    assert_eq!(errors.get(Field::Email), None);
    assert!(!errors.is_empty());
}
