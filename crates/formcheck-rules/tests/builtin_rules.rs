//! Behaviour of the built-in rule set

use formcheck_rules::RuleRegistry;
use rstest::rstest;

fn check(name: &str, value: &str) -> bool {
    RuleRegistry::with_builtin_rules()
        .get_rule(name)
        .unwrap()
        .check(value, None)
}

#[rstest]
#[case("email")]
#[case("zipCode")]
#[case("password")]
#[case("passwordConfirmation")]
#[case("emailConfirmation")]
fn test_empty_value_passes(#[case] rule: &str) {
    assert!(check(rule, ""), "{rule} should pass on an empty value");
}

#[rstest]
#[case("", false)]
#[case("x", true)]
#[case(" ", true)]
fn test_required(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(check("required", value), expected);
}

#[rstest]
#[case("a@b.c", true)]
#[case("john.doe@example.com", true)]
#[case("abc", false)]
#[case("a@b", false)]
#[case("@b.c", false)]
#[case("a@.c", false)]
#[case("a@b.", false)]
fn test_email(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(check("email", value), expected);
}

#[rstest]
#[case("12345", true)]
#[case("1234", false)]
#[case("123456", false)]
#[case("12a45", false)]
fn test_zip_code(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(check("zipCode", value), expected);
}

#[rstest]
#[case("abcdef".to_string(), true)]
#[case("abcde".to_string(), false)]
#[case("a".repeat(32), true)]
#[case("a".repeat(33), false)]
fn test_password_length(#[case] value: String, #[case] expected: bool) {
    assert_eq!(check("password", &value), expected);
}

#[test]
fn test_messages() {
    let registry = RuleRegistry::with_builtin_rules();
    let message = |name: &str| registry.get_rule(name).unwrap().message().to_string();

    assert_eq!(message("required"), "This field is required.");
    assert_eq!(message("email"), "Enter a valid e-mail address.");
    assert_eq!(message("zipCode"), "Provide a valid zip code (5 digit number)");
    assert_eq!(message("password"), "Provide a valid password (6-32 characters long)");
    assert_eq!(message("passwordConfirmation"), "Please confirm your password");
    assert_eq!(message("emailConfirmation"), "Please confirm your email");
}

#[rstest]
#[case("passwordConfirmation", "abc", Some("abc"), true)]
#[case("passwordConfirmation", "abc", Some("abcxyz"), false)]
#[case("passwordConfirmation", "", Some("abcxyz"), true)]
#[case("passwordConfirmation", "abc", None, false)]
#[case("emailConfirmation", "a@b.c", Some("a@b.c"), true)]
#[case("emailConfirmation", "a@b.c", Some("A@b.c"), false)]
fn test_confirmation(
    #[case] rule: &str,
    #[case] value: &str,
    #[case] sibling: Option<&str>,
    #[case] expected: bool,
) {
    let registry = RuleRegistry::with_builtin_rules();
    assert_eq!(registry.get_rule(rule).unwrap().check(value, sibling), expected);
}
