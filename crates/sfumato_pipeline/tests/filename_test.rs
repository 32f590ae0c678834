use proptest::prelude::*;
use sfumato_pipeline::filename::{MAX_FILENAME_LEN, normalize, synthesize};

#[test]
fn spec_example() {
    assert_eq!(
        synthesize("Blue Shoes", "stylish blue athletic shoes", "jpg"),
        "blue-shoes-stylish-blue-athletic-shoes.jpg"
    );
}

#[test]
fn empty_inputs_never_panic() {
    let name = synthesize("", "", "jpg");
    assert!(!name.is_empty());
    assert!(name.ends_with(".jpg"));
}

proptest! {
    #[test]
    fn output_is_bounded(keyword in ".{0,300}", description in ".{0,300}") {
        let name = synthesize(&keyword, &description, "jpg");
        prop_assert!(name.len() <= MAX_FILENAME_LEN);
        prop_assert!(name.len() <= 204);
        prop_assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn output_has_no_whitespace_uppercase_or_double_hyphen(
        keyword in ".{0,80}",
        description in ".{0,80}",
    ) {
        let name = synthesize(&keyword, &description, "png");
        prop_assert!(!name.chars().any(char::is_whitespace));
        prop_assert!(!name.chars().any(char::is_uppercase));
        prop_assert!(!name.contains("--"));
    }

    #[test]
    fn normalized_inputs_are_fixed_points(
        keyword in "[a-z0-9 -]{0,60}",
        description in "[a-z0-9 -]{0,60}",
    ) {
        let keyword_normalized = normalize(&keyword).unwrap();
        let description_normalized = normalize(&description).unwrap();
        prop_assert_eq!(
            synthesize(&keyword_normalized, &description_normalized, "jpg"),
            synthesize(&keyword, &description, "jpg")
        );
    }
}
