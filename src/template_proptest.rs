//! Property-based tests for the placeholder template language.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::template::{render_str, Template};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn single(name: &str, value: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(name.to_string(), value.to_string());
        vars
    }

    proptest! {
        /// Property: parsing never panics, whatever the input
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = Template::parse(&input);
        }

        /// Property: text without braces renders verbatim
        #[test]
        fn brace_free_text_is_verbatim(input in "[^{}]*") {
            let result = render_str(&input, &HashMap::new()).unwrap();
            prop_assert_eq!(result, input);
        }

        /// Property: a field is replaced by exactly its value, which is never
        /// itself interpreted
        #[test]
        fn field_is_replaced_by_value(
            prefix in "[^{}]*",
            suffix in "[^{}]*",
            name in "[A-Za-z_][A-Za-z0-9_]{0,12}",
            value in ".*",
        ) {
            let src = format!("{}{{{{.{}}}}}{}", prefix, name, suffix);
            let result = render_str(&src, &single(&name, &value)).unwrap();
            prop_assert_eq!(result, format!("{}{}{}", prefix, value, suffix));
        }

        /// Property: referencing any name missing from the context fails
        #[test]
        fn missing_field_is_an_error(name in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
            let src = format!("{{{{.{}}}}}", name);
            prop_assert!(render_str(&src, &HashMap::new()).is_err());
        }

        /// Property: variables() reports each referenced name exactly once
        #[test]
        fn variables_are_deduplicated(names in proptest::collection::vec("[a-z]{1,4}", 0..8)) {
            let src: String = names.iter().map(|n| format!("{{{{.{}}}}} ", n)).collect();
            let tmpl = Template::parse(&src).unwrap();
            let reported = tmpl.variables();

            let mut expected: Vec<&str> = Vec::new();
            for n in &names {
                if !expected.contains(&n.as_str()) {
                    expected.push(n);
                }
            }
            prop_assert_eq!(reported, expected);
        }
    }
}
