//! Macros for easily making rule tests.

/// A macro for generating rule tests from err/ok code lists.
///
/// The code strings are run through a full [`Checker`](crate::Checker)
/// configured with the given JSON object, so pragma handling and positions
/// are exercised the same way real runs exercise them.
#[macro_export]
macro_rules! rule_tests {
    ($config:expr,
    err: {
        $($code:literal),* $(,)?
    },
    ok: {
        $($ok_code:literal),* $(,)?
    } $(,)?) => {
        rule_tests!(valid, invalid, $config, err: { $($code),* }, ok: { $($ok_code),* });
    };
    (
    $ok_name:ident,
    $err_name:ident,
    $config:expr,
    err: {
        $($code:literal),* $(,)?
    },
    ok: {
        $($ok_code:literal),* $(,)?
    } $(,)?) => {
        #[test]
        fn $err_name() {
            $(
                let mut checker = $crate::Checker::new();
                checker
                    .configure($config.as_object().expect("rule_tests config must be an object"))
                    .expect("test configuration must be valid");
                let errors = checker.check_string($code, "test.js");
                if errors.is_empty() {
                    panic!(
                        "\nExpected:\n```\n{}\n```\nto fail checking, but instead it passed",
                        $code
                    );
                }
            )*
        }

        #[test]
        fn $ok_name() {
            $(
                let mut checker = $crate::Checker::new();
                checker
                    .configure($config.as_object().expect("rule_tests config must be an object"))
                    .expect("test configuration must be valid");
                let errors = checker.check_string($ok_code, "test.js");
                if !errors.is_empty() {
                    panic!(
                        "\nExpected:\n```\n{}\n```\nto pass checking, but instead it threw:\n{:#?}",
                        $ok_code,
                        errors.get_error_list()
                    );
                }
            )*
        }
    };
}
