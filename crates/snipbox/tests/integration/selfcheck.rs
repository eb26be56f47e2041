use snipbox::selfcheck::{self, SELF_CHECK_CASES};
use snipbox::DispatchOutcome;

use super::test_runner;

#[tokio::test]
async fn all_cases_pass_against_the_reference_registry() {
    let runner = test_runner();
    selfcheck::run(&runner).await.expect("self-check failed");
}

#[tokio::test]
async fn each_case_matches_byte_for_byte() {
    let runner = test_runner();

    for case in SELF_CHECK_CASES {
        let outcome = runner.dispatch(case.code, case.language).await;
        assert_eq!(
            outcome,
            DispatchOutcome::output(case.expected_output),
            "self-check case '{}' diverged",
            case.language
        );
    }
}
