//! Turn-evaluator behavior against a scripted oracle: the acceptance
//! contract, the substitution policy, and fail-safe recovery from unusable
//! oracle output.

mod support;

use std::sync::Arc;

use support::ScriptedOracle;
use valise::error::OracleError;
use valise::game::{FALLBACK_ERROR, FALLBACK_RESPONSE, GameState, TurnEvaluator};

fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn evaluator(oracle: ScriptedOracle) -> (TurnEvaluator, Arc<ScriptedOracle>) {
    let oracle = Arc::new(oracle);
    (TurnEvaluator::new(oracle.clone()), oracle)
}

#[tokio::test]
async fn first_turn_passes_well_formed_acceptance_through_verbatim() {
    let (evaluator, oracle) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":true,"new_items":["shirt","socks"],"response_text":"I'm packing my suitcase and in it I have...shirt, socks","error_description":null}"#,
    ]));

    let outcome = evaluator.evaluate(&[], "shirt").await.unwrap();

    assert!(outcome.is_correct);
    assert_eq!(outcome.new_items, items(&["shirt", "socks"]));
    assert_eq!(
        outcome.response_text,
        "I'm packing my suitcase and in it I have...shirt, socks"
    );
    assert!(outcome.error_description.is_none());
    assert_eq!(oracle.recorded_prompts().len(), 1);
}

#[tokio::test]
async fn transposed_recall_is_rejected_and_list_unchanged() {
    // Correct items in the wrong order: the oracle applies the in-order rule
    // and the evaluator guarantees the list does not move.
    let expected = items(&["shirt", "socks", "toothbrush"]);
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":false,"new_items":["shirt","socks","toothbrush"],"response_text":"Almost! Give it another go.","error_description":"The order was incorrect. The item after 'shirt' should have been 'socks'."}"#,
    ]));

    let outcome = evaluator
        .evaluate(&expected, "socks shirt toothbrush comb")
        .await
        .unwrap();

    assert!(!outcome.is_correct);
    assert_eq!(outcome.new_items, expected);
    assert!(outcome.error_description.unwrap().contains("order"));
}

#[tokio::test]
async fn four_of_five_in_order_is_accepted_with_single_oracle_addition() {
    // 4/5 clears the 80% threshold; the final list is prior + player item +
    // exactly one oracle item.
    let expected = items(&["shirt", "socks", "toothbrush", "comb", "map"]);
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":true,"new_items":["shirt","socks","toothbrush","comb","map","torch","compass"],"response_text":"I'm packing my suitcase and in it I have...shirt, socks, toothbrush, comb, map, torch, compass","error_description":null}"#,
    ]));

    let outcome = evaluator
        .evaluate(&expected, "shirt socks toothbrush map torch")
        .await
        .unwrap();

    assert!(outcome.is_correct);
    assert_eq!(outcome.new_items.len(), expected.len() + 2);
}

#[tokio::test]
async fn three_of_five_is_rejected() {
    let expected = items(&["shirt", "socks", "toothbrush", "comb", "map"]);
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":false,"new_items":["shirt","socks","toothbrush","comb","map"],"response_text":"Good try! Let's take it from the top.","error_description":"You missed 'comb' and 'map'."}"#,
    ]));

    let outcome = evaluator
        .evaluate(&expected, "shirt socks toothbrush torch")
        .await
        .unwrap();

    assert!(!outcome.is_correct);
    assert_eq!(outcome.new_items, expected);
}

#[tokio::test]
async fn hat_never_reaches_the_committed_list_or_narration() {
    // Even if the oracle ignores the blacklist instruction, the committed
    // list says "cap" and the narration never mentions the original word.
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":true,"new_items":["shirt","hat","scarf"],"response_text":"I'm packing my suitcase and in it I have...shirt, hat, scarf","error_description":null}"#,
    ]));

    let outcome = evaluator.evaluate(&items(&["shirt"]), "shirt hat").await.unwrap();

    assert!(outcome.is_correct);
    assert_eq!(outcome.new_items, items(&["shirt", "cap", "scarf"]));
    assert!(!outcome.response_text.to_lowercase().contains("hat"));
    assert!(outcome.response_text.contains("cap"));
}

#[tokio::test]
async fn plain_prose_answer_falls_back_without_raising() {
    let prior = items(&["shirt", "socks"]);
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        "I'm afraid I can't format that as JSON today.",
    ]));

    let outcome = evaluator.evaluate(&prior, "shirt socks comb").await.unwrap();

    assert!(!outcome.is_correct);
    assert_eq!(outcome.new_items, prior);
    assert_eq!(outcome.response_text, FALLBACK_RESPONSE);
    assert_eq!(outcome.error_description.as_deref(), Some(FALLBACK_ERROR));
}

#[tokio::test]
async fn code_fenced_answer_is_extracted_and_honored() {
    let raw = "```json\n{ \"is_correct\": true, \"new_items\": [\"shirt\"], \"response_text\": \"I'm packing my suitcase and in it I have...shirt\", \"error_description\": null }\n```";
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[raw]));

    let outcome = evaluator.evaluate(&[], "shirt").await.unwrap();

    assert!(outcome.is_correct);
    assert_eq!(outcome.new_items, items(&["shirt"]));
}

#[tokio::test]
async fn rejection_is_idempotent_across_retries() {
    let prior = items(&["shirt", "socks"]);
    let rejection = r#"{"is_correct":false,"new_items":["shirt","socks"],"response_text":"Not quite — try again!","error_description":"You missed 'socks'."}"#;
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[rejection, rejection]));

    let first = evaluator.evaluate(&prior, "shirt").await.unwrap();
    let second = evaluator.evaluate(&prior, "shirt").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.new_items, prior);
}

#[tokio::test]
async fn missing_prefix_rejection_keeps_explanation() {
    // Scenario: player missed "socks"; oracle's explanation surfaces, list
    // stays put.
    let prior = items(&["shirt", "socks"]);
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":false,"new_items":["shirt","socks"],"response_text":"So close! Have another try.","error_description":"You missed an item: 'socks'."}"#,
    ]));

    let outcome = evaluator.evaluate(&prior, "shirt").await.unwrap();

    assert_eq!(outcome.new_items, prior);
    assert_eq!(
        outcome.error_description.as_deref(),
        Some("You missed an item: 'socks'.")
    );
}

#[tokio::test]
async fn unreachable_oracle_surfaces_as_explicit_error() {
    let oracle = ScriptedOracle::new();
    oracle.push_failure(OracleError::Unavailable("connect timeout".into()));
    let (evaluator, _) = evaluator(oracle);

    let err = evaluator.evaluate(&[], "shirt").await.unwrap_err();
    assert!(matches!(err, OracleError::Unavailable(_)));
}

#[tokio::test]
async fn prompt_carries_state_utterance_and_acceptance_rule() {
    let (evaluator, oracle) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":false,"new_items":["shirt","socks"],"response_text":"Try again!","error_description":"You missed an item"}"#,
    ]));

    evaluator
        .evaluate(&items(&["shirt", "socks"]), "shirt comb")
        .await
        .unwrap();

    let prompts = oracle.recorded_prompts();
    assert_eq!(prompts.len(), 1, "exactly one oracle call per turn");
    let user = &prompts[0].messages[0].content;
    assert!(user.contains("shirt, socks"));
    assert!(user.contains("shirt comb"));
    assert!(user.contains("at least 80% of the expected items in the correct order"));
    assert!(prompts[0].system.contains("BLACKLIST"));
}

#[tokio::test]
async fn state_advance_is_immutable_update() {
    let (evaluator, _) = evaluator(ScriptedOracle::returning(&[
        r#"{"is_correct":true,"new_items":["shirt","socks"],"response_text":"I'm packing my suitcase and in it I have...shirt, socks","error_description":null}"#,
    ]));

    let state = GameState::new();
    let outcome = evaluator.evaluate(&state.items, "shirt").await.unwrap();
    let next = state.advance(&outcome);

    assert!(state.items.is_empty(), "prior snapshot is untouched");
    assert_eq!(next.items, items(&["shirt", "socks"]));
}
