use serde_json::json;

use goap_api::{
    are_goals_satisfied, enabled_transitions, generate_action_plan, single_step, ApiError,
    ConditionIn, TransitionIn, VariableDef, VariableValueIn,
};
use goap_core::ModelError;

fn var(id: &str, ty: &str) -> VariableDef {
    serde_json::from_value(json!({ "id": id, "typeOf": ty })).expect("variable decodes")
}

fn int_value(id: &str, v: i64) -> VariableValueIn {
    serde_json::from_value(json!({ "variableId": id, "INT": v })).expect("value decodes")
}

fn int_cond(id: &str, op: &str, v: i64) -> ConditionIn {
    serde_json::from_value(json!({
        "variableId": id,
        "comparisonOperator": op,
        "argument": { "INT": v },
    }))
    .expect("condition decodes")
}

fn transition(value: serde_json::Value) -> TransitionIn {
    serde_json::from_value(value).expect("transition decodes")
}

#[test]
fn goals_satisfied_checks_the_built_state() {
    let vars = [var("x", "INT")];
    let state = [int_value("x", 5)];

    let hit = are_goals_satisfied(&vars, &state, &[int_cond("x", "EQ", 5)]).expect("query");
    assert!(hit);

    let miss = are_goals_satisfied(&vars, &state, &[int_cond("x", "EQ", 6)]).expect("query");
    assert!(!miss);
}

#[test]
fn omitted_variables_default_to_zero() {
    let vars = [var("x", "INT"), var("label", "STRING")];
    let hit = are_goals_satisfied(
        &vars,
        &[],
        &[
            int_cond("x", "EQ", 0),
            serde_json::from_value(json!({
                "variableId": "label",
                "comparisonOperator": "EQ",
                "argument": { "STRING": "" },
            }))
            .expect("condition decodes"),
        ],
    )
    .expect("query");
    assert!(hit);
}

#[test]
fn value_with_multiple_fields_is_malformed() {
    let vars = [var("x", "INT")];
    let bad: VariableValueIn =
        serde_json::from_value(json!({ "variableId": "x", "INT": 1, "FLOAT": 1.0 }))
            .expect("value decodes");

    let err = are_goals_satisfied(&vars, &[bad], &[]).expect_err("must fail");
    assert!(matches!(err, ApiError::MalformedValue { .. }));
}

#[test]
fn value_with_no_fields_is_malformed() {
    let vars = [var("x", "INT")];
    let bad: VariableValueIn =
        serde_json::from_value(json!({ "variableId": "x" })).expect("value decodes");

    let err = are_goals_satisfied(&vars, &[bad], &[]).expect_err("must fail");
    assert!(matches!(err, ApiError::MalformedValue { .. }));
}

#[test]
fn argument_with_both_forms_is_malformed() {
    let vars = [var("x", "INT")];
    let bad: ConditionIn = serde_json::from_value(json!({
        "variableId": "x",
        "comparisonOperator": "EQ",
        "argument": { "variableId": "x", "INT": 1 },
    }))
    .expect("condition decodes");

    let err = are_goals_satisfied(&vars, &[], &[bad]).expect_err("must fail");
    assert!(matches!(err, ApiError::MalformedArgument { .. }));
}

#[test]
fn literal_argument_with_multiple_fields_is_a_malformed_value() {
    let vars = [var("x", "INT")];
    let bad: ConditionIn = serde_json::from_value(json!({
        "variableId": "x",
        "comparisonOperator": "EQ",
        "argument": { "INT": 1, "FLOAT": 2.0 },
    }))
    .expect("condition decodes");

    let err = are_goals_satisfied(&vars, &[], &[bad]).expect_err("must fail");
    assert!(matches!(err, ApiError::MalformedValue { .. }));
}

#[test]
fn argument_with_neither_form_is_malformed() {
    let vars = [var("x", "INT")];
    let bad: ConditionIn = serde_json::from_value(json!({
        "variableId": "x",
        "comparisonOperator": "EQ",
        "argument": {},
    }))
    .expect("condition decodes");

    let err = are_goals_satisfied(&vars, &[], &[bad]).expect_err("must fail");
    assert!(matches!(err, ApiError::MalformedArgument { .. }));
}

#[test]
fn missing_required_fields_are_schema_errors() {
    let no_type: VariableDef = serde_json::from_value(json!({ "id": "x" })).expect("decodes");
    let err = are_goals_satisfied(&[no_type], &[], &[]).expect_err("must fail");
    assert_eq!(
        err,
        ApiError::Schema {
            field: "typeOf".to_string()
        }
    );

    let vars = [var("x", "INT")];
    let no_cost = transition(json!({
        "id": "t",
        "effects": [{ "variableId": "x", "assignmentOperator": "SET", "argument": { "INT": 1 } }],
    }));
    let err = generate_action_plan(&vars, &[no_cost], &[], &[]).expect_err("must fail");
    assert_eq!(
        err,
        ApiError::Schema {
            field: "cost".to_string()
        }
    );
}

#[test]
fn unknown_operator_id_is_rejected() {
    let vars = [var("x", "INT")];
    let bad = int_cond("x", "LIKE", 1);
    let err = are_goals_satisfied(&vars, &[], &[bad]).expect_err("must fail");
    assert_eq!(
        err,
        ApiError::UnsupportedOperator {
            op: "LIKE".to_string()
        }
    );
}

#[test]
fn operator_type_pair_outside_the_table_is_rejected() {
    let vars = [var("flag", "BOOLEAN")];
    let bad: ConditionIn = serde_json::from_value(json!({
        "variableId": "flag",
        "comparisonOperator": "LT",
        "argument": { "BOOLEAN": true },
    }))
    .expect("condition decodes");

    let err = are_goals_satisfied(&vars, &[], &[bad]).expect_err("must fail");
    assert!(matches!(
        err,
        ApiError::Model(ModelError::UnsupportedOperator { .. })
    ));
}

#[test]
fn duplicate_initial_assignment_is_rejected() {
    let vars = [var("x", "INT")];
    let err = are_goals_satisfied(&vars, &[int_value("x", 1), int_value("x", 2)], &[])
        .expect_err("must fail");
    assert!(matches!(
        err,
        ApiError::Model(ModelError::DuplicateAssignment { .. })
    ));
}

#[test]
fn single_step_returns_the_full_state_in_canonical_order() {
    let vars = [var("zeta", "INT"), var("alpha", "INT")];
    let bump = transition(json!({
        "id": "bump",
        "conditions": [{ "variableId": "zeta", "comparisonOperator": "LT", "argument": { "INT": 10 } }],
        "effects": [{ "variableId": "zeta", "assignmentOperator": "ADD", "argument": { "INT": 1 } }],
        "cost": 1.0,
    }));

    let next = single_step(&vars, &[int_value("zeta", 4)], &bump)
        .expect("query")
        .expect("transition is enabled");

    let wire = serde_json::to_value(&next).expect("state serializes");
    assert_eq!(
        wire,
        json!([
            { "variableId": "alpha", "INT": 0 },
            { "variableId": "zeta", "INT": 5 },
        ])
    );
}

#[test]
fn single_step_on_a_disabled_transition_is_none() {
    let vars = [var("x", "INT")];
    let bump = transition(json!({
        "id": "bump",
        "conditions": [{ "variableId": "x", "comparisonOperator": "LT", "argument": { "INT": 10 } }],
        "effects": [{ "variableId": "x", "assignmentOperator": "ADD", "argument": { "INT": 1 } }],
        "cost": 1.0,
    }));

    let next = single_step(&vars, &[int_value("x", 10)], &bump).expect("query");
    assert!(next.is_none());
}

#[test]
fn single_step_with_failing_arithmetic_is_none() {
    let vars = [var("x", "INT")];
    let crash = transition(json!({
        "id": "crash",
        "effects": [{ "variableId": "x", "assignmentOperator": "DIV", "argument": { "INT": 0 } }],
        "cost": 1.0,
    }));

    let next = single_step(&vars, &[int_value("x", 4)], &crash).expect("query");
    assert!(next.is_none());
}

#[test]
fn enabled_transitions_preserve_input_order() {
    let vars = [var("x", "INT")];
    let low = transition(json!({
        "id": "low",
        "conditions": [{ "variableId": "x", "comparisonOperator": "LT", "argument": { "INT": 10 } }],
        "cost": 1.0,
    }));
    let blocked = transition(json!({
        "id": "blocked",
        "conditions": [{ "variableId": "x", "comparisonOperator": "GT", "argument": { "INT": 10 } }],
        "cost": 1.0,
    }));
    let always = transition(json!({ "id": "always", "cost": 1.0 }));

    let enabled = enabled_transitions(&vars, &[int_value("x", 5)], &[low, blocked, always])
        .expect("query");
    assert_eq!(enabled, vec!["low".to_string(), "always".to_string()]);
}

#[test]
fn generate_action_plan_round_trips_the_wire_shape() {
    let vars = [var("x", "INT")];
    let t1 = transition(json!({
        "id": "t1",
        "conditions": [{ "variableId": "x", "comparisonOperator": "LT", "argument": { "INT": 10 } }],
        "effects": [{ "variableId": "x", "assignmentOperator": "SET", "argument": { "INT": 10 } }],
        "action": "A",
        "cost": 1.0,
    }));

    let plan = generate_action_plan(
        &vars,
        &[t1],
        &[int_value("x", 5)],
        &[int_cond("x", "EQ", 10)],
    )
    .expect("query");

    let wire = serde_json::to_value(&plan).expect("plan serializes");
    assert_eq!(wire["status"], json!("FOUND"));
    assert_eq!(wire["actions"], json!(["A"]));
    assert_eq!(wire["transitions"], json!(["t1"]));
    assert_eq!(wire["totalSteps"], json!(1));
    assert_eq!(wire["totalCost"], json!(1.0));
    assert_eq!(wire["initialState"], json!([{ "variableId": "x", "INT": 5 }]));
    assert_eq!(wire["finalState"], json!([{ "variableId": "x", "INT": 10 }]));
}

#[test]
fn unreachable_plan_serializes_its_status() {
    let vars = [var("flag", "BOOLEAN")];
    let goal: ConditionIn = serde_json::from_value(json!({
        "variableId": "flag",
        "comparisonOperator": "EQ",
        "argument": { "BOOLEAN": true },
    }))
    .expect("condition decodes");

    let plan = generate_action_plan(&vars, &[], &[], &[goal]).expect("query");
    let wire = serde_json::to_value(&plan).expect("plan serializes");
    assert_eq!(wire["status"], json!("UNREACHABLE"));
    assert_eq!(wire["transitions"], json!([]));
    assert_eq!(wire["totalCost"], json!(0.0));
}
