#![cfg(feature = "cursor")]
//! Integration tests for action cursors.

use actkit::arguments::ArgumentPack;
use actkit::cursor::{
    ActionCursor, CursorError, Error, Invocation, Operand, Scope, a, act, action_cursor_by,
    action_cursor_with_priority, b, c, d, nature, placeholder, x,
};
use actkit::operands;
use actkit::value::{EvaluationError, Value};
use rstest::rstest;

fn ints<const N: usize>(values: [i64; N]) -> Vec<Value> {
    values.into_iter().map(Value::from).collect()
}

fn value_of(invocation: Result<Invocation, Error>) -> Value {
    invocation.unwrap().into_value().unwrap()
}

// =============================================================================
// Evaluation
// =============================================================================

#[rstest]
fn test_increment_of_single_argument() {
    assert_eq!(value_of((x() + 1).call(ints([5]))), Value::from(6));
}

#[rstest]
fn test_difference_binds_alphabetically() {
    assert_eq!(value_of((a() - b()).call(ints([10, 3]))), Value::from(7));
    assert_eq!(value_of((b() - a()).call(ints([10, 3]))), Value::from(-7));
}

#[rstest]
fn test_mixed_arithmetic() {
    let expression = a() * b() + c() / 2;

    assert_eq!(
        expression.evaluate_with(ints([2, 3, 5])),
        Ok(Value::from(8.5))
    );
}

#[rstest]
fn test_string_concatenation() {
    let greeting = a() + ", " + b();

    assert_eq!(
        greeting.evaluate_with([Value::from("hello"), Value::from("world")]),
        Ok(Value::from("hello, world"))
    );
}

#[rstest]
fn test_reflected_operand_on_left() {
    let from_hundred = 100 - a();

    assert_eq!(from_hundred.evaluate_with(ints([1])), Ok(Value::from(99)));
    assert_eq!(from_hundred.internal_repr(), "100 - a");
}

#[rstest]
fn test_comparison_chain() {
    let within = a().gt(0).unwrap().and_(a().lt(b()).unwrap()).unwrap();

    assert_eq!(within.internal_repr(), "a > 0 and a < b");
    assert_eq!(within.evaluate_with(ints([3, 5])), Ok(Value::from(true)));
    assert_eq!(within.evaluate_with(ints([7, 5])), Ok(Value::from(false)));
}

#[rstest]
fn test_cursor_is_reusable() {
    let double = a() * 2;

    assert_eq!(double.evaluate_with(ints([1])), Ok(Value::from(2)));
    assert_eq!(double.evaluate_with(ints([21])), Ok(Value::from(42)));
}

#[rstest]
fn test_extension_keeps_receiver() {
    let base = a() + 1;
    let extended = &base * 3;

    assert_eq!(base.evaluate_with(ints([1])), Ok(Value::from(2)));
    assert_eq!(extended.evaluate_with(ints([1])), Ok(Value::from(6)));
    assert_eq!(extended.previous().map(ActionCursor::internal_repr), Some("a + 1"));
}

// =============================================================================
// Arity
// =============================================================================

#[rstest]
fn test_excess_arguments_are_reported() {
    let error = (a() + b()).call(ints([1, 2, 3, 4])).unwrap_err();

    assert_eq!(
        error,
        Error::Cursor(CursorError::ExtraArguments {
            arguments: vec!["3".to_string(), "4".to_string()]
        })
    );
    assert_eq!(format!("{error}"), "extra arguments: 3, 4");
}

#[rstest]
fn test_string_extra_argument_is_quoted() {
    let error = a().call([Value::from(1), Value::from("rest")]).unwrap_err();

    assert_eq!(format!("{error}"), "extra arguments: 'rest'");
}

#[rstest]
fn test_under_application_is_partial() {
    let invocation = (a() - b() - c()).call(ints([10])).unwrap();
    let partial = invocation.into_partial().unwrap();

    assert_eq!(partial.arguments(), ints([10]).as_slice());
    assert_eq!(value_of(partial.call(ints([1, 2]))), Value::from(7));
}

#[rstest]
fn test_constant_cursor_has_no_parameters() {
    let constant = act().pack(operands![1, 2]).unwrap();

    assert!(constant.parameters().is_empty());
    assert_eq!(
        value_of(constant.call([])),
        Value::tuple(ints([1, 2]))
    );
}

// =============================================================================
// Priorities
// =============================================================================

#[rstest]
fn test_duplicate_priority_is_rejected() {
    let other = action_cursor_with_priority("other", 3);
    let error = d().try_sub(other).unwrap_err();

    assert_eq!(
        format!("{error}"),
        "parameters with the same priority: d (3), other (3)"
    );
}

#[rstest]
fn test_clash_is_found_across_nested_operands() {
    let nested = c() + action_cursor_with_priority("third", 3);

    assert!(matches!(
        (a() + b()).try_mul(&nested).unwrap().try_add(d()),
        Err(CursorError::DuplicatePriority { .. })
    ));
    assert!((a() + b()).try_mul(nested).is_ok());
}

#[rstest]
fn test_same_named_cursor_collapses() {
    let cubed = a() * a() * a();

    assert_eq!(cubed.parameters().names(), vec!["a"]);
    assert_eq!(cubed.evaluate_with(ints([3])), Ok(Value::from(27)));
}

#[rstest]
fn test_custom_cursors_bind_in_creation_order() {
    let width = action_cursor_by("width");
    let height = action_cursor_by("height");
    let area = height * width;

    assert_eq!(area.parameters().names(), vec!["width", "height"]);
    assert_eq!(format!("{area}"), "<action(width, height): height * width>");
    assert_eq!(area.evaluate_with(ints([2, 5])), Ok(Value::from(10)));
}

// =============================================================================
// Attributes, items and assignment
// =============================================================================

#[rstest]
fn test_attribute_chain() {
    let origin = Value::object("Point", [("x", Value::from(0)), ("y", Value::from(0))]);
    let segment = Value::object("Segment", [("start", origin)]);

    let start_y = a().attr("start").attr("y");

    assert_eq!(start_y.internal_repr(), "a.start.y");
    assert_eq!(start_y.nature(), &nature::attrgetting());
    assert_eq!(start_y.evaluate_with([segment]), Ok(Value::from(0)));
}

#[rstest]
fn test_missing_attribute_passes_through() {
    let error = a().attr("z").evaluate_with(ints([1])).unwrap_err();

    assert!(matches!(
        error,
        Error::Evaluation(EvaluationError::MissingAttribute { .. })
    ));
}

#[rstest]
fn test_item_on_dict() {
    let lookup = a().item("name").unwrap();
    let record = Value::dict([("name", Value::from("actkit"))]);

    assert_eq!(lookup.internal_repr(), "a['name']");
    assert_eq!(lookup.evaluate_with([record]), Ok(Value::from("actkit")));
}

#[rstest]
fn test_list_packing_on_empty_cursor() {
    let listed = act().items(operands![a(), 10]).unwrap();

    assert_eq!(listed.nature(), &nature::packing());
    assert_eq!(
        listed.evaluate_with(ints([1])),
        Ok(Value::list(ints([1, 10])))
    );
}

#[rstest]
fn test_set_attribute_returns_value() {
    let point = Value::object("Point", [("x", Value::from(1))]);
    let moved = a().attr("x").set(a().attr("x") + 1).unwrap();

    assert_eq!(moved.internal_repr(), "(a.x := a.x + 1)");
    assert_eq!(moved.nature(), &nature::setting());
    assert_eq!(moved.evaluate_with([point.clone()]), Ok(Value::from(2)));
    assert_eq!(point.get_attribute("x"), Ok(Value::from(2)));
}

#[rstest]
fn test_set_item_with_cursor_key() {
    let store = a().item(b()).unwrap().set(c()).unwrap();
    let items = Value::list(ints([0, 0, 0]));

    assert_eq!(
        store.evaluate_with([items.clone(), Value::from(1), Value::from(9)]),
        Ok(Value::from(9))
    );
    assert_eq!(items, Value::list(ints([0, 9, 0])));
}

#[rstest]
#[case(a() + 1)]
#[case(a())]
#[case(act())]
#[case(a().apply([], []).unwrap())]
fn test_set_without_read_fails(#[case] cursor: ActionCursor) {
    assert_eq!(cursor.set(1).unwrap_err(), CursorError::NowhereToSet);
}

// =============================================================================
// Names and scopes
// =============================================================================

#[rstest]
fn test_free_identifier_call() {
    let maximum = Value::function("max", |arguments| {
        Ok(arguments
            .args()
            .iter()
            .filter_map(Value::as_int)
            .max()
            .map_or(Value::Nil, Value::from))
    });
    let scope = Scope::new().with("max", maximum);

    let call = act()
        .attr("max")
        .apply(operands![a(), b()], [])
        .unwrap();

    assert_eq!(format!("{call}"), "<action(a, b): max(a, b)>");
    assert_eq!(
        call.call_in(&scope, ints([3, 8])).unwrap().into_value(),
        Some(Value::from(8))
    );
    assert_eq!(
        call.call(ints([3, 8])).unwrap_err(),
        Error::Evaluation(EvaluationError::UnboundName {
            name: "max".to_string()
        })
    );
}

#[rstest]
fn test_placeholder_call_packs_arguments() {
    let packed = placeholder()
        .call(ints([1, 2]))
        .unwrap()
        .into_cursor()
        .unwrap();

    assert_eq!(packed.internal_repr(), "(1, 2)");
}

// =============================================================================
// Unpacking and keyword invocation
// =============================================================================

#[rstest]
fn test_unpacking_is_one_shot() {
    let mut unpacking = a().unpack();

    assert!(matches!(unpacking.try_next(), Ok(Operand::Spread(_))));
    assert_eq!(
        unpacking.try_next().unwrap_err(),
        CursorError::UnpackingExhausted
    );
}

#[rstest]
fn test_spread_and_keywords_in_call() {
    let format = Value::function("format", |arguments| {
        let positional: Vec<String> = arguments.args().iter().map(Value::to_string).collect();
        let separator = arguments
            .keyword("sep")
            .ok()
            .and_then(Value::as_str)
            .unwrap_or(" ")
            .to_string();
        Ok(Value::from(positional.join(&separator)))
    });

    let call = a()
        .apply(b().unpack(), [("sep".to_string(), Operand::from("-"))])
        .unwrap();

    assert_eq!(call.internal_repr(), "a(*b, sep='-')");
    assert_eq!(
        call.evaluate_with([format, Value::tuple(ints([1, 2, 3]))]),
        Ok(Value::from("1-2-3"))
    );
}

#[rstest]
fn test_keyword_invocation() {
    let ratio = a() / b();
    let pack = ArgumentPack::new([], [
        ("b".to_string(), Value::from(4)),
        ("a".to_string(), Value::from(2)),
    ]);

    assert_eq!(ratio.call_with(&pack), Ok(Value::from(0.5)));
}

#[rstest]
fn test_keyword_invocation_reports_missing() {
    let pack = ArgumentPack::new([], [("a".to_string(), Value::from(1))]);

    assert_eq!(
        (a() + b()).call_with(&pack),
        Err(Error::Cursor(CursorError::MissingArgument {
            name: "b".to_string()
        }))
    );
}
