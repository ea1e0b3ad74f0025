use pretty_assertions::assert_eq;

use super::{eval_ok, eval_source};
use crate::{EvalErrorKind, Value};

fn int_list(values: &[i64]) -> Value {
    Value::list(values.iter().map(|&v| Value::Int(v)).collect())
}

#[test]
fn assignment_then_use() {
    assert_eq!(eval_ok("x = 2\nx + 3"), Value::Int(5));
}

#[test]
fn assignment_expression_yields_the_bound_value() {
    assert_eq!(eval_ok("x = 7"), Value::Int(7));
}

#[test]
fn function_definition_and_call() {
    assert_eq!(eval_ok("f(a, b) = a * b\nf(3, 4)"), Value::Int(12));
}

#[test]
fn defining_a_function_evaluates_to_nil() {
    assert_eq!(eval_ok("f(a) = a"), Value::Nil);
}

#[test]
fn list_plus_scalar_broadcasts() {
    assert_eq!(eval_ok("[1, 2, 3] + 10"), int_list(&[11, 12, 13]));
}

#[test]
fn for_over_step_range_yields_last_body_value() {
    assert_eq!(eval_ok("for i in 0..2..1 { i }"), Value::Int(2));
}

#[test]
fn guarded_case_with_unbound_name_is_nil() {
    assert_eq!(eval_ok("y = 5 if y > 3"), Value::Nil);
}

#[test]
fn unbound_read_is_nil() {
    assert_eq!(eval_ok("q"), Value::Nil);
}

#[test]
fn closures_are_lexically_scoped() {
    // getx resolves x in its defining scope, not through f's call frame
    // where x is the parameter.
    let source = "x = 1\ngetx() = x\nf(x) = getx()\nf(99)";
    assert_eq!(eval_ok(source), Value::Int(1));
}

#[test]
fn closures_see_later_rebinding_of_the_defining_scope() {
    let source = "x = 1\ngetx() = x\nx = 5\ngetx()";
    assert_eq!(eval_ok(source), Value::Int(5));
}

#[test]
fn recursion_through_the_defining_scope() {
    let source = "fact(n) = { 1 if n <= 1; n * fact(n - 1) if n > 1 }\nfact(5)";
    assert_eq!(eval_ok(source), Value::Int(120));
}

#[test]
fn lists_alias_through_assignment() {
    assert_eq!(eval_ok("a = [1, 2]\nb = a\nb[0] = 9\na[0]"), Value::Int(9));
}

#[test]
fn indexed_read_and_write() {
    assert_eq!(eval_ok("xs = [1, 2, 3]\nxs[1] = 20\nxs[1]"), Value::Int(20));
}

#[test]
fn index_out_of_range_is_an_error() {
    let (result, _) = eval_source("xs = [1]\nxs[3]");
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::IndexOutOfRange { index: 3, len: 1 }
    );
}

#[test]
fn indexed_assignment_to_unbound_name_is_undefined() {
    let (result, _) = eval_source("zs[0] = 1");
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::UndefinedName { .. }
    ));
}

#[test]
fn loop_variable_persists_after_the_loop() {
    assert_eq!(eval_ok("for i in 1..3 i\ni"), Value::Int(3));
}

#[test]
fn for_over_list_and_scalar() {
    assert_eq!(eval_ok("total = 0\nfor v in [1, 2, 3] total = total + v\ntotal"),
        Value::Int(6));
    assert_eq!(eval_ok("for v in 42 v"), Value::Int(42));
}

#[test]
fn case_chain_yields_first_non_nil() {
    assert_eq!(eval_ok("{ 1 if 0; 2 if 1; 3 if 1 }"), Value::Int(2));
    assert_eq!(eval_ok("{ 1 if 0; 2 if 0 }"), Value::Nil);
}

#[test]
fn float_range_without_step_defaults_to_a_hundred_elements() {
    assert_eq!(eval_ok("#(0.0..1.0)"), Value::Int(100));
}

#[test]
fn count_range_through_source_syntax() {
    assert_eq!(
        eval_ok("r = 0..10..+5\nfor v in r v"),
        Value::Float(10.0)
    );
}

#[test]
fn unbounded_range_length_is_an_error() {
    let (result, _) = eval_source("#(0..Inf)");
    assert_eq!(result.unwrap_err().kind, EvalErrorKind::UnboundedLength);
}

#[test]
fn length_operator() {
    assert_eq!(eval_ok("#[1, 2, 3]"), Value::Int(3));
    assert_eq!(eval_ok("#\"abc\""), Value::Int(3));
    assert_eq!(eval_ok("#(1..4)"), Value::Int(4));
}

#[test]
fn print_scalars_space_separated() {
    let (result, output) = eval_source("print \"x =\" 5");
    result.unwrap();
    assert_eq!(output, "x = 5\n");
}

#[test]
fn print_streams_ranges_bracketed() {
    let (result, output) = eval_source("print 0..2");
    result.unwrap();
    assert_eq!(output, "[0, 1, 2]\n");
}

#[test]
fn print_of_an_unbounded_range_is_an_error() {
    let (result, output) = eval_source("print 0..Inf");
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::UnboundedEnumeration
    );
    assert_eq!(output, "");
}

#[test]
fn print_lists_use_display_form() {
    let (result, output) = eval_source("print [1, 2] 3");
    result.unwrap();
    assert_eq!(output, "[1, 2] 3\n");
}

#[test]
fn builtins_are_available_and_broadcast() {
    assert_eq!(eval_ok("sin(0)"), Value::Float(0.0));
    assert_eq!(
        eval_ok("sqrt([4, 9])"),
        Value::list(vec![Value::Float(2.0), Value::Float(3.0)])
    );
}

#[test]
fn builtins_can_be_shadowed_locally() {
    // bind never climbs, so the read-only root is unaffected.
    assert_eq!(eval_ok("sin = 5\nsin"), Value::Int(5));
}

#[test]
fn calling_an_unbound_name_is_undefined() {
    let (result, _) = eval_source("nope(1)");
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::UndefinedName { .. }
    ));
}

#[test]
fn calling_a_non_callable_is_an_error() {
    let (result, _) = eval_source("x = 3\nx(1)");
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::NotCallable { .. }
    ));
}

#[test]
fn wrong_argument_count_is_an_arity_mismatch() {
    let (result, _) = eval_source("f(a) = a\nf(1, 2)");
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::ArityMismatch {
            name: "f".to_owned(),
            expected: 1,
            got: 2,
        }
    );
}

#[test]
fn non_identifier_parameter_is_rejected() {
    let (result, _) = eval_source("f(1) = 2");
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::InvalidParameter { .. }
    ));
}

#[test]
fn logical_operators_short_circuit() {
    // The right side would be an undefined call if evaluated.
    assert_eq!(eval_ok("0 & boom(1)"), Value::Int(0));
    assert_eq!(eval_ok("1 | boom(1)"), Value::Int(1));
}

#[test]
fn logical_operators_broadcast_over_lists() {
    assert_eq!(eval_ok("[1, 0] & 1"), int_list(&[1, 0]));
    assert_eq!(eval_ok("[1, 0] | [0, 0]"), int_list(&[1, 0]));
    assert_eq!(eval_ok("1 & [1, 0]"), int_list(&[1, 0]));
}

#[test]
fn empty_list_operands_are_falsy_not_elementwise() {
    assert_eq!(eval_ok("1 & []"), Value::Int(0));
    assert_eq!(eval_ok("[] & 1"), Value::Int(0));
    assert_eq!(eval_ok("[] | 1"), Value::Int(1));
    assert_eq!(eval_ok("[] | 0"), Value::Int(0));
}

#[test]
fn inf_in_arithmetic_is_a_type_error() {
    let (result, _) = eval_source("1 + Inf");
    assert!(matches!(
        result.unwrap_err().kind,
        EvalErrorKind::BinaryTypeMismatch { .. }
    ));
}

#[test]
fn inf_is_falsy_in_guards() {
    assert_eq!(eval_ok("5 if Inf"), Value::Nil);
    assert_eq!(eval_ok("5 if !Inf"), Value::Int(5));
}

#[test]
fn unknown_command_is_a_typed_error() {
    let (result, _) = eval_source("dump x");
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::UnknownCommand {
            name: "dump".to_owned()
        }
    );
}

#[test]
fn division_by_zero_is_an_error() {
    let (result, _) = eval_source("1 / 0");
    assert_eq!(result.unwrap_err().kind, EvalErrorKind::DivisionByZero);
}

#[test]
fn empty_program_is_nil() {
    assert_eq!(eval_ok(""), Value::Nil);
    assert_eq!(eval_ok("\n\n"), Value::Nil);
}

#[test]
fn comments_are_ignored() {
    assert_eq!(eval_ok("# a comment\nx = 1 # trailing\nx"), Value::Int(1));
}

#[test]
fn keyword_logic_spellings_evaluate() {
    assert_eq!(eval_ok("1 and 2"), Value::Int(1));
    assert_eq!(eval_ok("0 or 0"), Value::Int(0));
    assert_eq!(eval_ok("not 0"), Value::Int(1));
}
