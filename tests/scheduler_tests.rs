mod common;

use common::{engine_with_capture, run_capturing};
use minijs::Value;
use pretty_assertions::assert_eq;

#[test]
fn deferred_tasks_run_after_synchronous_code() {
    let (result, output) = run_capturing(
        r#"
        function late() { print "late"; }
        defer(late, 0);
        print "early";
        "#,
    );
    assert!(result.is_ok());
    assert_eq!(output, "early\nlate\n");
}

#[test]
fn run_returns_the_last_synchronous_value() {
    let (mut engine, _) = engine_with_capture();
    let value = engine
        .run("function f() { 99; } defer(f, 0); 7;")
        .expect("program runs");
    // Deferred results are discarded; the synchronous tail wins.
    assert_eq!(value, Value::Number(7.0));
}

#[test]
fn earlier_deadlines_run_first() {
    let (_, output) = run_capturing(
        r#"
        function a() { print "a"; }
        function b() { print "b"; }
        defer(a, 50);
        defer(b, 0);
        "#,
    );
    assert_eq!(output, "b\na\n");
}

#[test]
fn same_deadline_preserves_queue_order() {
    let (_, output) = run_capturing(
        r#"
        function first() { print 1; }
        function second() { print 2; }
        function third() { print 3; }
        defer(first, 10);
        defer(second, 10);
        defer(third, 10);
        "#,
    );
    assert_eq!(output, "1\n2\n3\n");
}

#[test]
fn tasks_may_enqueue_further_tasks() {
    let (_, output) = run_capturing(
        r#"
        function inner() { print "inner"; }
        function outer() { print "outer"; defer(inner, 5); }
        defer(outer, 0);
        "#,
    );
    assert_eq!(output, "outer\ninner\n");
}

#[test]
fn task_closures_see_mutations_made_before_they_run() {
    let (_, output) = run_capturing(
        r#"
        let x = 1;
        function show() { print x; }
        defer(show, 10);
        x = 2;
        "#,
    );
    assert_eq!(output, "2\n");
}

#[test]
fn failed_task_abandons_the_rest_of_the_queue() {
    let (result, output) = run_capturing(
        r#"
        function bad() { missing; }
        function good() { print "good"; }
        defer(bad, 0);
        defer(good, 10);
        "#,
    );
    assert!(result.is_err());
    assert_eq!(output, "");
}

#[test]
fn queue_is_cleared_after_a_failed_run() {
    let (mut engine, capture) = engine_with_capture();
    let failed = engine.run(
        r#"
        function bad() { missing; }
        function good() { print "good"; }
        defer(bad, 0);
        defer(good, 10);
        "#,
    );
    assert!(failed.is_err());

    // A later run starts with an empty queue; `good` never fires.
    engine.run("print \"next\";").expect("clean run");
    assert_eq!(capture.contents(), "next\n");
}

#[test]
fn defer_without_a_function_is_a_no_op() {
    let (result, output) = run_capturing(
        r#"
        defer(5, 0);
        defer("soon", 10);
        print "done";
        "#,
    );
    assert!(result.is_ok());
    assert_eq!(output, "done\n");
}

#[test]
fn defer_with_missing_arguments_is_a_no_op() {
    let (result, output) = run_capturing(
        r#"
        function f() { print "ran"; }
        defer(f);
        defer();
        print "done";
        "#,
    );
    assert!(result.is_ok());
    assert_eq!(output, "done\n");
}

#[test]
fn negative_delay_runs_immediately() {
    let (_, output) = run_capturing(
        r#"
        function now() { print "now"; }
        defer(now, 0 - 100);
        print "sync";
        "#,
    );
    assert_eq!(output, "sync\nnow\n");
}
