use super::host_test_support::*;
use super::*;
use mad_core::{Channel, ResCode, ScriptValue, UserPtr, ValueKind};

#[test]
fn typed_setters_round_trip_through_getters() {
    let (mut script, recorder) = ready_script("let unused = 0;");
    script.set_integer("count", 7);
    script.set_number("ratio", 0.25);
    script.set_string("label", "hello");
    script.set_boolean("flag", true);

    assert_eq!(script.get_integer("count"), 7);
    assert_eq!(script.get_number("ratio"), 0.25);
    assert_eq!(script.get_string("label"), "hello");
    assert!(script.get_boolean("flag"));
    assert_eq!(recorder.count(Channel::Error), 0);
}

#[test]
fn pointer_globals_keep_their_address() {
    let mut payload = 99_u32;
    let ptr = UserPtr::from_mut(&mut payload);
    let (mut script, _recorder) = ready_script("let unused = 0;");

    script.set_pointer("handle", ptr);
    assert_eq!(script.value_type("handle"), ValueKind::Pointer);
    assert_eq!(script.get_pointer("handle"), ptr);
    assert_eq!(script.get_pointer("handle").addr(), ptr.addr());
}

#[test]
fn script_sees_pointer_as_opaque_value() {
    let (mut script, recorder) = create_recorded("let empty = handle.is_null();");
    script.set_pointer("handle", UserPtr::null());
    assert_eq!(script.run_init(), ResCode::Ok);
    assert!(script.get_boolean("empty"));
    assert_eq!(recorder.count(Channel::Error), 0);
}

#[test]
fn setters_seed_globals_before_run_init() {
    let (mut script, _recorder) = create_recorded("let doubled = seed * 2;");
    script.set_integer("seed", 21);
    assert_eq!(script.run_init(), ResCode::Ok);
    assert_eq!(script.get_integer("doubled"), 42);
    assert_eq!(script.get_integer("seed"), 21);
}

#[test]
fn getters_on_loaded_script_log_and_return_zero_values() {
    let (mut script, recorder) = create_recorded("let x = 1;");
    script.set_integer("x", 5);

    assert_eq!(script.get_integer("x"), 0);
    assert_eq!(script.get_string("x"), "");
    assert!(recorder.contains(Channel::Error, "without init"));
}

#[test]
fn getters_on_deleted_script_log_and_return_zero_values() {
    let (mut script, recorder) = ready_script("let x = 1; let name = \"a\";");
    script.delete();

    assert_eq!(script.get_integer("x"), 0);
    assert_eq!(script.get_number("x"), 0.0);
    assert_eq!(script.get_string("name"), "");
    assert!(!script.get_boolean("x"));
    assert!(script.get_pointer("x").is_null());
    assert_eq!(script.value_type("x"), ValueKind::Nil);
    assert_eq!(recorder.count(Channel::Error), 6);
}

#[test]
fn setters_on_deleted_script_do_nothing() {
    let (mut script, recorder) = ready_script("let x = 1;");
    script.delete();
    script.set_integer("x", 3);
    assert!(recorder.contains(Channel::Error, "deleted script"));

    assert!(script.reload("let y = 0;").is_ok());
    assert_eq!(script.run_init(), ResCode::Ok);
    assert_eq!(script.value_type("x"), ValueKind::Nil);
}

#[test]
fn missing_global_logs_and_returns_zero() {
    let (script, recorder) = ready_script("let x = 1;");
    assert_eq!(script.get_integer("nope"), 0);
    assert!(recorder.contains(Channel::Error, "Can't find global value named: 'nope'."));
}

#[test]
fn type_mismatch_logs_and_returns_zero() {
    let (script, recorder) = ready_script("let flag = true;");
    assert_eq!(script.get_integer("flag"), 0);
    assert!(recorder.contains(Channel::Error, "Type mismatch"));
}

#[test]
fn number_getter_widens_integers_and_string_getter_renders_numbers() {
    let (script, recorder) = ready_script("let whole = 3; let part = 1.5;");
    assert_eq!(script.get_number("whole"), 3.0);
    assert_eq!(script.get_string("whole"), "3");
    assert_eq!(script.get_string("part"), "1.5");
    assert_eq!(recorder.count(Channel::Error), 0);
}

#[test]
fn integer_getter_rejects_floats() {
    let (script, recorder) = ready_script("let part = 1.5;");
    assert_eq!(script.get_integer("part"), 0);
    assert!(recorder.contains(Channel::Error, "is not of integer type"));
}

#[test]
fn value_type_reports_each_kind() {
    let (script, _recorder) = ready_script(
        r#"
        let i = 1;
        let f = 2.5;
        let s = "text";
        let b = false;
        let m = #{ a: 1 };
        let u = ();
        fn helper() { 0 }
        let p = Fn("helper");
        "#,
    );
    assert_eq!(script.value_type("i"), ValueKind::Integer);
    assert_eq!(script.value_type("f"), ValueKind::Number);
    assert_eq!(script.value_type("s"), ValueKind::String);
    assert_eq!(script.value_type("b"), ValueKind::Boolean);
    assert_eq!(script.value_type("m"), ValueKind::Unknown);
    assert_eq!(script.value_type("p"), ValueKind::Unknown);
    assert_eq!(script.value_type("u"), ValueKind::Nil);
    assert_eq!(script.value_type("absent"), ValueKind::Nil);
}

#[test]
fn get_value_boxes_current_kind() {
    let (script, recorder) = ready_script("let i = 4; let s = \"x\"; let m = #{};");
    assert_eq!(script.get_value("i"), ScriptValue::Integer(4));
    assert_eq!(script.get_value("s"), ScriptValue::String("x".to_string()));
    assert_eq!(script.get_value("absent"), ScriptValue::Nil);

    assert_eq!(script.get_value("m"), ScriptValue::Unknown);
    assert!(recorder.contains(Channel::Warning, "unsupported type"));
}

#[test]
fn set_value_binds_nil_and_refuses_unknown() {
    let (mut script, recorder) = ready_script("let x = 1;");
    script.set_value("x", &ScriptValue::Nil);
    assert_eq!(script.value_type("x"), ValueKind::Nil);

    script.set_value("y", &ScriptValue::Unknown);
    assert_eq!(script.value_type("y"), ValueKind::Nil);
    assert!(recorder.contains(Channel::Error, "unsupported type"));

    script.set_value("z", &ScriptValue::from("text"));
    assert_eq!(script.get_string("z"), "text");
}

#[test]
fn setter_replaces_kind_of_existing_global() {
    let (mut script, _recorder) = ready_script("let x = 1;");
    script.set_string("x", "now text");
    assert_eq!(script.value_type("x"), ValueKind::String);
    assert_eq!(script.get_string("x"), "now text");
}

#[test]
fn constant_globals_are_not_overwritten() {
    let (mut script, recorder) = ready_script("const LIMIT = 10;");
    script.set_integer("LIMIT", 99);
    assert_eq!(script.get_integer("LIMIT"), 10);
    assert!(recorder.contains(Channel::Error, "constant"));
}
