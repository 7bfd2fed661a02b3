//! Native functions present on every engine a host builds.
//!
//! `CopyData(ptr, value)` and `CopyNumberToArray(ptr, n...)` let a script hand
//! results back through a `UserPtr` the host bound earlier. They are the only
//! places the host writes through such a pointer.
//!
//! # Safety contract
//!
//! Whoever binds the pointer guarantees that it is aligned, live for as long as
//! the script may use it, and points at an initialized value of the type the
//! script writes: `f64` for numbers, `bool` for booleans, `String` for strings,
//! or a `[f64]` long enough for every number passed to `CopyNumberToArray`.
//! Null pointers are refused; nothing else can be checked.

use std::any::TypeId;

use mad_core::{Diagnostics, UserPtr};
use rhai::{Dynamic, Engine, EvalAltResult, NativeCallContext};

use crate::helpers::rhai_bridge::{dynamic_as_number, dynamic_as_pointer};

pub(crate) const COPY_DATA: &str = "CopyData";
pub(crate) const COPY_NUMBER_TO_ARRAY: &str = "CopyNumberToArray";

type BuiltinResult = Result<Dynamic, Box<EvalAltResult>>;

/// `CopyData` takes exactly two arguments; `CopyNumberToArray` is installed up
/// to `max_arity`. Lower arities exist only to report the illegal call.
#[allow(deprecated)]
pub(crate) fn install_builtins(
    engine: &mut Engine,
    diagnostics: &Diagnostics,
    max_arity: usize,
) {
    for arity in 0..=2 {
        let diagnostics = diagnostics.clone();
        engine.register_raw_fn(
            COPY_DATA,
            vec![TypeId::of::<Dynamic>(); arity],
            move |_context: NativeCallContext<'_>, args: &mut [&mut Dynamic]| -> BuiltinResult {
                copy_data(&diagnostics, args);
                Ok(Dynamic::UNIT)
            },
        );
    }
    for arity in 0..=max_arity.max(2) {
        let diagnostics = diagnostics.clone();
        engine.register_raw_fn(
            COPY_NUMBER_TO_ARRAY,
            vec![TypeId::of::<Dynamic>(); arity],
            move |_context: NativeCallContext<'_>, args: &mut [&mut Dynamic]| -> BuiltinResult {
                copy_number_to_array(&diagnostics, args);
                Ok(Dynamic::UNIT)
            },
        );
    }
}

fn target_pointer(diagnostics: &Diagnostics, value: &Dynamic) -> Option<UserPtr> {
    match dynamic_as_pointer(&value.clone().flatten()) {
        Some(ptr) if !ptr.is_null() => Some(ptr),
        Some(_) => {
            diagnostics.error("Illegal call for copy function. First arg is a null UserPtr.");
            None
        }
        None => {
            diagnostics.error(
                "Illegal call for copy function. First arg is not a valid UserPtr.",
            );
            None
        }
    }
}

fn copy_data(diagnostics: &Diagnostics, args: &mut [&mut Dynamic]) {
    if args.len() < 2 {
        diagnostics.error(
            "Illegal call for copy function. CopyData function need 2 arg to call.",
        );
        return;
    }
    let Some(ptr) = target_pointer(diagnostics, &*args[0]) else {
        return;
    };

    let value = args[1].clone().flatten();
    if let Some(number) = dynamic_as_number(&value) {
        // SAFETY: the binder guarantees `ptr` addresses a live, aligned f64.
        unsafe { ptr.cast::<f64>().write(number) };
    } else if let Ok(flag) = value.as_bool() {
        // SAFETY: the binder guarantees `ptr` addresses a live bool.
        unsafe { ptr.cast::<bool>().write(flag) };
    } else if value.is_string() {
        let Ok(text) = value.into_string() else {
            return;
        };
        // SAFETY: the binder guarantees `ptr` addresses a live, initialized
        // String; assignment drops the previous contents.
        unsafe { *ptr.cast::<String>() = text };
    } else {
        diagnostics.error(
            "Unsupported value type for copy function. Please copy boolean, number or string.",
        );
    }
}

/// Non-numeric arguments are written as `0.0`.
fn copy_number_to_array(diagnostics: &Diagnostics, args: &mut [&mut Dynamic]) {
    if args.len() < 2 {
        diagnostics.error(concat!(
            "Illegal call for copy function. ",
            "CopyNumberToArray function need 2 arg at least to call."
        ));
        return;
    }
    let Some(ptr) = target_pointer(diagnostics, &*args[0]) else {
        return;
    };

    let target = ptr.cast::<f64>();
    for (offset, value) in args[1..].iter().enumerate() {
        let number = dynamic_as_number(&(**value).clone().flatten()).unwrap_or(0.0);
        // SAFETY: the binder guarantees room for every number passed.
        unsafe { target.add(offset).write(number) };
    }
}
