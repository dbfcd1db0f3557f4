//! Reflective access to plain JavaScript objects.
//!
//! The host library has no typed bindings, so every call goes through
//! `Reflect` and is turned into `Result<_, String>` here.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub(crate) fn get(target: &JsValue, key: &str) -> Result<JsValue, String> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| describe(key, &e))
}

pub(crate) fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| describe(key, &e))
}

/// Call `target[name](...args)` with `this` bound to `target`.
pub(crate) fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let method = get(target, name)?
        .dyn_into::<Function>()
        .map_err(|_| format!("`{name}` is not a function"))?;
    let args: Array = args.iter().collect();
    method.apply(target, &args).map_err(|e| describe(name, &e))
}

pub(crate) fn call_f64(target: &JsValue, name: &str, args: &[JsValue]) -> Result<f64, String> {
    call(target, name, args)?
        .as_f64()
        .ok_or_else(|| format!("`{name}` did not return a number"))
}

pub(crate) fn call_bool(target: &JsValue, name: &str, args: &[JsValue]) -> Result<bool, String> {
    call(target, name, args)?
        .as_bool()
        .ok_or_else(|| format!("`{name}` did not return a boolean"))
}

/// Numeric entries of an array-like value. Non-numbers are skipped.
pub(crate) fn numbers(value: &JsValue) -> Vec<f64> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value).iter().filter_map(|v| v.as_f64()).collect()
}

pub(crate) fn describe(what: &str, err: &JsValue) -> String {
    let detail = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    format!("{what}: {detail}")
}
