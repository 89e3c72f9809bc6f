//! FFI interface for C/C++ hosts
//!
//! Inputs and outputs cross the boundary as JSON strings.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Serialize;

use crate::config::Config;
use crate::loader::load_rooms;
use crate::rooms::PageParser;

/// Result struct returned to the host
/// Both pointers are owned by Rust and must be freed via smarthome_free_result
#[repr(C)]
pub struct SmarthomeResultFFI {
    /// JSON-serialized result (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if the call failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Parse a status page into rooms.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `config_json` - JSON-serialized Config (null-terminated), or null for defaults
///
/// # Returns
/// SmarthomeResultFFI with json_ptr set to the room list, or error_ptr on failure
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `config_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `smarthome_free_result`
#[no_mangle]
pub unsafe extern "C" fn smarthome_parse_page(
    html_ptr: *const c_char,
    html_len: usize,
    config_json: *const c_char,
) -> SmarthomeResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    let config = match read_config(config_json) {
        Ok(config) => config,
        Err(msg) => return make_error_result(&msg),
    };

    match PageParser::new(config.extraction) {
        Ok(parser) => make_json_result(&parser.parse_html(html)),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Load the page named by the config's loader section and parse it.
///
/// Loading failures are not FFI errors: they come back as diagnostics next
/// to an empty room list.
///
/// # Safety
/// - `config_json` must be a valid null-terminated C string
/// - Caller must free the result via `smarthome_free_result`
#[no_mangle]
pub unsafe extern "C" fn smarthome_fetch_page(config_json: *const c_char) -> SmarthomeResultFFI {
    if config_json.is_null() {
        return make_error_result("Config JSON is null");
    }

    let config = match read_config(config_json) {
        Ok(config) => config,
        Err(msg) => return make_error_result(&msg),
    };

    match PageParser::new(config.extraction) {
        Ok(parser) => make_json_result(&load_rooms(&parser, &config.loader)),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Free a SmarthomeResultFFI returned by this library
///
/// # Safety
/// - `result` must have been returned by `smarthome_parse_page` or `smarthome_fetch_page`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn smarthome_free_result(result: SmarthomeResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn read_config(config_json: *const c_char) -> Result<Config, String> {
    if config_json.is_null() {
        return Ok(Config::default());
    }
    let json = CStr::from_ptr(config_json)
        .to_str()
        .map_err(|_| "Invalid UTF-8 in config JSON".to_string())?;
    Config::from_json(json).map_err(|e| e.to_string())
}

fn make_json_result<T: Serialize>(value: &T) -> SmarthomeResultFFI {
    match serde_json::to_string(value) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => SmarthomeResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

fn make_error_result(msg: &str) -> SmarthomeResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    SmarthomeResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
