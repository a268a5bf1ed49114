// FFI functions are inherently unsafe: callers must ensure pointer validity.
#![allow(clippy::missing_safety_doc)]
#![allow(non_snake_case)]

// hunspell-ffi: the classic Hunspell C entry points over `Hunspell`.
//
// A binding written against the native library can load this one instead.
//
// Memory management rules:
// - Opaque handle: created by `Hunspell_create`, freed by `Hunspell_destroy`.
// - Lists filled by `Hunspell_suggest`, `Hunspell_analyze` and `Hunspell_stem`
//   are freed with `Hunspell_free_list`, passing the returned count.
// - The string from `Hunspell_get_dic_encoding` is owned by the handle.
// - Words cross the boundary as null-terminated byte strings in the
//   dictionary encoding (see `Hunspell_get_dic_encoding`).

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

use hunspell_core::enums::OverlayStatus;
use hunspell_engine::Hunspell;
use log::warn;

/// Opaque handle handed to C callers.
pub struct Hunhandle {
    engine: Hunspell,
    encoding: CString,
}

impl Hunhandle {
    fn new(engine: Hunspell) -> Self {
        let encoding = CString::new(engine.dic_encoding()).unwrap_or_default();
        Hunhandle { engine, encoding }
    }

    /// Decode a caller word from the dictionary encoding.
    fn word(&self, word: *const c_char) -> Option<String> {
        if word.is_null() {
            return None;
        }
        let bytes = unsafe { CStr::from_ptr(word) }.to_bytes();
        Some(self.engine.decode(bytes))
    }

    /// Encode an engine string for the caller.
    fn to_c(&self, s: &str) -> *mut c_char {
        CString::new(self.engine.encode(s))
            .unwrap_or_default()
            .into_raw()
    }
}

// ── Handle lifecycle ─────────────────────────────────────────────

/// Load a dictionary from an affix file and a dictionary file.
///
/// Returns NULL when either path is NULL or the load fails.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_create(
    affpath: *const c_char,
    dpath: *const c_char,
) -> *mut Hunhandle {
    let (Some(affix), Some(dictionary)) = (unsafe { cstr_to_str(affpath) }, unsafe {
        cstr_to_str(dpath)
    }) else {
        return ptr::null_mut();
    };

    match Hunspell::new(affix, dictionary) {
        Ok(engine) => Box::into_raw(Box::new(Hunhandle::new(engine))),
        Err(e) => {
            warn!("Hunspell_create failed: {e}");
            ptr::null_mut()
        }
    }
}

/// Free a handle created by `Hunspell_create`. NULL is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_destroy(handle: *mut Hunhandle) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Name of the dictionary encoding, e.g. `UTF-8` or `ISO8859-1`.
///
/// The pointer stays valid until the handle is destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_get_dic_encoding(handle: *mut Hunhandle) -> *const c_char {
    let Some(h) = (unsafe { handle.as_ref() }) else {
        return ptr::null();
    };
    h.encoding.as_ptr()
}

// ── Queries ──────────────────────────────────────────────────────

/// Nonzero if the word is correct, 0 otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_spell(handle: *mut Hunhandle, word: *const c_char) -> c_int {
    let Some(h) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    match h.word(word) {
        Some(w) => c_int::from(h.engine.spell(&w)),
        None => 0,
    }
}

/// Store suggestions for a misspelled word in `*slst` and return their count.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_suggest(
    handle: *mut Hunhandle,
    slst: *mut *mut *mut c_char,
    word: *const c_char,
) -> c_int {
    unsafe { fill_list(handle, slst, word, Hunspell::suggest) }
}

/// Store morphological analyses of a word in `*slst` and return their count.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_analyze(
    handle: *mut Hunhandle,
    slst: *mut *mut *mut c_char,
    word: *const c_char,
) -> c_int {
    unsafe { fill_list(handle, slst, word, Hunspell::analyze) }
}

/// Store the stems of a word in `*slst` and return their count.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_stem(
    handle: *mut Hunhandle,
    slst: *mut *mut *mut c_char,
    word: *const c_char,
) -> c_int {
    unsafe { fill_list(handle, slst, word, Hunspell::stem) }
}

/// Free a list filled by one of the list queries and reset `*slst` to NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_free_list(
    _handle: *mut Hunhandle,
    slst: *mut *mut *mut c_char,
    n: c_int,
) {
    if slst.is_null() {
        return;
    }
    let list = unsafe { *slst };
    if list.is_null() {
        return;
    }
    let len = usize::try_from(n).unwrap_or(0);
    // Lists are allocated with a trailing NULL slot.
    let items = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(list, len + 1)) };
    for &item in items.iter() {
        free_c_str(item);
    }
    unsafe { *slst = ptr::null_mut() };
}

// ── Runtime dictionary ───────────────────────────────────────────

/// Accept a word for the lifetime of the handle. 0 on success.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_add(handle: *mut Hunhandle, word: *const c_char) -> c_int {
    let Some(h) = (unsafe { handle.as_ref() }) else {
        return OverlayStatus::InvalidWord.code();
    };
    match h.word(word) {
        Some(w) => h.engine.add(&w).code(),
        None => OverlayStatus::InvalidWord.code(),
    }
}

/// Accept a word together with every affixed form the exemplar allows.
/// 0 on success.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_add_with_affix(
    handle: *mut Hunhandle,
    word: *const c_char,
    example: *const c_char,
) -> c_int {
    let Some(h) = (unsafe { handle.as_ref() }) else {
        return OverlayStatus::InvalidWord.code();
    };
    let Some(w) = h.word(word) else {
        return OverlayStatus::InvalidWord.code();
    };
    let Some(exemplar) = h.word(example) else {
        return OverlayStatus::ExemplarNotFound.code();
    };
    h.engine.add_with_affix(&w, &exemplar).code()
}

/// Reject a word for the lifetime of the handle. 0 on success.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Hunspell_remove(handle: *mut Hunhandle, word: *const c_char) -> c_int {
    let Some(h) = (unsafe { handle.as_ref() }) else {
        return OverlayStatus::NotFound.code();
    };
    match h.word(word) {
        Some(w) => h.engine.remove(&w).code(),
        None => OverlayStatus::InvalidWord.code(),
    }
}

// ── Internal helpers ─────────────────────────────────────────────

unsafe fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn free_c_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

unsafe fn fill_list(
    handle: *mut Hunhandle,
    slst: *mut *mut *mut c_char,
    word: *const c_char,
    query: fn(&Hunspell, &str) -> Vec<String>,
) -> c_int {
    if slst.is_null() {
        return 0;
    }
    unsafe { *slst = ptr::null_mut() };
    let Some(h) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    let Some(w) = h.word(word) else {
        return 0;
    };

    let results = query(&h.engine, &w);
    if results.is_empty() {
        return 0;
    }
    let Ok(count) = c_int::try_from(results.len()) else {
        return 0;
    };
    let mut ptrs: Vec<*mut c_char> = results.iter().map(|s| h.to_c(s)).collect();
    ptrs.push(ptr::null_mut());
    let list: Box<[*mut c_char]> = ptrs.into_boxed_slice();
    unsafe { *slst = Box::into_raw(list).cast::<*mut c_char>() };
    count
}
