//! Flat C ABI. Every entry point validates its pointers and returns a
//! stable status code from `error::ffi_codes`; nothing panics across the
//! boundary, and output buffers are only ever written on success.
//!
//! `Hk` handles are opaque `*mut` pointers backed by `Rc`: `Hk_New*`
//! transfers one strong reference to the caller, `Hk_IncRef`/`Hk_DecRef`
//! adjust it explicitly, and `Hk_DecRef` that drops the last reference
//! runs the handle's destructor. `Mi` and `Ht` handles are owned outright
//! (`Box`-backed) and freed once via `Mi_Free`/`Ht_Free` instead. A
//! `Summary` accumulator (`Ht_Summarize_Update`/`Ht_Summarize_Finish`) is
//! likewise `Box`-backed but consumed by both calls: a handle passed in is
//! never valid again afterward, whether or not the call also returns one.
//!
//! Functions are grouped by owning type (`Hk_*`/`Mi_*`/`Ht_*`), plus the
//! free-standing marker sentinel constants (`Mr_*`).

use crate::error::{ffi_codes, result_to_code, HrError};
use crate::hk::Hk;
use crate::ht::{Ht, Summary};
use crate::mi::{Marker, Mi};
use std::os::raw::c_char;
use std::rc::Rc;

fn check_nonnull<T>(ptr: *const T, what: &'static str) -> Result<(), HrError> {
    if ptr.is_null() {
        Err(HrError::NullHandle(what))
    } else {
        Ok(())
    }
}

fn check_outbuf(ptr: *mut u8, len: usize, what: &'static str) -> Result<(), HrError> {
    if ptr.is_null() || len == 0 {
        Err(HrError::InvalidArgument(what))
    } else {
        Ok(())
    }
}

/// Sentinel `i64` values standing in for the two marker infinities, since
/// the C ABI has no room for a three-variant `Marker` in a plain integer.
/// Mirrors `Mr_Plus_Infinity`/`Mr_Minus_Infinity`.
pub const MR_PLUS_INFINITY: i64 = i64::MAX;
pub const MR_MINUS_INFINITY: i64 = i64::MIN;

fn marker_from_ffi(v: i64) -> Marker {
    match v {
        MR_PLUS_INFINITY => Marker::PosInf,
        MR_MINUS_INFINITY => Marker::NegInf,
        v => Marker::of(v),
    }
}

fn marker_to_ffi(m: Marker) -> i64 {
    match m {
        Marker::PosInf => MR_PLUS_INFINITY,
        Marker::NegInf => MR_MINUS_INFINITY,
        Marker::Finite(v) => v,
    }
}

// ---------------------------------------------------------------------
// Hk_*: hash key lifecycle and algebra
// ---------------------------------------------------------------------

/// Construct a key from a signed integer. Always succeeds; transfers one
/// strong reference to the caller.
#[no_mangle]
pub extern "C" fn Hk_NewFromInt(v: i64) -> *mut Hk {
    Rc::into_raw(Rc::new(Hk::from_int(v))) as *mut Hk
}

/// Construct a key from an unsigned integer.
#[no_mangle]
pub extern "C" fn Hk_NewFromUnsignedInt(v: u64) -> *mut Hk {
    Rc::into_raw(Rc::new(Hk::from_unsigned_int(v))) as *mut Hk
}

/// Construct a key from `len` bytes at `data`. Returns null if `data` is
/// null while `len != 0`.
///
/// # Safety
/// `data` must point to at least `len` readable bytes, or be any pointer
/// (including null) when `len == 0`.
#[no_mangle]
pub unsafe extern "C" fn Hk_NewFromBytes(data: *const u8, len: usize) -> *mut Hk {
    if data.is_null() && len != 0 {
        return std::ptr::null_mut();
    }
    let slice = if len == 0 {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(data, len) }
    };
    Rc::into_raw(Rc::new(Hk::from_bytes(slice))) as *mut Hk
}

/// Construct a key from four big-endian 32-bit limbs.
#[no_mangle]
pub extern "C" fn Hk_NewFromComponents(a: u32, b: u32, c: u32, d: u32) -> *mut Hk {
    Rc::into_raw(Rc::new(Hk::from_limbs(a, b, c, d))) as *mut Hk
}

/// Bump the handle's strong reference count.
///
/// # Safety
/// `hk` must be a live handle previously returned by an `Hk_New*`
/// function (or `Hk_IncRef`'d from one) and not yet fully `DecRef`'d away.
#[no_mangle]
pub unsafe extern "C" fn Hk_IncRef(hk: *const Hk) -> i32 {
    result_to_code(check_nonnull(hk, "hk").map(|_| unsafe {
        Rc::increment_strong_count(hk);
    }))
}

/// Drop one strong reference, freeing the key once the count reaches zero.
///
/// # Safety
/// Same preconditions as [`Hk_IncRef`]; `hk` must not be used again if
/// this call drops the last reference.
#[no_mangle]
pub unsafe extern "C" fn Hk_DecRef(hk: *const Hk) -> i32 {
    result_to_code(check_nonnull(hk, "hk").map(|_| unsafe {
        drop(Rc::from_raw(hk));
    }))
}

/// Current strong reference count.
///
/// # Safety
/// `hk` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_RefCount(hk: *const Hk) -> usize {
    if hk.is_null() {
        return 0;
    }
    let rc = unsafe { &*hk };
    rc.ref_count()
}

/// Current table `LockCount`.
///
/// # Safety
/// `hk` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_LockCount(hk: *const Hk) -> u32 {
    if hk.is_null() {
        return 0;
    }
    unsafe { &*hk }.lock_count()
}

/// `reduce(a, b)` as a freshly allocated key.
///
/// # Safety
/// `a` and `b` must be live handles.
#[no_mangle]
pub unsafe extern "C" fn Hk_Reduce(a: *const Hk, b: *const Hk) -> *mut Hk {
    if a.is_null() || b.is_null() {
        return std::ptr::null_mut();
    }
    let (a, b) = unsafe { (&*a, &*b) };
    Rc::into_raw(Rc::new(Hk::reduce(a, b))) as *mut Hk
}

/// `negate(a)` as a freshly allocated key.
///
/// # Safety
/// `a` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_Negate(a: *const Hk) -> *mut Hk {
    if a.is_null() {
        return std::ptr::null_mut();
    }
    Rc::into_raw(Rc::new(Hk::negate(unsafe { &*a }))) as *mut Hk
}

/// `rehash(a)` as a freshly allocated key.
///
/// # Safety
/// `a` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_Rehash(a: *const Hk) -> *mut Hk {
    if a.is_null() {
        return std::ptr::null_mut();
    }
    Rc::into_raw(Rc::new(Hk::rehash(unsafe { &*a }))) as *mut Hk
}

/// `combine(a, b)` as a freshly allocated key. Order-sensitive.
///
/// # Safety
/// `a` and `b` must be live handles.
#[no_mangle]
pub unsafe extern "C" fn Hk_Combine(a: *const Hk, b: *const Hk) -> *mut Hk {
    if a.is_null() || b.is_null() {
        return std::ptr::null_mut();
    }
    let (a, b) = unsafe { (&*a, &*b) };
    Rc::into_raw(Rc::new(Hk::combine(a, b))) as *mut Hk
}

/// In-place `acc := acc + x`.
///
/// # Safety
/// `acc` and `x` must be live handles; `acc` must not be a key currently
/// stored in an `Ht` (mutating it afterwards does not fix up cached
/// marker-summary skip lists -- see `ht::msl`).
#[no_mangle]
pub unsafe extern "C" fn Hk_ReduceUpdate(acc: *const Hk, x: *const Hk) -> i32 {
    if acc.is_null() || x.is_null() {
        return ffi_codes::NULL_HANDLE;
    }
    let (acc, x) = unsafe { (&*acc, &*x) };
    acc.reduce_update(x);
    ffi_codes::OK
}

/// Merge `[start, end)` into `hk`'s marker-validity set.
///
/// # Safety
/// `hk` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_AddValidRange(hk: *const Hk, start: i64, end: i64) -> i32 {
    result_to_code(check_nonnull(hk, "hk").map(|_| {
        unsafe { &*hk }.add_valid_range(marker_from_ffi(start), marker_from_ffi(end));
    }))
}

/// Drop all marker metadata from `hk`.
///
/// # Safety
/// `hk` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_ClearMarkers(hk: *const Hk) -> i32 {
    result_to_code(check_nonnull(hk, "hk").map(|_| {
        unsafe { &*hk }.clear_markers();
    }))
}

/// `1` if `m` is valid for `hk`, `0` otherwise, `-1` on a null handle.
///
/// # Safety
/// `hk` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_MarkerPointIsValid(hk: *const Hk, m: i64) -> i32 {
    if hk.is_null() {
        return -1;
    }
    i32::from(unsafe { &*hk }.marker_point_is_valid(marker_from_ffi(m)))
}

/// Write the 32-character lowercase hex digest into `out` (which must be
/// at least 32 bytes; no trailing NUL is written).
///
/// # Safety
/// `hk` must be a live handle; `out` must point to at least 32 writable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn Hk_ExtractHash(hk: *const Hk, out: *mut u8, out_len: usize) -> i32 {
    let res = check_nonnull(hk, "hk").and_then(|_| check_outbuf(out, out_len, "out"));
    match res {
        Ok(()) => {
            if out_len < 32 {
                return ffi_codes::INVALID_ARGUMENT;
            }
            let hex = unsafe { &*hk }.digest().to_hex();
            unsafe {
                std::ptr::copy_nonoverlapping(hex.as_ptr(), out, 32);
            }
            ffi_codes::OK
        }
        Err(e) => e.to_ffi_code(),
    }
}

/// The prime-modulus offset `δ` such that `P = 2^128 - δ`.
#[no_mangle]
pub extern "C" fn Hk_GetPrimeOffset() -> u64 {
    crate::hk::PRIME_OFFSET as u64
}

/// Parse an exact 32-hex-digit NUL-terminated C string into a key.
/// Returns null on malformed hex or a null pointer.
///
/// # Safety
/// `s` must be a valid, NUL-terminated C string or null.
#[no_mangle]
pub unsafe extern "C" fn Hk_NewFromHex(s: *const c_char) -> *mut Hk {
    if s.is_null() {
        return std::ptr::null_mut();
    }
    let cstr = unsafe { std::ffi::CStr::from_ptr(s) };
    match cstr.to_str().ok().and_then(|text| Hk::try_from_hex(text).ok()) {
        Some(hk) => Rc::into_raw(Rc::new(hk)) as *mut Hk,
        None => std::ptr::null_mut(),
    }
}

/// Reads a NUL-terminated C string as UTF-8 bytes into a new key. Returns
/// null on invalid UTF-8 or a null pointer.
///
/// # Safety
/// `s` must be a valid, NUL-terminated C string or null.
#[no_mangle]
pub unsafe extern "C" fn Hk_NewFromString(s: *const c_char) -> *mut Hk {
    if s.is_null() {
        return std::ptr::null_mut();
    }
    let cstr = unsafe { std::ffi::CStr::from_ptr(s) };
    match cstr.to_str() {
        Ok(text) => Rc::into_raw(Rc::new(Hk::from_bytes(text.as_bytes()))) as *mut Hk,
        Err(_) => std::ptr::null_mut(),
    }
}

/// `1`/`0` whether `a` and `b` carry the same digest, `-1` if either is
/// null. Ignores marker metadata, matching `Hk`'s own `Eq` impl.
///
/// # Safety
/// `a` and `b` must be live handles or null.
#[no_mangle]
pub unsafe extern "C" fn Hk_Equal(a: *const Hk, b: *const Hk) -> i32 {
    if a.is_null() || b.is_null() {
        return -1;
    }
    i32::from(unsafe { &*a } == unsafe { &*b })
}

/// One of the four 32-bit big-endian limbs making up the 128-bit digest.
/// Returns `0` on a null handle or an out-of-range `index` (valid range
/// `0..4`).
///
/// # Safety
/// `hk` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Hk_ExtractHashComponent(hk: *const Hk, index: usize) -> u32 {
    if hk.is_null() || index >= 4 {
        return 0;
    }
    unsafe { &*hk }.digest().limb(index)
}

/// Replace `hk`'s marker metadata with `*mi`, taking ownership of `mi` --
/// the pointer must not be used again afterwards.
///
/// # Safety
/// `hk` and `mi` must be live handles.
#[no_mangle]
pub unsafe extern "C" fn Hk_GiveMarkerInfo(hk: *const Hk, mi: *mut Mi) -> i32 {
    let res = check_nonnull(hk, "hk").and_then(|_| check_nonnull(mi, "mi"));
    match res {
        Ok(()) => {
            let owned = *unsafe { Box::from_raw(mi) };
            unsafe { &*hk }.give_marker_info(owned);
            ffi_codes::OK
        }
        Err(e) => e.to_ffi_code(),
    }
}

// ---------------------------------------------------------------------
// Mr_*: marker sentinel constants
// ---------------------------------------------------------------------

/// Sentinel standing in for `Marker::PosInf` at this ABI boundary.
#[no_mangle]
pub extern "C" fn Mr_Plus_Infinity() -> i64 {
    MR_PLUS_INFINITY
}

/// Sentinel standing in for `Marker::NegInf` at this ABI boundary.
#[no_mangle]
pub extern "C" fn Mr_Minus_Infinity() -> i64 {
    MR_MINUS_INFINITY
}

/// The start marker of `mi`'s `index`-th disjoint range, sentinel-encoded.
/// Returns `Mr_Plus_Infinity()` if `index` is out of range (nothing
/// there to report).
///
/// # Safety
/// `mi` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Mr_Start(mi: *const Mi, index: usize) -> i64 {
    if mi.is_null() {
        return MR_PLUS_INFINITY;
    }
    match unsafe { &*mi }.ranges().get(index) {
        Some(r) => marker_to_ffi(r.start),
        None => MR_PLUS_INFINITY,
    }
}

/// The end marker of `mi`'s `index`-th disjoint range, sentinel-encoded.
///
/// # Safety
/// `mi` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Mr_End(mi: *const Mi, index: usize) -> i64 {
    if mi.is_null() {
        return MR_MINUS_INFINITY;
    }
    match unsafe { &*mi }.ranges().get(index) {
        Some(r) => marker_to_ffi(r.end),
        None => MR_MINUS_INFINITY,
    }
}

// ---------------------------------------------------------------------
// Mi_*: marker-interval sets
// ---------------------------------------------------------------------

/// A new, empty marker-interval set.
#[no_mangle]
pub extern "C" fn Mi_New() -> *mut Mi {
    Box::into_raw(Box::new(Mi::new()))
}

/// Free an `Mi` handle (owned outright, unlike the refcounted `Hk`).
///
/// # Safety
/// `mi` must be a live handle returned by `Mi_New` and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn Mi_Free(mi: *mut Mi) {
    if !mi.is_null() {
        drop(unsafe { Box::from_raw(mi) });
    }
}

/// Merge `[start, end)` into `mi`.
///
/// # Safety
/// `mi` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Mi_AddRange(mi: *mut Mi, start: i64, end: i64) -> i32 {
    result_to_code(check_nonnull(mi, "mi").map(|_| {
        unsafe { &mut *mi }.add_range(marker_from_ffi(start), marker_from_ffi(end));
    }))
}

/// `1`/`0` membership test, `-1` on a null handle.
///
/// # Safety
/// `mi` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Mi_IsValid(mi: *const Mi, point: i64) -> i32 {
    if mi.is_null() {
        return -1;
    }
    i32::from(unsafe { &*mi }.is_valid(marker_from_ffi(point)))
}

/// Number of disjoint ranges.
///
/// # Safety
/// `mi` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Mi_RangeCount(mi: *const Mi) -> usize {
    if mi.is_null() {
        return 0;
    }
    unsafe { &*mi }.range_count()
}

/// `1`/`0` whether `a` and `b` contain the same ranges, `-1` if either is
/// null.
///
/// # Safety
/// `a` and `b` must be live handles or null.
#[no_mangle]
pub unsafe extern "C" fn Mi_Equal(a: *const Mi, b: *const Mi) -> i32 {
    if a.is_null() || b.is_null() {
        return -1;
    }
    i32::from(unsafe { &*a } == unsafe { &*b })
}

/// A fresh, independently owned copy of `mi`.
///
/// # Safety
/// `mi` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Mi_Clone(mi: *const Mi) -> *mut Mi {
    if mi.is_null() {
        return std::ptr::null_mut();
    }
    Box::into_raw(Box::new(unsafe { &*mi }.clone()))
}

// ---------------------------------------------------------------------
// Ht_*: the hash trie table
// ---------------------------------------------------------------------

/// A new, empty table.
#[no_mangle]
pub extern "C" fn Ht_New() -> *mut Ht {
    Box::into_raw(Box::new(Ht::new()))
}

/// Free a table, dropping its contribution to every stored key's
/// `LockCount`.
///
/// # Safety
/// `ht` must be a live handle returned by `Ht_New` and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn Ht_Free(ht: *mut Ht) {
    if !ht.is_null() {
        drop(unsafe { Box::from_raw(ht) });
    }
}

/// Number of keys stored.
///
/// # Safety
/// `ht` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Ht_Size(ht: *const Ht) -> usize {
    if ht.is_null() {
        return 0;
    }
    unsafe { &*ht }.size()
}

/// Insert a copy of `*key` into `ht`, bumping its strong-reference count.
///
/// # Safety
/// `ht` and `key` must be live handles.
#[no_mangle]
pub unsafe extern "C" fn Ht_Set(ht: *mut Ht, key: *const Hk) -> i32 {
    let res = check_nonnull(ht, "ht").and_then(|_| check_nonnull(key, "key"));
    match res {
        Ok(()) => {
            unsafe { &mut *ht }.set(unsafe { &*key }.clone());
            ffi_codes::OK
        }
        Err(e) => e.to_ffi_code(),
    }
}

/// `1`/`0` membership test by digest, `-1` on a null handle.
///
/// # Safety
/// `ht` and `key` must be live handles.
#[no_mangle]
pub unsafe extern "C" fn Ht_Contains(ht: *const Ht, key: *const Hk) -> i32 {
    if ht.is_null() || key.is_null() {
        return -1;
    }
    i32::from(unsafe { &*ht }.contains(unsafe { &*key }))
}

/// Remove the key with `key`'s digest, if present; returns a fresh
/// handle to it, or null if absent.
///
/// # Safety
/// `ht` and `key` must be live handles.
#[no_mangle]
pub unsafe extern "C" fn Ht_Pop(ht: *mut Ht, key: *const Hk) -> *mut Hk {
    if ht.is_null() || key.is_null() {
        return std::ptr::null_mut();
    }
    match unsafe { &mut *ht }.pop(unsafe { &*key }) {
        Some(found) => Rc::into_raw(Rc::new(found)) as *mut Hk,
        None => std::ptr::null_mut(),
    }
}

/// Remove every key.
///
/// # Safety
/// `ht` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Ht_Clear(ht: *mut Ht) -> i32 {
    result_to_code(check_nonnull(ht, "ht").map(|_| {
        unsafe { &mut *ht }.clear();
    }))
}

/// Write the combined digest of all keys valid at marker `m` into `out`
/// (32 hex bytes, no trailing NUL).
///
/// # Safety
/// `ht` must be a live handle; `out` must point to at least 32 writable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn Ht_HashAtMarkerPoint(
    ht: *const Ht,
    m: i64,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    let res = check_nonnull(ht, "ht").and_then(|_| check_outbuf(out, out_len, "out"));
    match res {
        Ok(()) => {
            if out_len < 32 {
                return ffi_codes::INVALID_ARGUMENT;
            }
            let hex = unsafe { &*ht }.hash_at_marker_point(Marker::of(m)).to_hex();
            unsafe {
                std::ptr::copy_nonoverlapping(hex.as_ptr(), out, 32);
            }
            ffi_codes::OK
        }
        Err(e) => e.to_ffi_code(),
    }
}

/// Write the combined digest of every key whose marker-validity overlaps
/// `[start, end)` at all into `out`. A key contributes its full digest the
/// moment any part of its validity falls inside the window.
///
/// # Safety
/// `ht` must be a live handle; `out` must point to at least 32 writable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn Ht_HashOfMarkerRange(
    ht: *const Ht,
    start: i64,
    end: i64,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    let res = check_nonnull(ht, "ht").and_then(|_| check_outbuf(out, out_len, "out"));
    match res {
        Ok(()) => {
            if out_len < 32 {
                return ffi_codes::INVALID_ARGUMENT;
            }
            let digest = unsafe { &*ht }
                .hash_of_marker_range(marker_from_ffi(start), marker_from_ffi(end));
            let hex = digest.to_hex();
            unsafe {
                std::ptr::copy_nonoverlapping(hex.as_ptr(), out, 32);
            }
            ffi_codes::OK
        }
        Err(e) => e.to_ffi_code(),
    }
}

/// Write the marker-oblivious combined digest of every stored key into
/// `out`.
///
/// # Safety
/// `ht` must be a live handle; `out` must point to at least 32 writable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn Ht_ViewHash(ht: *const Ht, out: *mut u8, out_len: usize) -> i32 {
    let res = check_nonnull(ht, "ht").and_then(|_| check_outbuf(out, out_len, "out"));
    match res {
        Ok(()) => {
            if out_len < 32 {
                return ffi_codes::INVALID_ARGUMENT;
            }
            let hex = unsafe { &*ht }.view_hash().to_hex();
            unsafe {
                std::ptr::copy_nonoverlapping(hex.as_ptr(), out, 32);
            }
            ffi_codes::OK
        }
        Err(e) => e.to_ffi_code(),
    }
}

/// A fresh table handle holding the one-shot whole-table summary: a table
/// whose `Ht_HashAtMarkerPoint` answers match `ht`'s. Free with `Ht_Free`.
///
/// # Safety
/// `ht` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn Ht_ReduceTable(ht: *const Ht) -> *mut Ht {
    if ht.is_null() {
        return std::ptr::null_mut();
    }
    Box::into_raw(Box::new(unsafe { &*ht }.reduce_table()))
}

/// Fold `table` into the running summary `acc` (or start a fresh one if
/// `acc` is null), returning the updated accumulator. Consumes `acc`; free
/// the returned handle (or pass it to another `Ht_Summarize_Update` /
/// `Ht_Summarize_Finish` call) rather than the one passed in.
///
/// # Safety
/// `table` must be a live handle; `acc`, if non-null, must be a live handle
/// previously returned by `Ht_Summarize_Update` and not yet freed or
/// finished.
#[no_mangle]
pub unsafe extern "C" fn Ht_Summarize_Update(acc: *mut Summary, table: *const Ht) -> *mut Summary {
    if table.is_null() {
        return std::ptr::null_mut();
    }
    let mut summary = if acc.is_null() {
        Summary::new()
    } else {
        *unsafe { Box::from_raw(acc) }
    };
    summary.update(unsafe { &*table });
    Box::into_raw(Box::new(summary))
}

/// Materialize an accumulator built via `Ht_Summarize_Update` into a
/// queryable table, consuming the accumulator. A null `acc` finishes an
/// empty summary. Free the result with `Ht_Free`.
///
/// # Safety
/// `acc`, if non-null, must be a live handle previously returned by
/// `Ht_Summarize_Update` and not yet freed or finished.
#[no_mangle]
pub unsafe extern "C" fn Ht_Summarize_Finish(acc: *mut Summary) -> *mut Ht {
    let summary = if acc.is_null() {
        Summary::new()
    } else {
        *unsafe { Box::from_raw(acc) }
    };
    Box::into_raw(Box::new(summary.finish()))
}

/// Debug-only consistency check; see `ht::check_consistent`.
///
/// # Safety
/// `ht` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn _Ht_debug_HashTableConsistent(ht: *const Ht) -> i32 {
    if ht.is_null() {
        return ffi_codes::NULL_HANDLE;
    }
    result_to_code(crate::ht::check_consistent(unsafe { &*ht }))
}
