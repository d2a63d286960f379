use std::ffi::CStr;
use std::io;

/// Platform description of an I/O error without Rust's `(os error N)` suffix.
pub fn describe(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => strerror(code),
        None => err.to_string(),
    }
}

fn strerror(code: i32) -> String {
    let mut buf = [0 as libc::c_char; 256];
    // XSI strerror_r: fills `buf` and returns 0 on success.
    let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return format!("Unknown error {code}");
    }
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}
