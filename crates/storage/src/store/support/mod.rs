#![forbid(unsafe_code)]

mod time;

pub(super) use time::now_rfc3339;
