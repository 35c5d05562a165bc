// Console logging
// Routes the `log` facade to the browser console and turns panics into
// readable console errors. Safe to call more than once.

use crate::config::LogLevel;

pub fn init(level: LogLevel) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level.into()).is_err() {
        log::debug!("logger already initialized");
    }
}
