//! Logging macros taking a `Code` and `"key" => value` context pairs
//!
//! Context values may be any `Display` type. All macros are no-ops until
//! the global logging service has been initialized.

/// Internal: render `"key" => value` pairs into owned strings
#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    ($($key:expr => $value:expr),*) => {
        {
            let pairs: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),*];
            pairs
        }
    };
}

/// Log an error event
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, Vec::new())
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($span), Vec::new())
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            $crate::__log_context!($($key => $value),+),
        )
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            Some($span),
            $crate::__log_context!($($key => $value),+),
        )
    };
}

/// Log a success event
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, Vec::new())
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::log_success_with_context(
            $code,
            $message,
            $crate::__log_context!($($key => $value),+),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, Vec::new())
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::log_info_with_context($message, $crate::__log_context!($($key => $value),+))
    };
}

/// Log a warning, optionally with a code
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        $crate::logging::log_warning_with_context(None, $message, None, Vec::new())
    };

    (code = $code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::log_warning_with_context(
            Some($code),
            $message,
            Some($span),
            $crate::__log_context!($($key => $value),+),
        )
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        $crate::logging::log_warning_with_context(
            None,
            $message,
            None,
            $crate::__log_context!($($key => $value),+),
        )
    };
}

/// Log a debug event; skipped entirely below debug level
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_debug_with_context($message, Vec::new());
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_debug_with_context(
                $message,
                $crate::__log_context!($($key => $value),+),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::Span;

    #[test]
    fn test_macros_are_noops_without_service() {
        // Expands and runs whether or not a global service exists
        log_error!(codes::lexical::INVALID_CHARACTER, "Invalid character",
            "char" => '$',
            "line" => 3
        );
        log_error!(codes::syntax::INVALID_EXPRESSION, "Invalid expression", span = Span::dummy());
        log_success!(codes::success::TRANSLATION_COMPLETE, "Done", "expressions" => 2);
        log_info!("Reading source", "path" => "expr.txt");
        log_warning!("Error token", "lexeme" => "#");
        log_warning!(code = codes::lexical::WORD_TOO_LONG, "Word too long", span = Span::dummy(),
            "length" => 300
        );
        log_debug!("Token", "kind" => "<WORD>");
    }
}
