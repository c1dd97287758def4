pub fn emit(message: &str) {
    tracing::warn!("{message}");
}

pub fn emit_count(count: u64, what: &str, column: &str) {
    if count > 0 {
        emit(&format!("{count} {what} in `{column}` coerced to missing"));
    }
}
