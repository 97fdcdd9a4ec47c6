/// One-line preview of a model reply for log output.
///
/// Newlines are flattened to spaces and the result is cut at a char boundary
/// no later than `max_bytes`, with `...` appended when anything was dropped.
pub fn log_preview(s: &str, max_bytes: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.len() <= max_bytes {
        return flat;
    }

    let end = flat
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&next| next <= max_bytes)
        .last()
        .unwrap_or(0);

    format!("{}...", &flat[..end])
}
