/// Text after the last `.`; empty when there is no dot or the name starts
/// with its only dot.
pub fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(i) => &name[i + 1..],
    }
}

/// Text after the last `/`, or the whole name.
pub fn file_name_only(name: &str) -> &str {
    match name.rfind('/') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}
