/// Greedy word wrap on whitespace. Always returns at least one line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    pack(text.split_whitespace(), " ", width)
}

/// Packs `items` into lines of at most `width` characters, joined by
/// `separator`. An item longer than `width` gets a line of its own.
pub fn pack<'a>(items: impl IntoIterator<Item = &'a str>, separator: &str, width: usize) -> Vec<String> {
    let sep_len = separator.chars().count();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for item in items {
        let item_len = item.chars().count();
        if current.is_empty() {
            current.push_str(item);
            current_len = item_len;
        } else if current_len + sep_len + item_len <= width {
            current.push_str(separator);
            current.push_str(item);
            current_len += sep_len + item_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(item);
            current_len = item_len;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Shortens `s` to `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    match max_len {
        0 => String::new(),
        n => s.chars().take(n - 1).chain(std::iter::once('…')).collect(),
    }
}
