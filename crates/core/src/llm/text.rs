/// Removes a code fence wrapping the whole answer (```markdown ... ```), if present.
pub fn strip_outer_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let Some((_, inner)) = trimmed.split_once('\n') else {
        return trimmed;
    };
    let Some(inner) = inner.trim_end().strip_suffix("```") else {
        return trimmed;
    };
    inner.trim()
}

pub fn join_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts {
        if part.is_empty() {
            continue;
        }
        out.push_str(part);
    }
    out
}
