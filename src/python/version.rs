use std::cmp::Ordering;

/// Numeric runs of a version tag: `"3.12-arm64"` -> `[3, 12, 64]`.
pub fn extract_version_parts(input: &str) -> Vec<u32> {
    let mut parts: Vec<u32> = Vec::new();
    let mut buf = String::new();

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            buf.push(ch);
            continue;
        }

        if !buf.is_empty() {
            if let Ok(v) = buf.parse::<u32>() {
                parts.push(v);
            }
            buf.clear();
        }
    }

    if !buf.is_empty() {
        if let Ok(v) = buf.parse::<u32>() {
            parts.push(v);
        }
    }

    parts
}

/// `(major, minor)` from the leading dotted release of a tag, ignoring any suffix.
pub fn release(tag: &str) -> Option<(u32, u32)> {
    let numeric = tag.split(['-', '_', ' ']).next()?;
    let mut parts = numeric.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor: String = parts.next()?.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((major, minor.parse().ok()?))
}

/// Display order for version tags: numeric release first, so `3.9` sorts before `3.11`.
/// Tags with equal releases fall back to plain string order, keeping the order total.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    let left = release_key(a);
    let right = release_key(b);
    left.cmp(&right).then_with(|| a.cmp(b))
}

fn release_key(tag: &str) -> Vec<u32> {
    let numeric = tag.split(['-', '_', ' ']).next().unwrap_or(tag);
    let parts = extract_version_parts(numeric);
    if parts.is_empty() {
        // Non-numeric tags go last.
        vec![u32::MAX]
    } else {
        parts
    }
}
