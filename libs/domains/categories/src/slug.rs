use uuid::Uuid;

const FALLBACK: &str = "default-slug";

/// URL-safe, lowercase, hyphen-separated form of `text`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace('&', " and ");

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        FALLBACK.to_string()
    } else {
        slug
    }
}

/// `base`, `base-2`, `base-3`, ...
pub fn with_suffix(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

/// `base-<8 hex chars>`
pub fn with_random_suffix(base: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{base}-{}", &token[..8])
}
