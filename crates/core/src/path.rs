//! URL prefix stripping
//!
//! Turns `rn://outer/profile` into `outer/profile` given the prefix `rn://`.
//! A `*` host label in a prefix accepts one or more labels, so
//! `https://*.example.com` accepts `https://app.example.com/home` and
//! `https://a.b.example.com/home`.

/// Strip the first matching prefix from `url`
///
/// Runs of `/` before the query string are collapsed first. Returns `None`
/// when no prefix matches.
pub fn extract_path_from_url<S: AsRef<str>>(prefixes: &[S], url: &str) -> Option<String> {
    let normalized = normalize_url(url);

    prefixes
        .iter()
        .find_map(|prefix| strip_prefix(prefix.as_ref(), &normalized))
        .map(str::to_string)
}

fn normalize_url(url: &str) -> String {
    let (origin_and_path, search) = match url.split_once('?') {
        Some((head, tail)) => (head, Some(tail)),
        None => (url, None),
    };

    let mut normalized = collapse_slashes(origin_and_path);
    if let Some(search) = search {
        normalized.push('?');
        normalized.push_str(search);
    }
    normalized
}

fn collapse_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_slash = false;
    for c in input.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

fn strip_prefix<'a>(prefix: &str, url: &'a str) -> Option<&'a str> {
    let (protocol, rest) = match prefix.find(':') {
        Some(i) if i > 0 => prefix.split_at(i + 1),
        _ => ("", prefix),
    };

    let host = collapse_slashes(rest);
    let host = host.trim_start_matches('/');

    let remainder = url.strip_prefix(protocol)?.trim_start_matches('/');
    let labels: Vec<&str> = host.split('.').collect();
    let consumed = match_host(&labels, remainder)?;

    Some(&remainder[consumed..])
}

/// Match dot-separated host labels at the start of `input`
///
/// Returns the number of bytes consumed. A `*` label matches one or more
/// characters other than `/`, preferring the longest match.
fn match_host(labels: &[&str], input: &str) -> Option<usize> {
    let Some((label, rest)) = labels.split_first() else {
        return Some(0);
    };

    let tail = |offset: usize| -> Option<usize> {
        if rest.is_empty() {
            return Some(offset);
        }
        let after = input[offset..].strip_prefix('.')?;
        match_host(rest, after).map(|n| offset + 1 + n)
    };

    if *label == "*" {
        let span = input.find('/').unwrap_or(input.len());
        (1..=span)
            .rev()
            .filter(|&end| input.is_char_boundary(end))
            .find_map(tail)
    } else {
        input.strip_prefix(label)?;
        tail(label.len())
    }
}
