use crate::error::WildwatchErrorCode;

fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_ascii_whitespace() {
            if !out.is_empty() && !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else if ch.is_ascii_graphic() {
            out.push(ch);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "na".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn format_line(
    code: WildwatchErrorCode,
    stage: &str,
    action: &str,
    key: &str,
    reason: &str,
    err: &str,
) -> String {
    format!(
        "WILDWATCH_WARN code={} stage={} action={} key={} reason={} err={}",
        code.as_str(),
        sanitize_value(stage),
        sanitize_value(action),
        sanitize_value(key),
        sanitize_value(reason),
        sanitize_value(err),
    )
}

pub fn emit(
    code: WildwatchErrorCode,
    stage: &str,
    action: &str,
    key: &str,
    reason: &str,
    err: &str,
) {
    log::warn!("{}", format_line(code, stage, action, key, reason, err));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_value_rewrites_whitespace() {
        assert_eq!(sanitize_value("a b\tc"), "a_b_c");
    }

    #[test]
    fn sanitize_value_falls_back_for_empty() {
        assert_eq!(sanitize_value("   "), "na");
    }

    #[test]
    fn format_line_carries_stable_code() {
        let line = format_line(
            WildwatchErrorCode::E002StorageCorrupt,
            "journal",
            "load",
            "wildwatch_entries",
            "parse failed",
            "expected value at line 1",
        );
        assert!(line.starts_with("WILDWATCH_WARN code=E002_STORAGE_CORRUPT"));
        assert!(line.contains("reason=parse_failed"));
        assert!(line.contains("err=expected_value_at_line_1"));
    }
}
