use anyhow::Result;
use gravatar_core::{DigestSource, HashDigest};
use std::io::BufRead;

pub fn digest_source_override(
    pinned: Option<Option<String>>,
    computed: bool,
) -> Result<Option<DigestSource>> {
    if computed {
        return Ok(Some(DigestSource::Computed));
    }
    match pinned {
        None => Ok(None),
        Some(None) => Ok(Some(DigestSource::placeholder())),
        Some(Some(raw)) => {
            let digest: HashDigest = raw.parse()?;
            Ok(Some(DigestSource::Pinned(digest)))
        }
    }
}

/// One address per line; blank lines are skipped.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(line);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{digest_source_override, read_lines};
    use gravatar_core::{CoreError, DigestSource};
    use std::io::Cursor;

    #[test]
    fn override_defaults_to_config() {
        assert_eq!(digest_source_override(None, false).unwrap(), None);
    }

    #[test]
    fn override_bare_pinned_uses_placeholder() {
        assert_eq!(
            digest_source_override(Some(None), false).unwrap(),
            Some(DigestSource::placeholder())
        );
    }

    #[test]
    fn override_rejects_bad_digest() {
        let err = digest_source_override(Some(Some("xyz".to_string())), false).unwrap_err();
        assert!(err.downcast_ref::<CoreError>().is_some());
    }

    #[test]
    fn read_lines_skips_blank_lines() {
        let input = Cursor::new("a@example.com\n\n  \r\nB@Example.com\r\n");
        let lines = read_lines(input).unwrap();
        assert_eq!(lines, vec!["a@example.com", "B@Example.com"]);
    }
}
