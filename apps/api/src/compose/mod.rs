//! Form Orchestration Layer — wires the compose workflow together: recipient
//! parsing, busy-flag discipline, and the extract → generate → send pipeline.

pub mod busy;
pub mod handlers;

/// Splits raw user text into a recipient list: separators are newlines,
/// commas, and semicolons; entries are trimmed and empties dropped. Order is
/// preserved and duplicates are not removed.
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r', ',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_all_separators() {
        let raw = "a@x.co,b@x.co;c@x.co\nd@x.co";
        assert_eq!(split_recipients(raw), ["a@x.co", "b@x.co", "c@x.co", "d@x.co"]);
    }

    #[test]
    fn test_never_yields_empty_elements() {
        let raw = " ,;\n\n a@x.co ;; \r\n , b@x.co ,\n";
        let out = split_recipients(raw);
        assert_eq!(out, ["a@x.co", "b@x.co"]);
        assert!(out.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let raw = "b@x.co\na@x.co\nb@x.co";
        assert_eq!(split_recipients(raw), ["b@x.co", "a@x.co", "b@x.co"]);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(split_recipients("").is_empty());
        assert!(split_recipients(" \n;, ").is_empty());
    }
}
