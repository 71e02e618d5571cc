//! Bulk text splitting: one pass over delimited input yields the ordered
//! list of quotes a batch export will consume.

/// Token that separates independent quote entries in bulk text.
pub const ENTRY_SEPARATOR: &str = "^\"";
/// Token that stands for an explicit newline inside a single entry.
pub const LINE_BREAK_MARKER: &str = "*\"";

/// Ordered sequence of quote strings produced by one splitting pass.
///
/// Entries are consumed strictly in order; the job is never reordered,
/// deduplicated or retried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchJob {
    entries: Vec<String>,
}

impl BatchJob {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Split raw bulk text into a [`BatchJob`].
///
/// Both tokens are treated as plain substrings, never as pattern syntax.
/// Pieces are trimmed and dropped when empty; inside each surviving piece
/// every occurrence of `line_break` becomes a literal newline. The entry is
/// trimmed once more afterwards so no emitted quote carries leading or
/// trailing whitespace introduced by a marker at the edges.
pub fn split_bulk_text(raw: &str, separator: &str, line_break: &str) -> BatchJob {
    // An empty separator would split between every character; treat it as
    // "no occurrences" so the whole text stays a single entry.
    let pieces: Vec<&str> = if separator.is_empty() {
        vec![raw]
    } else {
        raw.split(separator).collect()
    };

    let entries = pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            if line_break.is_empty() {
                piece.to_string()
            } else {
                piece.replace(line_break, "\n")
            }
        })
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect();

    BatchJob { entries }
}

/// Build a job from plain line-oriented input: one trimmed, non-empty entry
/// per line. This mirrors the multi-field bulk form, where each field holds
/// exactly one quote.
pub fn split_lines(raw: &str) -> BatchJob {
    let entries = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    BatchJob { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split(raw: &str) -> Vec<String> {
        split_bulk_text(raw, ENTRY_SEPARATOR, LINE_BREAK_MARKER)
            .entries()
            .to_vec()
    }

    #[test]
    fn separator_splits_entries() {
        assert_eq!(split("A^\"B"), vec!["A", "B"]);
    }

    #[test]
    fn line_break_marker_becomes_newline() {
        assert_eq!(split("A*\"B^\"C"), vec!["A\nB", "C"]);
    }

    #[test]
    fn whitespace_only_input_yields_no_entries() {
        assert_eq!(split("   "), Vec::<String>::new());
        assert_eq!(split(""), Vec::<String>::new());
    }

    #[test]
    fn input_without_separator_is_a_single_entry() {
        assert_eq!(split("  just one quote  "), vec!["just one quote"]);
    }

    #[test]
    fn empty_pieces_are_dropped_and_order_is_kept() {
        assert_eq!(split("^\"first^\"  ^\"second^\""), vec!["first", "second"]);
    }

    #[test]
    fn entries_are_trimmed_after_marker_replacement() {
        // A marker at the edge of a piece must not leave a stray newline.
        assert_eq!(split("*\"A^\"B*\""), vec!["A", "B"]);
        // A piece that is only markers vanishes entirely.
        assert_eq!(split("*\"^\"real"), vec!["real"]);
    }

    #[test]
    fn inner_text_is_not_altered() {
        assert_eq!(split("10% \"off\" today!"), vec!["10% \"off\" today!"]);
    }

    #[test]
    fn custom_tokens_are_plain_substrings() {
        let job = split_bulk_text("a.*b||c.*d", "||", ".*");
        assert_eq!(job.entries(), ["a\nb", "c\nd"]);
    }

    #[test]
    fn empty_separator_token_means_single_entry() {
        let job = split_bulk_text("abc", "", "");
        assert_eq!(job.entries(), ["abc"]);
    }

    #[test]
    fn lines_mode_drops_blanks_and_trims() {
        let job = split_lines("first\n\n  second  \n\t\n");
        assert_eq!(job.entries(), ["first", "second"]);
    }
}
