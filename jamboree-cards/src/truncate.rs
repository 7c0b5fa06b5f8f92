use std::borrow::Cow;

pub const ELLIPSIS: &str = "...";

/// Display budgets for card fields. Text budgets are in characters; `ATTENDEES` is a name count.
#[derive(Debug, Default, Clone, Copy)]
pub struct CardBudget;

impl CardBudget {
    pub const ATTENDEES: usize = 10;
    pub const GENRES: usize = 125;
    pub const INSTRUMENTS: usize = 115;
    pub const VENUE: usize = 125;
    pub const ABOUT: usize = 225;
    pub const BIO: usize = 225;
}

/// Bounds `text` to `max_len` characters without splitting a word.
///
/// Text within budget is returned borrowed. Longer text is cut at `max_len`, trimmed back to the
/// last space inside the cut, and suffixed with [`ELLIPSIS`]. When the cut holds no space the
/// whole cut is kept.
pub fn truncate_to(text: &str, max_len: usize) -> Cow<'_, str> {
    let Some((cut, _)) = text.char_indices().nth(max_len) else {
        return Cow::Borrowed(text);
    };

    let prefix = &text[..cut];
    let kept = prefix.rfind(' ').map_or(prefix, |space| &prefix[..space]);
    Cow::Owned(format!("{kept}{ELLIPSIS}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuts_back_to_last_space() {
        assert_eq!(truncate_to("Rock, Jazz, Blues", 8), "Rock,...");
    }

    #[test]
    fn text_within_budget_is_borrowed_unchanged() {
        let out = truncate_to("Rock, Jazz", 10);
        assert!(matches!(out, Cow::Borrowed("Rock, Jazz")));

        let out = truncate_to("", 0);
        assert!(matches!(out, Cow::Borrowed("")));
    }

    #[test]
    fn no_space_keeps_whole_cut() {
        assert_eq!(truncate_to("Supercalifragilistic", 5), "Super...");
        assert_eq!(truncate_to("abc", 0), "...");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 'é' is two bytes; the cut must land on a char boundary.
        assert_eq!(truncate_to("café au lait", 6), "café...");
        assert_eq!(truncate_to("ééééé", 5), "ééééé");
    }

    #[test]
    fn result_never_ends_in_partial_word() {
        let text = "the quick brown fox jumps over the lazy dog";
        let words: Vec<&str> = text.split(' ').collect();

        for max_len in 3..text.len() {
            let out = truncate_to(text, max_len);
            let body = out.strip_suffix(ELLIPSIS).expect("long text gets an ellipsis");
            assert!(body.chars().count() <= max_len);
            if let Some(last) = body.split(' ').next_back() {
                assert!(
                    last.is_empty() || words.contains(&last),
                    "partial word {last:?} at max_len={max_len}"
                );
            }
        }
    }
}
