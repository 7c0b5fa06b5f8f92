use jamboree_cards::truncate_to;
use serde::Serialize;

/// Upper bound for a rendered view dump; browse pages can carry hundreds of cards.
const VIEW_DUMP_MAX_CHARS: usize = 4096;

/// Hands a pretty-printed JSON rendering of a view model to `log_action`, only when
/// DEBUG is enabled.
pub(crate) fn with_view_debug<T, F>(view: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(view)
        .unwrap_or_else(|error| format!("<view serialize failed: {error}>"));
    log_action(&truncate_to(&pretty_json, VIEW_DUMP_MAX_CHARS));
}
