use jamboree_schema::ImageView;

/// A card image that falls back to a fixed placeholder.
///
/// A missing or blank URI starts on the placeholder. A load failure switches to the
/// placeholder exactly once; the original URI is never retried.
///
/// The service only renders the starting state through [`ImageSource::to_view`]. Loading
/// happens in the client, which applies the switch itself: on a failed load it shows
/// `ImageView::fallback` and does not retry `src`. `on_load_error` is that same rule for
/// clients that hold an `ImageSource` directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    configured: Option<String>,
    placeholder: String,
    failed: bool,
}

impl ImageSource {
    pub fn new(configured: Option<&str>, placeholder: &str) -> Self {
        let configured = configured
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .map(str::to_string);
        Self {
            configured,
            placeholder: placeholder.to_string(),
            failed: false,
        }
    }

    pub fn current(&self) -> &str {
        match &self.configured {
            Some(uri) if !self.failed => uri,
            _ => &self.placeholder,
        }
    }

    /// Whether the placeholder is what shows now.
    pub fn is_placeholder(&self) -> bool {
        self.current() == self.placeholder
    }

    /// Returns `true` when this call switched the source.
    pub fn on_load_error(&mut self) -> bool {
        if self.failed || self.configured.is_none() {
            return false;
        }
        self.failed = true;
        true
    }

    /// `src` is the current source; `fallback` is what a client swaps to on a failed load.
    pub fn to_view(&self) -> ImageView {
        ImageView {
            src: self.current().to_string(),
            fallback: self.placeholder.clone(),
        }
    }
}
