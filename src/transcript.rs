//! In-memory chat transcript: an insertion-ordered log of user and bot
//! messages plus transient pending entries, one per in-flight request.

/// Originator of a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "Vous",
            Sender::Bot => "IA",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Opaque correlation id for a pending entry. Timestamp-derived with a
/// monotonic suffix so two sends in the same millisecond stay distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingId(String);

impl LoadingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub sender: Sender,
    pub text: String,
    pub timestamp: i64,
    loading: Option<LoadingId>,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        self.loading.is_some()
    }

    pub fn loading_id(&self) -> Option<&LoadingId> {
        self.loading.as_ref()
    }
}

pub const PENDING_TEXT: &str = "Réflexion en cours…";

#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Appends a message. Prior entries are never edited or removed.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.entries.push(Entry {
            sender,
            text: text.into(),
            timestamp: now_unix_ts(),
            loading: None,
        });
    }

    /// Appends a pending entry and returns its correlation id.
    pub fn add_loading(&mut self) -> LoadingId {
        let id = LoadingId(format!("loading-{}-{}", now_unix_millis(), self.next_seq));
        self.next_seq += 1;
        self.entries.push(Entry {
            sender: Sender::Bot,
            text: PENDING_TEXT.to_string(),
            timestamp: now_unix_ts(),
            loading: Some(id.clone()),
        });
        id
    }

    /// Removes the pending entry matching `id`. A stale or unknown id is a
    /// no-op; other entries are never touched.
    pub fn remove_loading(&mut self, id: &LoadingId) {
        self.entries
            .retain(|entry| entry.loading.as_ref() != Some(id));
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// Renders the settled transcript as markup, one line per message, with
    /// bodies neutralized through [`escape_html`].
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .filter(|entry| !entry.is_pending())
            .map(|entry| {
                format!(
                    "<div class=\"message {}\"><strong>{}:</strong> {}</div>",
                    entry.sender.css_class(),
                    entry.sender.label(),
                    escape_html(&entry.text)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Escapes the markup-sensitive characters so arbitrary text can be embedded
/// in HTML without ever parsing as active markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn now_unix_ts() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn now_unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order() {
        let mut log = ChatLog::new();
        log.push(Sender::User, "salut");
        log.push(Sender::Bot, "bonjour");
        log.push(Sender::User, "ça va ?");

        let texts: Vec<&str> = log.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["salut", "bonjour", "ça va ?"]);
    }

    #[test]
    fn loading_ids_are_unique_within_the_same_instant() {
        let mut log = ChatLog::new();
        let a = log.add_loading();
        let b = log.add_loading();
        let c = log.add_loading();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(log.pending_count(), 3);
    }

    #[test]
    fn remove_loading_targets_exactly_one_entry() {
        let mut log = ChatLog::new();
        log.push(Sender::User, "question");
        let first = log.add_loading();
        let second = log.add_loading();

        log.remove_loading(&first);
        assert_eq!(log.pending_count(), 1);
        assert_eq!(log.entries().len(), 2);

        // Double removal of the same id changes nothing.
        log.remove_loading(&first);
        assert_eq!(log.entries().len(), 2);

        log.remove_loading(&second);
        assert_eq!(log.pending_count(), 0);
        assert_eq!(log.entries()[0].text, "question");
    }

    #[test]
    fn escape_html_neutralizes_script_tags() {
        let escaped = escape_html("<script>alert(1)</script>");
        assert_eq!(escaped, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(!escaped.contains('<'));
    }

    #[test]
    fn escape_html_keeps_already_escaped_text_inert() {
        let escaped = escape_html("&lt;b&gt;");
        assert_eq!(escaped, "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn to_html_contains_no_raw_markup_from_bodies() {
        let mut log = ChatLog::new();
        log.push(Sender::User, "<img src=x onerror=alert(1)>");
        log.push(Sender::Bot, "réponse & suite");
        let _ = log.add_loading();

        let html = log.to_html();
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("<strong>Vous:</strong>"));
        assert!(html.contains("<strong>IA:</strong>"));
        assert!(html.contains("réponse &amp; suite"));
        // Pending entries are transient and never exported.
        assert!(!html.contains(PENDING_TEXT));
    }
}
