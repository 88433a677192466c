use url::form_urlencoded;

/// Query parameter that records the active settings section.
pub const SECTION_PARAM: &str = "section";

/// Number of past locations the navigator remembers.
pub const HISTORY_LIMIT: usize = 32;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Classifications,
    TimeLimits,
}

impl SectionId {
    /// Sections in display order. The first one is the fallback.
    pub const ALL: [SectionId; 2] = [SectionId::Classifications, SectionId::TimeLimits];

    pub fn id(self) -> &'static str {
        match self {
            Self::Classifications => "classifications",
            Self::TimeLimits => "time-limits",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Classifications => "Classifications",
            Self::TimeLimits => "Time Limits",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Pick the section to show on startup: the requested id when it names a
/// known section, otherwise the first section.
pub fn resolve_section(requested: Option<&str>) -> SectionId {
    requested
        .and_then(SectionId::from_id)
        .unwrap_or(SectionId::ALL[0])
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

/// Read the value of `key` from a URL or location's query string.
///
/// The value is form-decoded (`%XX` escapes and `+`), as a browser's
/// `URLSearchParams` would. The fragment is ignored. Returns `None` when the
/// parameter is absent.
pub fn query_param(location: &str, key: &str) -> Option<String> {
    let without_fragment = location.split('#').next().unwrap_or_default();
    let (_, query) = without_fragment.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Return `location` with `key` set to `value`, replacing an existing value
/// and keeping the other parameters and the fragment. `value` is form-encoded.
pub fn with_query_param(location: &str, key: &str, value: &str) -> String {
    let (before_fragment, fragment) = match location.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (location, None),
    };
    let (path, query) = before_fragment
        .split_once('?')
        .unwrap_or((before_fragment, ""));

    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    let mut pairs: Vec<String> = Vec::new();
    let mut replaced = false;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let k = pair.split_once('=').map_or(pair, |(k, _)| k);
        if k == key {
            if !replaced {
                pairs.push(format!("{key}={encoded}"));
                replaced = true;
            }
        } else {
            pairs.push(pair.to_owned());
        }
    }
    if !replaced {
        pairs.push(format!("{key}={encoded}"));
    }

    let mut out = format!("{path}?{}", pairs.join("&"));
    if let Some(frag) = fragment {
        out.push('#');
        out.push_str(frag);
    }
    out
}

// ---------------------------------------------------------------------------
// Navigator: active section + location history
// ---------------------------------------------------------------------------

/// Tracks the active section and records every section change as a new
/// location carrying `section=<id>`. Only the last [`HISTORY_LIMIT`]
/// locations are kept.
#[derive(Debug, Clone)]
pub struct Navigator {
    active: SectionId,
    history: Vec<String>,
}

impl Navigator {
    /// Restore the section named by `location`'s query (falling back to
    /// `fallback`, then to the first section) and push the resulting location.
    pub fn restore(location: &str, fallback: Option<&str>) -> Self {
        let requested = query_param(location, SECTION_PARAM);
        let active = requested
            .as_deref()
            .and_then(SectionId::from_id)
            .unwrap_or_else(|| resolve_section(fallback));
        if requested.is_some() && requested.as_deref() != Some(active.id()) {
            tracing::debug!("navigation: unknown section {requested:?}, showing {}", active.id());
        }
        let mut nav = Self {
            active,
            history: Vec::new(),
        };
        nav.push(location);
        nav
    }

    /// Activate `section` and push a location recording it.
    pub fn show_section(&mut self, section: SectionId) {
        self.active = section;
        let current = self.location().to_owned();
        self.push(&current);
    }

    fn push(&mut self, base: &str) {
        let location = with_query_param(base, SECTION_PARAM, self.active.id());
        tracing::debug!("navigation: push {location}");
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(location);
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn location(&self) -> &str {
        self.history.last().map_or("", String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ids_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_id(section.id()), Some(section));
        }
        assert_eq!(SectionId::from_id("nope"), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(SectionId::Classifications.next(), SectionId::TimeLimits);
        assert_eq!(SectionId::TimeLimits.next(), SectionId::Classifications);
        assert_eq!(SectionId::Classifications.prev(), SectionId::TimeLimits);
    }

    #[test]
    fn resolve_falls_back_to_first_section() {
        assert_eq!(resolve_section(Some("time-limits")), SectionId::TimeLimits);
        assert_eq!(resolve_section(Some("general")), SectionId::Classifications);
        assert_eq!(resolve_section(None), SectionId::Classifications);
    }

    #[test]
    fn query_param_reads_value() {
        assert_eq!(
            query_param("http://localhost:5000/settings?section=time-limits", "section").as_deref(),
            Some("time-limits")
        );
        assert_eq!(
            query_param("/settings?a=1&section=x#top", "section").as_deref(),
            Some("x")
        );
        assert_eq!(query_param("/settings", "section"), None);
        assert_eq!(query_param("/settings#section=x", "section"), None);
    }

    #[test]
    fn with_query_param_replaces_and_keeps_others() {
        assert_eq!(
            with_query_param("/settings", "section", "time-limits"),
            "/settings?section=time-limits"
        );
        assert_eq!(
            with_query_param("/settings?a=1&section=old#top", "section", "new"),
            "/settings?a=1&section=new#top"
        );
        assert_eq!(
            with_query_param("/settings?a=1", "section", "new"),
            "/settings?a=1&section=new"
        );
    }

    #[test]
    fn restore_uses_query_section() {
        let nav = Navigator::restore("/settings?section=time-limits", None);
        assert_eq!(nav.active(), SectionId::TimeLimits);
        assert_eq!(nav.location(), "/settings?section=time-limits");
    }

    #[test]
    fn restore_unknown_section_falls_back() {
        let nav = Navigator::restore("/settings?section=bogus", Some("time-limits"));
        assert_eq!(nav.active(), SectionId::TimeLimits);
        let nav = Navigator::restore("/settings?section=bogus", None);
        assert_eq!(nav.active(), SectionId::Classifications);
        assert_eq!(nav.location(), "/settings?section=classifications");
    }

    #[test]
    fn show_section_pushes_history() {
        let mut nav = Navigator::restore("/settings", None);
        nav.show_section(SectionId::TimeLimits);
        nav.show_section(SectionId::Classifications);
        assert_eq!(
            nav.history(),
            &[
                "/settings?section=classifications".to_owned(),
                "/settings?section=time-limits".to_owned(),
                "/settings?section=classifications".to_owned(),
            ]
        );
    }

    #[test]
    fn query_param_decodes_escapes() {
        assert_eq!(
            query_param("/settings?section=time%2Dlimits", "section").as_deref(),
            Some("time-limits")
        );
        assert_eq!(
            query_param("/settings?section=a+b%20c", "section").as_deref(),
            Some("a b c")
        );
        let nav = Navigator::restore("http://127.0.0.1:5000/settings?section=time%2Dlimits", None);
        assert_eq!(nav.active(), SectionId::TimeLimits);
    }

    #[test]
    fn with_query_param_encodes_value() {
        let location = with_query_param("/settings", "section", "a b&c=d");
        assert_eq!(location, "/settings?section=a+b%26c%3Dd");
        assert_eq!(query_param(&location, "section").as_deref(), Some("a b&c=d"));
    }

    #[test]
    fn history_is_bounded() {
        let mut nav = Navigator::restore("/settings", None);
        for i in 0..(HISTORY_LIMIT * 3) {
            nav.show_section(if i % 2 == 0 {
                SectionId::TimeLimits
            } else {
                SectionId::Classifications
            });
        }
        assert_eq!(nav.history().len(), HISTORY_LIMIT);
        assert_eq!(nav.location(), "/settings?section=classifications");
    }
}
