use tracing::debug;

/// Requests that compete for the same piece of state share a class.
/// `find` and `find_by_id` both replace the geometry store, so they are one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestClass {
    Query,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub seq: u64,
    pub class: RequestClass,
}

/// How completions that arrive out of order are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseOrdering {
    /// Only the most recently issued request of a class may change state.
    #[default]
    LatestWins,
    /// Every completion is applied as it arrives, whatever its age.
    Arrival,
}

impl ResponseOrdering {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "latest" | "latest-wins" => Some(Self::LatestWins),
            "arrival" => Some(Self::Arrival),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LatestWins => "latest",
            Self::Arrival => "arrival",
        }
    }
}

#[derive(Debug, Default)]
pub struct Sequencer {
    issued: u64,
    latest_query: u64,
    latest_submit: u64,
}

impl Sequencer {
    pub fn issue(&mut self, class: RequestClass) -> RequestToken {
        self.issued += 1;
        match class {
            RequestClass::Query => self.latest_query = self.issued,
            RequestClass::Submit => self.latest_submit = self.issued,
        }
        debug!(seq = self.issued, ?class, "issued request token");
        RequestToken {
            seq: self.issued,
            class,
        }
    }

    pub const fn latest(&self, class: RequestClass) -> u64 {
        match class {
            RequestClass::Query => self.latest_query,
            RequestClass::Submit => self.latest_submit,
        }
    }

    pub const fn is_latest(&self, token: RequestToken) -> bool {
        token.seq == self.latest(token.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_across_classes() {
        let mut sequencer = Sequencer::default();
        let first = sequencer.issue(RequestClass::Query);
        let submit = sequencer.issue(RequestClass::Submit);
        let second = sequencer.issue(RequestClass::Query);

        assert!(first.seq < submit.seq && submit.seq < second.seq);
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
        assert!(sequencer.is_latest(submit));
    }

    #[test]
    fn ordering_parses_config_values() {
        assert_eq!(ResponseOrdering::parse("Latest"), Some(ResponseOrdering::LatestWins));
        assert_eq!(ResponseOrdering::parse("arrival"), Some(ResponseOrdering::Arrival));
        assert_eq!(ResponseOrdering::parse("random"), None);
    }
}
