/// Issue state filter, in the order the buttons are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IssueFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueFilter {
    pub const ALL: [IssueFilter; 3] = [IssueFilter::Open, IssueFilter::Closed, IssueFilter::All];

    /// Value of the `state` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueFilter::Open => "open",
            IssueFilter::Closed => "closed",
            IssueFilter::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IssueFilter::Open => "Open",
            IssueFilter::Closed => "Closed",
            IssueFilter::All => "All",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_order() {
        let states: Vec<_> = IssueFilter::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(states, ["open", "closed", "all"]);
    }

    #[test]
    fn defaults_to_open() {
        assert_eq!(IssueFilter::default(), IssueFilter::Open);
        assert_eq!(IssueFilter::default().as_str(), "open");
    }
}
