//! View state mirrored from the contract.

use serde::Serialize;

use crate::contracts::Candidate;

/// A candidate formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    /// Array index in the contract; the argument to `vote`.
    pub id: u64,
    pub name: String,
    /// Decimal vote count (uint256 does not fit JSON numbers).
    pub vote_count: String,
}

impl CandidateView {
    /// Format contract candidates in index order.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Vec<Self> {
        candidates
            .into_iter()
            .enumerate()
            .map(|(index, c)| Self {
                id: index as u64,
                name: c.name,
                vote_count: c.vote_count.to_string(),
            })
            .collect()
    }
}

/// Everything the voting view shows. Lives for one session only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VotingView {
    pub candidates: Vec<CandidateView>,
    pub is_owner: bool,
    pub voting_start: u64,
    pub voting_end: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub time_left: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_candidate_views_keep_index() {
        let views = CandidateView::from_candidates(vec![
            Candidate { name: "Alice".into(), vote_count: U256::from(3u64) },
            Candidate { name: "Bob".into(), vote_count: U256::MAX },
        ]);

        assert_eq!(views[0].id, 0);
        assert_eq!(views[0].vote_count, "3");
        assert_eq!(views[1].id, 1);
        assert_eq!(views[1].name, "Bob");
        assert_eq!(
            views[1].vote_count,
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }
}
