//! User-facing messages.
//!
//! Contract failures arrive as free-form node error text; the session
//! reports them as one of a fixed set of messages picked by substring.

pub const INVALID_CONTRACT_ADDRESS: &str = "Invalid contract address";
pub const CONNECT_FAILED: &str = "Failed to connect to contract";
pub const LOAD_CANDIDATES_FAILED: &str = "Failed to load candidates";
pub const VERIFY_OWNER_FAILED: &str = "Failed to verify ownership";
pub const LOAD_PERIOD_FAILED: &str = "Failed to load voting period";
pub const EMPTY_CANDIDATE_NAME: &str = "Candidate name cannot be empty";
pub const VOTING_ENDED: &str = "Voting ended";

/// Message for a failed `addCandidate`.
pub fn add_candidate_failure(error_text: &str) -> &'static str {
    if error_text.contains("Only owner") {
        "Only contract owner can add candidates"
    } else {
        "Failed to add candidate"
    }
}

/// Message for a failed `vote`. Patterns are checked in order.
pub fn vote_failure(error_text: &str) -> &'static str {
    if error_text.contains("Voting period") {
        "Voting period has ended"
    } else if error_text.contains("already voted") {
        "You have already voted"
    } else if error_text.contains("Invalid candidate") {
        "Invalid candidate selected"
    } else {
        "Failed to submit vote"
    }
}
