//! Proposal domain - what is sent to peers and how replies are judged

pub mod matching;
pub mod response;

pub use matching::MatchStrategy;
pub use response::{ProposalResponse, SUCCESS_STATUS, TransactionProposal};
