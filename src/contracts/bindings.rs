//! ABI bindings for the deployed contracts.

use alloy::sol;

sol! {
    /// Candidate registry with a fixed voting window.
    #[sol(rpc)]
    #[derive(Debug)]
    contract Voting {
        struct Candidate {
            string name;
            uint256 voteCount;
        }

        function votingStart() external view returns (uint256);
        function votingEnd() external view returns (uint256);
        function getCandidates() external view returns (Candidate[] memory);
        function owner() external view returns (address);
        function addCandidate(string memory _name) external;
        function vote(uint256 _candidateIndex) external;
    }
}

sol! {
    /// ERC20-like token minted to the deployer.
    #[sol(rpc)]
    #[derive(Debug)]
    contract FollowToken {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }
}
