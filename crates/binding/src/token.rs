//! ERC20 token contract bindings.

use alloy_primitives::keccak256;
use alloy_sol_types::sol;
use std::fmt;

sol! {
    /// ERC20 token interface, including the OpenZeppelin allowance helpers
    /// and an owner-gated `mint`.
    #[sol(rpc)]
    interface IERC20 {
        /// Emitted when tokens are transferred
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Emitted when an allowance is set
        event Approval(
            address indexed owner,
            address indexed spender,
            uint256 value
        );

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Transfer tokens to recipient
        function transfer(address recipient, uint256 amount) external returns (bool);

        /// Mint new tokens to an account
        function mint(address to, uint256 amount) external;

        /// Approve spender to spend tokens
        function approve(address spender, uint256 amount) external returns (bool);

        /// Transfer tokens from sender to recipient (requires allowance)
        function transferFrom(address sender, address recipient, uint256 amount) external returns (bool);

        /// Get allowance granted by owner to spender
        function allowance(address owner, address spender) external view returns (uint256);

        /// Raise the allowance granted to spender
        function increaseAllowance(address spender, uint256 addedValue) external returns (bool);

        /// Lower the allowance granted to spender
        function decreaseAllowance(address spender, uint256 subtractedValue) external returns (bool);
    }
}

/// Whether a function reads state or changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// `view` functions, served by `eth_call`.
    ReadOnly,
    /// `nonpayable` functions, which need a signed transaction.
    StateChanging,
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => f.write_str("view"),
            Self::StateChanging => f.write_str("nonpayable"),
        }
    }
}

/// A single entry of the contract interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub mutability: Mutability,
}

impl FunctionDescriptor {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    /// First four bytes of the keccak256 hash of the signature.
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature().as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    pub const fn is_read_only(&self) -> bool {
        matches!(self.mutability, Mutability::ReadOnly)
    }
}

const fn view(
    name: &'static str,
    inputs: &'static [&'static str],
    outputs: &'static [&'static str],
) -> FunctionDescriptor {
    FunctionDescriptor {
        name,
        inputs,
        outputs,
        mutability: Mutability::ReadOnly,
    }
}

const fn nonpayable(
    name: &'static str,
    inputs: &'static [&'static str],
    outputs: &'static [&'static str],
) -> FunctionDescriptor {
    FunctionDescriptor {
        name,
        inputs,
        outputs,
        mutability: Mutability::StateChanging,
    }
}

/// The ERC20 interface, in declaration order.
pub const ERC20_INTERFACE: &[FunctionDescriptor] = &[
    view("name", &[], &["string"]),
    view("symbol", &[], &["string"]),
    view("decimals", &[], &["uint8"]),
    view("totalSupply", &[], &["uint256"]),
    view("balanceOf", &["address"], &["uint256"]),
    nonpayable("transfer", &["address", "uint256"], &["bool"]),
    nonpayable("mint", &["address", "uint256"], &[]),
    nonpayable("approve", &["address", "uint256"], &["bool"]),
    nonpayable("transferFrom", &["address", "address", "uint256"], &["bool"]),
    view("allowance", &["address", "address"], &["uint256"]),
    nonpayable("increaseAllowance", &["address", "uint256"], &["bool"]),
    nonpayable("decreaseAllowance", &["address", "uint256"], &["bool"]),
];

/// Look up a function of [`ERC20_INTERFACE`] by name.
pub fn find_function(name: &str) -> Option<&'static FunctionDescriptor> {
    ERC20_INTERFACE.iter().find(|f| f.name == name)
}
