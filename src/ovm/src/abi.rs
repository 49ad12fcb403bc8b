//! Calldata layouts of the OVM contract entrypoints.

use alloy_primitives::{Address as AbiAddress, U256 as AbiU256};
use alloy_sol_types::sol;
use common::{u256_to_be_bytes, Address, U256};

sol! {
    /// A transaction as the execution manager runs it.
    #[derive(Debug, PartialEq, Eq)]
    struct OvmTransaction {
        uint256 timestamp;
        uint256 blockNumber;
        uint8 l1QueueOrigin;
        address l1TxOrigin;
        address entrypoint;
        uint256 gasLimit;
        bytes data;
    }

    /// `OVM_ExecutionManager.run`
    #[derive(Debug, PartialEq, Eq)]
    function run(OvmTransaction _transaction, address _ovmStateManager) external;

    /// `mockOVM_ECDSAContractAccount.kall`
    #[derive(Debug, PartialEq, Eq)]
    function kall(uint256 _gasLimit, address _to, bytes _data) external;
}

pub(crate) fn to_abi_u256(value: &U256) -> AbiU256 {
    AbiU256::from_be_bytes(u256_to_be_bytes(value))
}

pub(crate) fn to_abi_address(address: &Address) -> AbiAddress {
    AbiAddress::from(address.0)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolCall;
    use common::{keccak, Address, U256};

    use super::{kallCall, runCall, to_abi_address, to_abi_u256};

    #[test]
    fn selectors_work() {
        let run = keccak("run((uint256,uint256,uint8,address,address,uint256,bytes),address)");
        assert_eq!(runCall::SELECTOR, run.as_bytes()[..4]);
        let kall = keccak("kall(uint256,address,bytes)");
        assert_eq!(kallCall::SELECTOR, kall.as_bytes()[..4]);
    }

    #[test]
    fn conversions_work() {
        let value = U256::from_dec_str("123456789012345678901234567890").unwrap();
        assert_eq!(to_abi_u256(&value).to_string(), "123456789012345678901234567890");
        let address = Address::repeat_byte(0xab);
        assert_eq!(to_abi_address(&address).as_slice(), address.as_bytes());
    }
}
