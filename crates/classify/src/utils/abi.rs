use alloy::primitives::Selector;
use alloy_dyn_abi::{DynSolCall, DynSolReturns, DynSolType, DynSolValue};
use eyre::{eyre, Result};
use lazy_static::lazy_static;
use sift_common::utils::strings::encode_hex;
use tracing::trace;

/// A well-known function fragment matched structurally against calldata.
#[derive(Debug, Clone)]
pub(crate) struct StandardFragment {
    /// The 4-byte function selector.
    pub selector: [u8; 4],
    /// The canonical signature, for diagnostics.
    pub signature: &'static str,
    /// The declared input types.
    pub inputs: Vec<DynSolType>,
}

lazy_static! {
    /// The fungible-token transfer fragment, `transfer(address,uint256)`.
    pub(crate) static ref ERC20_TRANSFER: StandardFragment = StandardFragment {
        selector: [0xa9, 0x05, 0x9c, 0xbb],
        signature: "transfer(address,uint256)",
        inputs: vec![DynSolType::Address, DynSolType::Uint(256)],
    };

    /// The non-fungible ownership-transfer fragment,
    /// `transferFrom(address,address,uint256)`.
    pub(crate) static ref ERC721_TRANSFER_FROM: StandardFragment = StandardFragment {
        selector: [0x23, 0xb8, 0x72, 0xdd],
        signature: "transferFrom(address,address,uint256)",
        inputs: vec![DynSolType::Address, DynSolType::Address, DynSolType::Uint(256)],
    };
}

impl StandardFragment {
    /// Attempt to decode `calldata` against this fragment. Any mismatch,
    /// selector or argument layout, yields `None`; decode failures never
    /// propagate.
    pub(crate) fn try_match(&self, calldata: &[u8]) -> Option<Vec<DynSolValue>> {
        if calldata.len() < 4 || calldata[..4] != self.selector {
            return None;
        }

        match try_decode(&self.inputs, &calldata[4..]) {
            Ok(values) => Some(values),
            Err(e) => {
                trace!("calldata does not match {}: {}", self.signature, e);
                None
            }
        }
    }
}

/// Attempt to decode the given calldata with the given types.
pub(crate) fn try_decode(inputs: &[DynSolType], byte_args: &[u8]) -> Result<Vec<DynSolValue>> {
    // For non-standard sized calldata that isn't a multiple of 32 bytes,
    // pad it so the decoder sees whole words.
    let padded_args = if !byte_args.is_empty() && byte_args.len() % 32 != 0 {
        let mut padded = byte_args.to_vec();
        padded.extend(vec![0u8; 32 - (byte_args.len() % 32)]);
        padded
    } else {
        byte_args.to_vec()
    };

    let call =
        DynSolCall::new(Selector::default(), inputs.to_vec(), None, DynSolReturns::new(Vec::new()));

    call.abi_decode_input(&padded_args).map_err(|e| eyre!("failed to decode calldata: {e}"))
}

/// The lowercase hex selector (first 4 bytes) of the given calldata, or
/// `None` when the calldata is too short to carry one.
pub(crate) fn selector_hex(calldata: &[u8]) -> Option<String> {
    calldata.get(..4).map(|selector| format!("0x{}", encode_hex(selector)))
}
