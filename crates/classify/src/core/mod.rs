use alloy::primitives::U256;
use alloy_dyn_abi::{DynSolValue, Specifier};
use alloy_json_abi::JsonAbi;
use tracing::{debug, trace};

use crate::{
    error::Error,
    interfaces::{ClassifyArgs, MetaTransaction, TransactionInput},
    utils::{
        abi::{selector_hex, try_decode, ERC20_TRANSFER, ERC721_TRANSFER_FROM},
        coerce::{reconcile_arguments, DEFAULT_NUMERIC_WIDTH},
    },
};
use sift_common::{
    constants::NATIVE_COIN_DECIMALS,
    ether::{
        abi::{AbiSource, EtherscanAbiSource},
        provider::{DecimalSource, RpcDecimalSource},
    },
    utils::{
        strings::decode_hex,
        units::{format_units, parse_wei},
    },
};

/// Classify a transaction using the default collaborators derived from the
/// given arguments: an RPC-backed decimals lookup and, unless disabled, an
/// Etherscan-backed ABI lookup.
pub async fn classify(args: ClassifyArgs) -> Result<TransactionInput, Error> {
    let chain = RpcDecimalSource::new(&args.rpc_url);
    let abi_source = (!args.skip_abi_lookup)
        .then(|| EtherscanAbiSource::new(args.chain_id, &args.etherscan_api_key));

    classify_transaction(
        &args.transaction(),
        &chain,
        abi_source.as_ref().map(|source| source as &dyn AbiSource),
        &args.id,
    )
    .await
}

/// Classify `tx` into exactly one [`TransactionInput`] variant.
///
/// The pipeline is a strictly ordered cascade of decode attempts; the first
/// match wins. Attempts that do not match fall through silently, so the call
/// always produces a variant. The one exception is the decimals lookup while
/// confirming a fungible-token transfer: at that point the classification is
/// committed and a lookup failure propagates as
/// [`Error::DecimalsLookup`](crate::error::Error).
pub async fn classify_transaction(
    tx: &MetaTransaction,
    chain: &dyn DecimalSource,
    abi_source: Option<&dyn AbiSource>,
    id: &str,
) -> Result<TransactionInput, Error> {
    // attempt 1: native transfer. Empty or zero-valued calldata cannot call
    // anything.
    if is_zero_calldata(&tx.data) {
        trace!("calldata is empty; classifying as a native transfer");
        let amount = parse_wei(&tx.value).unwrap_or_default();
        return Ok(TransactionInput::TransferFunds {
            id: id.to_string(),
            token: None,
            to: tx.to.clone(),
            amount: format_units(amount, NATIVE_COIN_DECIMALS),
            decimals: NATIVE_COIN_DECIMALS,
        });
    }

    let value = parse_wei(&tx.value).unwrap_or_default();
    let calldata = decode_hex(&tx.data).unwrap_or_default();

    // A token transfer must not simultaneously carry native value; transfer-
    // shaped calls with a nonzero value fall through toward the generic
    // paths. This guards against false positives.
    if value.is_zero() {
        // attempt 2: fungible-token transfer
        if let Some([DynSolValue::Address(recipient), DynSolValue::Uint(amount, _)]) =
            ERC20_TRANSFER.try_match(&calldata).as_deref()
        {
            debug!("calldata matches {}", ERC20_TRANSFER.signature);
            let decimals = chain
                .get_decimals(&tx.to)
                .await
                .map_err(|e| Error::DecimalsLookup(e.to_string()))?;

            return Ok(TransactionInput::TransferFunds {
                id: id.to_string(),
                token: Some(tx.to.clone()),
                to: recipient.to_string(),
                amount: format_units(*amount, decimals),
                decimals,
            });
        }

        // attempt 3: non-fungible ownership transfer
        if let Some(
            [DynSolValue::Address(from), DynSolValue::Address(to), DynSolValue::Uint(token_id, _)],
        ) = ERC721_TRANSFER_FROM.try_match(&calldata).as_deref()
        {
            debug!("calldata matches {}", ERC721_TRANSFER_FROM.signature);
            return Ok(TransactionInput::TransferCollectible {
                id: id.to_string(),
                address: tx.to.clone(),
                token_id: token_id.to_string(),
                to: to.to_string(),
                from: from.to_string(),
            });
        }
    }

    // attempt 4: generic contract call against a fetched interface. A
    // missing or failing source is treated as "no interface available".
    if let Some(source) = abi_source {
        let abi = match source.fetch_abi(&tx.to, &tx.data).await {
            Ok(Some(abi)) if !abi.is_empty() => Some(abi),
            Ok(_) => None,
            Err(e) => {
                debug!("ABI lookup for {} failed: {}", &tx.to, e);
                None
            }
        };

        if let Some(abi) = abi {
            if let Some(input) = decode_contract_call(tx, &abi, &calldata, value, id) {
                return Ok(input);
            }
        }
    }

    // fallback: pass the calldata through untouched
    trace!("no decode attempt matched; classifying as a raw call");
    Ok(TransactionInput::Raw {
        id: id.to_string(),
        to: tx.to.clone(),
        value: value.to_string(),
        data: tx.data.clone(),
    })
}

/// Whether the calldata is empty or parses as the zero value (`""`, `"0x"`,
/// `"0x00…"`).
fn is_zero_calldata(data: &str) -> bool {
    data.trim().trim_start_matches("0x").chars().all(|c| c == '0')
}

/// Attempt to decode calldata against a fetched interface description. Any
/// mismatch, an unparseable interface, an unknown selector, or an argument
/// layout the declared types reject, yields `None` so the pipeline falls
/// through to the raw variant.
fn decode_contract_call(
    tx: &MetaTransaction,
    abi: &str,
    calldata: &[u8],
    value: U256,
    id: &str,
) -> Option<TransactionInput> {
    let selector = selector_hex(calldata)?;

    let json_abi = match JsonAbi::from_json_str(abi) {
        Ok(json_abi) => json_abi,
        Err(e) => {
            debug!("fetched interface is not a valid JSON ABI: {}", e);
            return None;
        }
    };

    let function = json_abi
        .functions()
        .find(|function| function.selector().to_string().to_lowercase() == selector)?;
    trace!("selector {} matches {}", selector, function.signature());

    let inputs = function
        .inputs
        .iter()
        .map(|param| param.resolve())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    let values = match try_decode(&inputs, &calldata[4..]) {
        Ok(values) => values,
        Err(e) => {
            trace!("calldata does not decode as {}: {}", function.signature(), e);
            return None;
        }
    };

    Some(TransactionInput::CallContract {
        id: id.to_string(),
        to: tx.to.clone(),
        value: value.to_string(),
        abi: abi.to_string(),
        function_signature: function.signature(),
        input_values: reconcile_arguments(&function.inputs, &values, DEFAULT_NUMERIC_WIDTH),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eyre::{eyre, Result};
    use serde_json::{json, Value};
    use sift_common::utils::strings::encode_hex;

    const TOKEN: &str = "0x1111111111111111111111111111111111111111";
    const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";
    const SENDER: &str = "0x3333333333333333333333333333333333333333";

    struct StaticDecimals(u32);

    #[async_trait]
    impl DecimalSource for StaticDecimals {
        async fn get_decimals(&self, _token: &str) -> Result<u32> {
            Ok(self.0)
        }
    }

    struct FailingDecimals;

    #[async_trait]
    impl DecimalSource for FailingDecimals {
        async fn get_decimals(&self, token: &str) -> Result<u32> {
            Err(eyre!("no node reachable for {token}"))
        }
    }

    struct StaticAbi(String);

    #[async_trait]
    impl AbiSource for StaticAbi {
        async fn fetch_abi(&self, _address: &str, _calldata: &str) -> Result<Option<String>> {
            Ok(Some(self.0.clone()))
        }
    }

    struct FailingAbi;

    #[async_trait]
    impl AbiSource for FailingAbi {
        async fn fetch_abi(&self, _address: &str, _calldata: &str) -> Result<Option<String>> {
            Err(eyre!("service unavailable"))
        }
    }

    fn transaction(to: &str, value: &str, data: &str) -> MetaTransaction {
        MetaTransaction {
            to: to.to_string(),
            value: value.to_string(),
            data: data.to_string(),
            operation: Default::default(),
        }
    }

    /// Calldata for `transfer(RECIPIENT, 1_000_000)`.
    fn erc20_transfer_calldata() -> String {
        concat!(
            "0xa9059cbb",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "00000000000000000000000000000000000000000000000000000000000f4240",
        )
        .to_string()
    }

    /// Calldata for `transferFrom(SENDER, RECIPIENT, 42)`.
    fn erc721_transfer_calldata() -> String {
        concat!(
            "0x23b872dd",
            "0000000000000000000000003333333333333333333333333333333333333333",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "000000000000000000000000000000000000000000000000000000000000002a",
        )
        .to_string()
    }

    /// Builds calldata for the given function by encoding `args` behind its
    /// selector.
    fn encode_call(abi: &str, name: &str, args: Vec<DynSolValue>) -> String {
        let json_abi = JsonAbi::from_json_str(abi).expect("should parse abi");
        let function = &json_abi.function(name).expect("function should exist")[0];

        let mut calldata = function.selector().to_vec();
        calldata.extend(DynSolValue::Tuple(args).abi_encode_params());
        format!("0x{}", encode_hex(&calldata))
    }

    #[tokio::test]
    async fn test_empty_calldata_is_native_transfer() {
        let tx = transaction(RECIPIENT, "1000000000000000000", "0x");
        let result = classify_transaction(&tx, &StaticDecimals(18), None, "")
            .await
            .expect("should classify");

        assert_eq!(
            result,
            TransactionInput::TransferFunds {
                id: String::new(),
                token: None,
                to: RECIPIENT.to_string(),
                amount: "1.0".to_string(),
                decimals: 18,
            }
        );
    }

    #[tokio::test]
    async fn test_zero_calldata_is_native_transfer() {
        let tx = transaction(RECIPIENT, "1500000000000000000", "0x0000");
        let result = classify_transaction(&tx, &StaticDecimals(18), None, "")
            .await
            .expect("should classify");

        match result {
            TransactionInput::TransferFunds { token, amount, decimals, .. } => {
                assert_eq!(token, None);
                assert_eq!(amount, "1.5");
                assert_eq!(decimals, 18);
            }
            other => panic!("expected transferFunds, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_erc20_transfer() {
        let tx = transaction(TOKEN, "0", &erc20_transfer_calldata());
        let result = classify_transaction(&tx, &StaticDecimals(6), None, "token-tx")
            .await
            .expect("should classify");

        assert_eq!(
            result,
            TransactionInput::TransferFunds {
                id: "token-tx".to_string(),
                token: Some(TOKEN.to_string()),
                to: RECIPIENT.to_string(),
                amount: "1.0".to_string(),
                decimals: 6,
            }
        );
    }

    #[tokio::test]
    async fn test_erc20_transfer_with_value_falls_through() {
        let tx = transaction(TOKEN, "1", &erc20_transfer_calldata());
        let result = classify_transaction(&tx, &StaticDecimals(6), None, "")
            .await
            .expect("should classify");

        // the zero-value guard rejects the token-transfer classification
        assert_eq!(
            result,
            TransactionInput::Raw {
                id: String::new(),
                to: TOKEN.to_string(),
                value: "1".to_string(),
                data: erc20_transfer_calldata(),
            }
        );
    }

    #[tokio::test]
    async fn test_erc721_transfer() {
        let tx = transaction(TOKEN, "0", &erc721_transfer_calldata());
        let result = classify_transaction(&tx, &StaticDecimals(18), None, "")
            .await
            .expect("should classify");

        assert_eq!(
            result,
            TransactionInput::TransferCollectible {
                id: String::new(),
                address: TOKEN.to_string(),
                token_id: "42".to_string(),
                to: RECIPIENT.to_string(),
                from: SENDER.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_erc721_transfer_with_value_falls_through() {
        let tx = transaction(TOKEN, "0x05", &erc721_transfer_calldata());
        let result = classify_transaction(&tx, &StaticDecimals(18), None, "")
            .await
            .expect("should classify");

        match result {
            TransactionInput::Raw { value, data, .. } => {
                assert_eq!(value, "5");
                assert_eq!(data, erc721_transfer_calldata());
            }
            other => panic!("expected raw, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decimals_lookup_failure_propagates() {
        let tx = transaction(TOKEN, "0", &erc20_transfer_calldata());
        let result = classify_transaction(&tx, &FailingDecimals, None, "").await;

        assert!(matches!(result, Err(Error::DecimalsLookup(_))));
    }

    const CONFIGURE_ABI: &str = r#"[{
        "type": "function",
        "name": "configure",
        "stateMutability": "nonpayable",
        "inputs": [
            {"name": "operator", "type": "address"},
            {"name": "window", "type": "uint32"},
            {"name": "cap", "type": "uint256"}
        ],
        "outputs": []
    }]"#;

    #[tokio::test]
    async fn test_call_contract_with_fetched_abi() {
        let data = encode_call(
            CONFIGURE_ABI,
            "configure",
            vec![
                DynSolValue::Address(RECIPIENT.parse().unwrap()),
                DynSolValue::Uint(U256::from(300u64), 32),
                DynSolValue::Uint(U256::from(10u64).pow(U256::from(18u64)), 256),
            ],
        );
        let tx = transaction(TOKEN, "5", &data);
        let source = StaticAbi(CONFIGURE_ABI.to_string());

        let result = classify_transaction(&tx, &StaticDecimals(18), Some(&source), "")
            .await
            .expect("should classify");

        match result {
            TransactionInput::CallContract {
                to,
                value,
                abi,
                function_signature,
                input_values,
                ..
            } => {
                assert_eq!(to, TOKEN);
                assert_eq!(value, "5");
                assert_eq!(abi, CONFIGURE_ABI);
                assert_eq!(function_signature, "configure(address,uint32,uint256)");

                // every parameter is named, so the mapping is name-keyed;
                // the uint32 coerces to a number, the uint256 to a string
                assert_eq!(
                    serde_json::to_value(&input_values).expect("should serialize"),
                    json!({
                        "operator": RECIPIENT,
                        "window": 300,
                        "cap": "1000000000000000000",
                    })
                );
            }
            other => panic!("expected callContract, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_contract_unnamed_parameter_uses_indices() {
        let abi = r#"[{
            "type": "function",
            "name": "configure",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "operator", "type": "address"},
                {"name": "", "type": "uint32"},
                {"name": "cap", "type": "uint256"}
            ],
            "outputs": []
        }]"#;
        let data = encode_call(
            abi,
            "configure",
            vec![
                DynSolValue::Address(RECIPIENT.parse().unwrap()),
                DynSolValue::Uint(U256::from(300u64), 32),
                DynSolValue::Uint(U256::from(7u64), 256),
            ],
        );
        let tx = transaction(TOKEN, "0", &data);
        let source = StaticAbi(abi.to_string());

        let result = classify_transaction(&tx, &StaticDecimals(18), Some(&source), "")
            .await
            .expect("should classify");

        match result {
            TransactionInput::CallContract { input_values, .. } => {
                assert_eq!(
                    input_values.keys().collect::<Vec<_>>(),
                    vec!["0", "1", "2"],
                    "unnamed parameters must force positional keys for ALL arguments"
                );
            }
            other => panic!("expected callContract, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_selector_not_in_abi_falls_through_to_raw() {
        // the fetched interface only declares `configure`, but the calldata
        // carries the transfer selector (with nonzero value, so the token
        // path is skipped as well)
        let tx = transaction(TOKEN, "1", &erc20_transfer_calldata());
        let source = StaticAbi(CONFIGURE_ABI.to_string());

        let result = classify_transaction(&tx, &StaticDecimals(18), Some(&source), "")
            .await
            .expect("should classify");

        assert!(matches!(result, TransactionInput::Raw { .. }));
    }

    #[tokio::test]
    async fn test_invalid_abi_falls_through_to_raw() {
        let tx = transaction(TOKEN, "1", &erc20_transfer_calldata());
        let source = StaticAbi("not a json abi".to_string());

        let result = classify_transaction(&tx, &StaticDecimals(18), Some(&source), "")
            .await
            .expect("should classify");

        assert!(matches!(result, TransactionInput::Raw { .. }));
    }

    #[tokio::test]
    async fn test_abi_fetch_failure_falls_through_to_raw() {
        let tx = transaction(TOKEN, "1", &erc20_transfer_calldata());

        let result = classify_transaction(&tx, &StaticDecimals(18), Some(&FailingAbi), "")
            .await
            .expect("should classify");

        assert_eq!(
            result,
            TransactionInput::Raw {
                id: String::new(),
                to: TOKEN.to_string(),
                value: "1".to_string(),
                data: erc20_transfer_calldata(),
            }
        );
    }

    #[tokio::test]
    async fn test_undecodable_calldata_without_abi_source_is_raw() {
        let tx = transaction(TOKEN, "0", "0xdeadbeef");
        let result = classify_transaction(&tx, &StaticDecimals(18), None, "")
            .await
            .expect("should classify");

        match result {
            TransactionInput::Raw { value, data, .. } => {
                assert_eq!(value, "0");
                assert_eq!(data, "0xdeadbeef");
            }
            other => panic!("expected raw, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_classification_is_idempotent() {
        let tx = transaction(TOKEN, "0", &erc20_transfer_calldata());
        let source = StaticAbi(CONFIGURE_ABI.to_string());

        let first = classify_transaction(&tx, &StaticDecimals(6), Some(&source), "id-1")
            .await
            .expect("should classify");
        let second = classify_transaction(&tx, &StaticDecimals(6), Some(&source), "id-1")
            .await
            .expect("should classify");

        assert_eq!(
            serde_json::to_string(&first).expect("should serialize"),
            serde_json::to_string(&second).expect("should serialize")
        );
    }

    #[test]
    fn test_is_zero_calldata() {
        assert!(is_zero_calldata(""));
        assert!(is_zero_calldata("0x"));
        assert!(is_zero_calldata("0x0"));
        assert!(is_zero_calldata("0x00000000"));
        assert!(!is_zero_calldata("0x01"));
        assert!(!is_zero_calldata("0xa9059cbb"));
    }

    #[test]
    fn test_classified_output_serializes_with_type_tag() {
        let input = TransactionInput::Raw {
            id: "1".to_string(),
            to: TOKEN.to_string(),
            value: "0".to_string(),
            data: "0xdeadbeef".to_string(),
        };
        let json: Value = serde_json::to_value(&input).expect("should serialize");
        assert_eq!(json["type"], "raw");
        assert_eq!(json["data"], "0xdeadbeef");
    }
}
