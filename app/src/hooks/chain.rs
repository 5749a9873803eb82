use js_sys::{Array, Function, Object, Promise, Reflect};
use quizstake_engine::Stage;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::{CHAIN_ID, GAME_CONTRACT, RPC_URL, TOKEN_CONTRACT};

// Contract entry points. The selector is derived from the Solidity
// signature at call time, so these stay in sync with the ABI by name.
const CREATE_GAME_SIG: &str = "createGame(bytes32)";
const JOIN_GAME_SIG: &str = "joinGame(uint256,string,bytes)";
const SUBMIT_STAGE_SIG: &str = "submitStageResult(uint256,uint8,uint8)";
const CLAIM_REFUND_SIG: &str = "claimRefund(uint256)";
const BALANCE_OF_SIG: &str = "balanceOf(address)";

/// QST uses 18 decimals on chain; balances are shown in whole tokens.
const TOKEN_DECIMALS_DIVISOR: u128 = 1_000_000_000_000_000_000;

#[derive(Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Deserialize, Debug)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Read the player's QST balance through the public RPC endpoint.
pub async fn fetch_token_balance(address: &str) -> Result<u64, String> {
    let client = reqwest::Client::new();

    let calldata = format!("0x{}", encode_hex(&encode_balance_of(address)?));
    let request = RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "eth_call",
        params: vec![
            serde_json::json!({
                "to": TOKEN_CONTRACT,
                "data": calldata,
            }),
            serde_json::json!("latest"),
        ],
    };

    let response = client
        .post(RPC_URL)
        .json(&request)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let rpc_response: RpcResponse<String> = response
        .json()
        .await
        .map_err(|e| e.to_string())?;

    if let Some(error) = rpc_response.error {
        return Err(error.message);
    }

    let result = rpc_response
        .result
        .ok_or_else(|| "No balance returned".to_string())?;
    let raw = u128::from_str_radix(result.trim_start_matches("0x"), 16)
        .map_err(|e| e.to_string())?;
    Ok((raw / TOKEN_DECIMALS_DIVISOR) as u64)
}

/// Register a new game under the creator's basename node.
#[cfg(feature = "web")]
pub async fn create_game_transaction(from: &str, basename: &str) -> Result<String, String> {
    let node = namehash(basename);
    send_transaction(from, &encode_create_game(&node)).await
}

/// Stake into a game using the join signature issued by the API.
#[cfg(feature = "web")]
pub async fn join_game_transaction(
    from: &str,
    game_id: &str,
    basename: &str,
    signature: &str,
) -> Result<String, String> {
    let game_id = parse_game_id(game_id)?;
    let signature = decode_hex(signature)?;
    send_transaction(from, &encode_join_game(game_id, basename, &signature)).await
}

/// Record a stage result on chain. Best-effort: callers treat failure as a
/// warning, never as a gameplay error.
#[cfg(feature = "web")]
pub async fn submit_stage_result_transaction(
    from: &str,
    game_id: &str,
    stage: Stage,
    score: u8,
) -> Result<String, String> {
    let game_id = parse_game_id(game_id)?;
    send_transaction(from, &encode_submit_stage_result(game_id, stage, score)).await
}

/// Claim the stake refund owed for a finished session.
#[cfg(feature = "web")]
pub async fn claim_refund_transaction(from: &str, game_id: &str) -> Result<String, String> {
    let game_id = parse_game_id(game_id)?;
    send_transaction(from, &encode_claim_refund(game_id)).await
}

/// Request wallet accounts from the injected EVM provider and make sure it
/// is pointed at the right chain.
#[cfg(feature = "web")]
pub async fn connect_wallet() -> Result<String, String> {
    let accounts = request("eth_requestAccounts", Array::new().into()).await?;
    let accounts: Array = accounts.dyn_into().map_err(|_| "Accounts not an array")?;
    let address = accounts
        .get(0)
        .as_string()
        .ok_or_else(|| "No account returned".to_string())?;

    let switch = Object::new();
    let chain_id = format!("0x{CHAIN_ID:x}");
    Reflect::set(
        &switch,
        &JsValue::from_str("chainId"),
        &JsValue::from_str(&chain_id),
    )
    .map_err(|_| "Failed to set chainId")?;
    let params = Array::new();
    params.push(&switch.into());
    if let Err(e) = request("wallet_switchEthereumChain", params.into()).await {
        tracing::warn!("Chain switch declined: {}", e);
    }

    Ok(address)
}

#[cfg(feature = "web")]
async fn send_transaction(from: &str, calldata: &[u8]) -> Result<String, String> {
    let tx = Object::new();
    Reflect::set(&tx, &JsValue::from_str("from"), &JsValue::from_str(from))
        .map_err(|_| "Failed to set from")?;
    Reflect::set(&tx, &JsValue::from_str("to"), &JsValue::from_str(GAME_CONTRACT))
        .map_err(|_| "Failed to set to")?;
    let data = format!("0x{}", encode_hex(calldata));
    Reflect::set(&tx, &JsValue::from_str("data"), &JsValue::from_str(&data))
        .map_err(|_| "Failed to set data")?;

    let params = Array::new();
    params.push(&tx.into());

    let result = request("eth_sendTransaction", params.into()).await?;
    result
        .as_string()
        .ok_or_else(|| "Transaction hash not a string".to_string())
}

#[cfg(feature = "web")]
async fn request(method: &str, params: JsValue) -> Result<JsValue, String> {
    let ethereum = provider()?;

    let request_fn = Reflect::get(&ethereum, &JsValue::from_str("request"))
        .map_err(|_| "No request method")?;
    let request_fn: Function = request_fn
        .dyn_into()
        .map_err(|_| "request is not a function")?;

    let args = Object::new();
    Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
        .map_err(|_| "Failed to set method")?;
    Reflect::set(&args, &JsValue::from_str("params"), &params)
        .map_err(|_| "Failed to set params")?;

    let promise = request_fn
        .call1(&ethereum, &args.into())
        .map_err(|e| format!("Request call failed: {:?}", e))?;
    let promise: Promise = promise.dyn_into().map_err(|_| "Not a promise")?;

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| format!("Request rejected: {:?}", e))
}

#[cfg(feature = "web")]
fn provider() -> Result<JsValue, String> {
    let window = web_sys::window().ok_or("No window")?;

    let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
        .map_err(|_| "Wallet provider not found")?;

    if ethereum.is_undefined() {
        return Err("No wallet extension detected. Please install one and refresh.".to_string());
    }

    Ok(ethereum)
}

#[cfg(not(feature = "web"))]
pub async fn connect_wallet() -> Result<String, String> {
    Err("Wallet only available in web mode".to_string())
}

#[cfg(not(feature = "web"))]
pub async fn create_game_transaction(_from: &str, _basename: &str) -> Result<String, String> {
    Err("Transactions only available in web mode".to_string())
}

#[cfg(not(feature = "web"))]
pub async fn join_game_transaction(
    _from: &str,
    _game_id: &str,
    _basename: &str,
    _signature: &str,
) -> Result<String, String> {
    Err("Transactions only available in web mode".to_string())
}

#[cfg(not(feature = "web"))]
pub async fn submit_stage_result_transaction(
    _from: &str,
    _game_id: &str,
    _stage: Stage,
    _score: u8,
) -> Result<String, String> {
    Err("Transactions only available in web mode".to_string())
}

#[cfg(not(feature = "web"))]
pub async fn claim_refund_transaction(_from: &str, _game_id: &str) -> Result<String, String> {
    Err("Transactions only available in web mode".to_string())
}

fn parse_game_id(game_id: &str) -> Result<u64, String> {
    game_id
        .parse::<u64>()
        .map_err(|_| format!("Invalid game id: {game_id}"))
}

fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

fn encode_create_game(basename_node: &[u8; 32]) -> Vec<u8> {
    let mut data = selector(CREATE_GAME_SIG).to_vec();
    data.extend_from_slice(basename_node);
    data
}

fn encode_join_game(game_id: u64, basename: &str, signature: &[u8]) -> Vec<u8> {
    let name_tail = dynamic_tail(basename.as_bytes());
    let mut data = selector(JOIN_GAME_SIG).to_vec();
    push_uint(&mut data, game_id);
    // Three head words precede the dynamic section.
    push_uint(&mut data, 96);
    push_uint(&mut data, 96 + name_tail.len() as u64);
    data.extend_from_slice(&name_tail);
    data.extend_from_slice(&dynamic_tail(signature));
    data
}

fn encode_submit_stage_result(game_id: u64, stage: Stage, score: u8) -> Vec<u8> {
    let mut data = selector(SUBMIT_STAGE_SIG).to_vec();
    push_uint(&mut data, game_id);
    push_uint(&mut data, stage.number() as u64);
    push_uint(&mut data, score as u64);
    data
}

fn encode_claim_refund(game_id: u64) -> Vec<u8> {
    let mut data = selector(CLAIM_REFUND_SIG).to_vec();
    push_uint(&mut data, game_id);
    data
}

fn encode_balance_of(address: &str) -> Result<Vec<u8>, String> {
    let address_bytes = decode_hex(address)?;
    if address_bytes.len() != 20 {
        return Err(format!("Invalid address: {address}"));
    }
    let mut data = selector(BALANCE_OF_SIG).to_vec();
    // Addresses are left-padded into a full word.
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(&address_bytes);
    Ok(data)
}

fn push_uint(data: &mut Vec<u8>, value: u64) {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    data.extend_from_slice(&word);
}

/// Length-prefixed dynamic data, padded to a 32-byte boundary.
fn dynamic_tail(bytes: &[u8]) -> Vec<u8> {
    let padded = bytes.len().div_ceil(32) * 32;
    let mut tail = Vec::with_capacity(32 + padded);
    push_uint(&mut tail, bytes.len() as u64);
    tail.extend_from_slice(bytes);
    tail.resize(32 + padded, 0);
    tail
}

/// ENS namehash of a basename like "alice.base.eth".
pub fn namehash(name: &str) -> [u8; 32] {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = Keccak256::digest(label.as_bytes());
        let mut hasher = Keccak256::new();
        hasher.update(node);
        hasher.update(label_hash);
        node.copy_from_slice(&hasher.finalize());
    }
    node
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub(crate) fn decode_hex(value: &str) -> Result<Vec<u8>, String> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    if value.len() % 2 != 0 {
        return Err("Odd-length hex string".to_string());
    }
    (0..value.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&value[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matches_known_vector() {
        // keccak256("transfer(address,uint256)") starts with a9059cbb.
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn namehash_matches_ens_vectors() {
        assert_eq!(namehash(""), [0u8; 32]);
        assert_eq!(
            encode_hex(&namehash("eth")),
            "93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
    }

    #[test]
    fn join_game_calldata_lays_out_dynamic_args() {
        let data = encode_join_game(7, "alice.base.eth", &[0xab; 65]);
        // selector + 3 head words + basename tail (2 words) + signature tail (4 words)
        assert_eq!(data.len(), 4 + 3 * 32 + 2 * 32 + 4 * 32);
        // game id in the first head word
        assert_eq!(data[4 + 31], 7);
        // basename offset points past the head
        assert_eq!(data[4 + 32 + 31], 96);
        // basename length word
        assert_eq!(data[4 + 96 + 31], 14);
        // signature length word sits after the basename tail
        assert_eq!(data[4 + 96 + 64 + 31], 65);
    }

    #[test]
    fn hex_round_trips() {
        let bytes = vec![0x00, 0x1f, 0xa9, 0xff];
        assert_eq!(decode_hex(&encode_hex(&bytes)).unwrap(), bytes);
        assert_eq!(decode_hex("0x001fa9ff").unwrap(), bytes);
        assert!(decode_hex("0xabc").is_err());
    }
}
