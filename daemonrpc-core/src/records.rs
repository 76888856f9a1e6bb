//! Daemon result records
//!
//! Plain decode targets for the results of common wallet and node methods
//! (`validateaddress`, `listunspent`, `getwalletinfo`,
//! `getrawtransaction`/`decoderawtransaction`, `signrawtransaction`). Field
//! names follow the daemon's JSON exactly. Every field defaults, so a daemon
//! that omits optional or confidential-only fields still decodes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of `validateaddress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatedAddress {
    /// Whether the address is valid; when false nothing else is populated
    pub isvalid: bool,
    /// The address that was validated
    pub address: String,
    /// Hex encoded output script for the address
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    /// Whether the wallet holds the key
    pub ismine: bool,
    /// Whether the address is watch-only
    pub iswatchonly: bool,
    /// Whether the address is a script address
    pub isscript: bool,
    /// Hex encoded public key
    pub pubkey: String,
    /// Whether the public key is compressed
    pub iscompressed: bool,
    /// Deprecated account label, "" for the default account
    pub account: String,
    /// Blinding public key, "" if none
    pub confidential_key: String,
    /// The address without its blinding key
    pub unconfidential: String,
    /// Confidential form of the address
    pub confidential: String,
    /// HD key path, when known
    pub hdkeypath: String,
    /// Hash160 of the HD master public key
    pub hdmasterkeyid: String,
}

/// One entry of `listunspent`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unspent {
    /// Id of the transaction holding the output
    pub txid: String,
    /// Output index
    pub vout: i64,
    /// Address the output pays to
    pub address: String,
    /// Deprecated account label
    pub account: String,
    /// Hex encoded output script
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    /// Output value in coins
    pub amount: f64,
    /// Asset id of the output (confidential-asset chains)
    pub asset: String,
    /// Asset commitment of the output
    pub assetcommitment: String,
    /// Number of confirmations
    pub confirmations: i64,
    /// Value commitment of the output
    #[serde(rename = "serValue")]
    pub ser_value: String,
    /// Blinding factor, "" for explicit outputs
    pub blinder: String,
    /// Redeem script for P2SH outputs
    #[serde(rename = "redeemScript")]
    pub redeem_script: String,
    /// Whether the wallet can spend the output
    pub spendable: bool,
    /// Whether the wallet knows how to spend it, ignoring keys
    pub solvable: bool,
}

/// Result of `listunspent`
pub type UnspentList = Vec<Unspent>;

/// Per-asset balance, keyed by asset label or id
pub type Balance = HashMap<String, f64>;

/// Result of `getwalletinfo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    /// Wallet format version
    pub walletversion: i64,
    /// Confirmed balance per asset
    pub balance: Balance,
    /// Unconfirmed balance per asset
    pub unconfirmed_balance: Balance,
    /// Immature coinbase balance per asset
    pub immature_balance: Balance,
    /// Number of wallet transactions
    pub txcount: i64,
    /// Unix time of the oldest pre-generated key
    pub keypoololdest: i64,
    /// Number of pre-generated keys
    pub keypoolsize: i64,
    /// Unix time until which the wallet is unlocked, 0 when locked
    pub unlocked_until: i64,
    /// Fee rate setting per kB
    pub paytxfee: f64,
    /// Hash160 of the HD master public key
    pub hdmasterkeyid: String,
}

/// Input unlocking script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSig {
    /// Script in assembly form
    pub asm: String,
    /// Hex encoded script
    pub hex: String,
}

/// Output locking script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptPubKey {
    /// Script in assembly form
    pub asm: String,
    /// Hex encoded script
    pub hex: String,
    /// Number of signatures required
    #[serde(rename = "reqSigs")]
    pub req_sigs: i64,
    /// Script type, such as `pubkeyhash`
    #[serde(rename = "type")]
    pub kind: String,
    /// Addresses the script pays to
    pub addresses: Vec<String>,
}

/// Transaction input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vin {
    /// Id of the transaction being spent
    pub txid: String,
    /// Index of the output being spent
    pub vout: i64,
    /// Unlocking script
    #[serde(rename = "scriptSig")]
    pub script_sig: ScriptSig,
    /// Witness stack items, hex encoded
    pub txinwitness: Vec<String>,
    /// Input sequence number
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vout {
    /// Output value in coins
    pub value: f64,
    /// Output index
    pub n: i64,
    /// Asset id of the output
    pub asset: String,
    /// Asset tag of the output
    pub assettag: String,
    /// Locking script
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

/// Verbose result of `getrawtransaction` / `decoderawtransaction`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTransaction {
    /// Transaction id
    pub txid: String,
    /// Witness transaction id
    pub hash: String,
    /// Serialized size in bytes
    pub size: i64,
    /// Virtual size in vbytes
    pub vsize: i64,
    /// Transaction version
    pub version: i64,
    /// Lock time
    pub locktime: i64,
    /// Fee paid, on chains that report it
    pub fee: f64,
    /// Inputs
    pub vin: Vec<Vin>,
    /// Outputs
    pub vout: Vec<Vout>,
}

/// Result of `signrawtransaction`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignedTransaction {
    /// Hex encoded transaction with any signatures added
    pub hex: String,
    /// Whether every input is now fully signed
    pub complete: bool,
}
