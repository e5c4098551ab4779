use tendermint::block::header::Version;
use tendermint::block::{Header, Height as BlockHeight};
use tendermint::{account, chain, AppHash, Hash, Time};

use crate::error::Error;

/// Block protocol version reported in generated headers.
pub const BLOCK_PROTOCOL_VERSION: u64 = 11;

/// Builds the header of a locally produced block at `height`, one second after the previous one.
pub fn new_header(chain_id: &str, height: u64) -> Result<Header, Error> {
    let custom = |e: tendermint::Error| Error::Custom {
        reason: e.to_string(),
    };

    let chain_id = chain::Id::try_from(chain_id.to_owned()).map_err(custom)?;
    let block_height = BlockHeight::try_from(height).map_err(custom)?;
    let seconds = i64::try_from(height).map_err(|e| Error::Custom {
        reason: e.to_string(),
    })?;
    let time = Time::from_unix_timestamp(seconds, 0).map_err(custom)?;

    Ok(Header {
        version: Version {
            block: BLOCK_PROTOCOL_VERSION,
            app: 0,
        },
        chain_id,
        height: block_height,
        time,
        last_block_id: None,
        last_commit_hash: None,
        data_hash: None,
        validators_hash: Hash::None,
        next_validators_hash: Hash::None,
        consensus_hash: Hash::None,
        app_hash: AppHash::default(),
        last_results_hash: None,
        evidence_hash: None,
        proposer_address: account::Id::new([0u8; 20]),
    })
}
