//! Cross-network balance aggregation

use std::time::Duration;

use ethers_core::types::U256;
use futures::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::network::NetworkDescriptor;
use crate::price::PriceOracle;
use crate::provider::ChainReader;
use crate::wallet::Wallet;

/// Balance of one network, scaled for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub full_name: String,
    pub ticker: String,
    pub icon_path: String,
    pub amount_crypto: String,
    pub amount_usd: String,
}

/// One entry of a cross-network transaction history.
///
/// History aggregation shares the per-network fan-out contract of balances
/// but is not implemented yet; see `Web3Service::get_transactions_all_networks`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionHistory {
    pub asset_name: String,
    pub asset_image_path: String,
    pub asset_ticker: String,
    pub hash: String,
    pub amount_crypto: String,
}

/// Tuning knobs for the balance fan-out.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Deadline applied to each RPC balance query individually.
    pub rpc_timeout: Duration,
    /// Deadline applied to each price-oracle lookup individually.
    pub price_timeout: Duration,
    /// How many networks are queried concurrently.
    pub max_in_flight: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            rpc_timeout: Duration::from_secs(10),
            price_timeout: Duration::from_secs(10),
            max_in_flight: 8,
        }
    }
}

/// Fan out across `networks`, joining results in registry order.
///
/// Per-network failures and unimplemented families are logged and omitted;
/// the aggregate itself always resolves.
pub(super) async fn aggregate(
    networks: &[NetworkDescriptor],
    wallet: &Wallet,
    reader: &dyn ChainReader,
    oracle: &dyn PriceOracle,
    config: &AggregatorConfig,
) -> Vec<Balance> {
    let results: Vec<Option<Balance>> = stream::iter(networks)
        .map(|network| query_network(network, wallet, reader, oracle, config))
        .buffered(config.max_in_flight.max(1))
        .collect()
        .await;

    results.into_iter().flatten().collect()
}

async fn query_network(
    network: &NetworkDescriptor,
    wallet: &Wallet,
    reader: &dyn ChainReader,
    oracle: &dyn PriceOracle,
    config: &AggregatorConfig,
) -> Option<Balance> {
    let family = match network.family() {
        Some(family) => family,
        None => {
            warn!(ticker = %network.ticker, "no chain family mapping; omitting network");
            return None;
        }
    };
    if !reader.supports(family) {
        debug!(ticker = %network.ticker, "balance path not implemented for family; skipping");
        return None;
    }

    let address = match wallet.seed_loop.address_for_family(family) {
        Ok(address) => address,
        Err(e) => {
            warn!(ticker = %network.ticker, error = %e, "address derivation failed");
            return None;
        }
    };

    let raw = match timeout(config.rpc_timeout, reader.native_balance(network, &address)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            warn!(ticker = %network.ticker, error = %e, "balance query failed");
            return None;
        }
        Err(_) => {
            warn!(ticker = %network.ticker, "balance query timed out");
            return None;
        }
    };
    let amount = scale_to_display(raw, family.base_unit_decimals());

    let price = match timeout(config.price_timeout, oracle.usd_price(&network.coingecko_id)).await {
        Ok(Ok(price)) => price,
        Ok(Err(e)) => {
            warn!(ticker = %network.ticker, error = %e, "price lookup failed");
            return None;
        }
        Err(_) => {
            warn!(ticker = %network.ticker, "price lookup timed out");
            return None;
        }
    };

    Some(Balance {
        full_name: network.full_name.clone(),
        ticker: network.ticker.clone(),
        icon_path: network.icon_path.clone(),
        amount_crypto: amount.to_string(),
        amount_usd: (price * amount).to_string(),
    })
}

/// Scale a raw smallest-unit balance to a display amount with two decimal
/// places: integer-divide down to hundredths of a unit, then divide by 100.
fn scale_to_display(raw: U256, decimals: u32) -> f64 {
    let divisor = U256::exp10(decimals.saturating_sub(2) as usize);
    let hundredths = (raw / divisor).min(U256::from(u128::MAX));
    hundredths.as_u128() as f64 / 100.0
}
