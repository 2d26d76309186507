use clap::Parser;
use mento_types::{ReserveAddress, ReserveTargets, TargetsError};
use url::Url;

const DEFAULT_RESERVE_ADDRESSES: [&str; 2] = [
    "ethereum:0xd0697f70E79476195B742d5aFAb14BE50f98CC1E",
    "celo:0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9",
];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ReserveCli {
    /// API key sent to the portfolio aggregation API
    #[arg(long, env = "ZAPPER_API_KEY", hide_env_values = true)]
    pub zapper_api_key: String,

    /// Base URL of the portfolio aggregation API
    #[arg(long, env = "ZAPPER_API_URL", default_value = mento_zapper::ZAPPER_API_BASE)]
    pub zapper_api_url: Url,

    /// Reserve addresses to track, as comma separated `<chain>:<address>` entries
    #[arg(
        long,
        env = "RESERVE_ADDRESSES",
        value_delimiter = ',',
        default_values = DEFAULT_RESERVE_ADDRESSES
    )]
    pub reserve_addresses: Vec<ReserveAddress>,

    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Seconds before an in-flight request is aborted
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,
}

impl ReserveCli {
    pub fn targets(&self) -> Result<ReserveTargets, TargetsError> {
        ReserveTargets::new(self.reserve_addresses.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mento_types::Chain;

    fn parse(args: &[&str]) -> ReserveCli {
        let mut argv = vec!["mento-reserve-api", "--zapper-api-key", "secret"];
        argv.extend_from_slice(args);
        ReserveCli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_track_both_reserves() {
        let cli = parse(&[]);

        assert_eq!(cli.api_port, 8080);
        assert_eq!(cli.request_timeout_secs, 30);
        assert_eq!(cli.zapper_api_url.as_str(), "https://public.zapper.xyz/");
        assert_eq!(cli.targets().unwrap(), ReserveTargets::default());
    }

    #[test]
    fn test_custom_reserve_addresses() {
        let cli = parse(&[
            "--reserve-addresses",
            "CELO:0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9",
        ]);

        let targets = cli.targets().unwrap();
        assert_eq!(targets.addresses.len(), 1);
        assert_eq!(targets.addresses[0].chain, Chain::Celo);
        assert_eq!(targets.chain_ids(), vec![42220]);
    }

    #[test]
    fn test_unknown_chain_is_rejected_at_parse_time() {
        let result = ReserveCli::try_parse_from([
            "mento-reserve-api",
            "--zapper-api-key",
            "secret",
            "--reserve-addresses",
            "solana:0x9380fA34Fd9e4Fd14c06305fd7B6199089eD4eb9",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_address_is_rejected_by_validation() {
        let cli = parse(&["--reserve-addresses", "celo:0x1234"]);
        assert!(matches!(
            cli.targets(),
            Err(TargetsError::MalformedAddress(_))
        ));
    }
}
