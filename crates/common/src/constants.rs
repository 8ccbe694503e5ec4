/// Decimal places of the native coin.
pub const NATIVE_COIN_DECIMALS: u32 = 18;

// Etherscan V2 API supported chain IDs
// Full list at: https://docs.etherscan.io/etherscan-v2/getting-started/supported-chains

/// Ethereum Mainnet chain ID
pub const CHAIN_ID_ETHEREUM: u64 = 1;
/// Sepolia testnet chain ID
pub const CHAIN_ID_SEPOLIA: u64 = 11155111;
/// Polygon Mainnet chain ID
pub const CHAIN_ID_POLYGON: u64 = 137;
/// BSC Mainnet chain ID
pub const CHAIN_ID_BSC: u64 = 56;
/// Arbitrum One chain ID
pub const CHAIN_ID_ARBITRUM: u64 = 42161;
/// Optimism chain ID
pub const CHAIN_ID_OPTIMISM: u64 = 10;
/// Avalanche C-Chain chain ID
pub const CHAIN_ID_AVALANCHE: u64 = 43114;
/// Base chain ID
pub const CHAIN_ID_BASE: u64 = 8453;
/// Linea chain ID
pub const CHAIN_ID_LINEA: u64 = 59144;
/// Scroll chain ID
pub const CHAIN_ID_SCROLL: u64 = 534352;

/// List of all Etherscan V2 API supported chain IDs
pub const ETHERSCAN_SUPPORTED_CHAIN_IDS: [u64; 10] = [
    CHAIN_ID_ETHEREUM,
    CHAIN_ID_SEPOLIA,
    CHAIN_ID_POLYGON,
    CHAIN_ID_BSC,
    CHAIN_ID_ARBITRUM,
    CHAIN_ID_OPTIMISM,
    CHAIN_ID_AVALANCHE,
    CHAIN_ID_BASE,
    CHAIN_ID_LINEA,
    CHAIN_ID_SCROLL,
];
