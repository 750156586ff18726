/// Solana Explorer links

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerKind {
    Address,
    Tx,
}

impl ExplorerKind {
    fn path(&self) -> &'static str {
        match self {
            ExplorerKind::Address => "address",
            ExplorerKind::Tx => "tx",
        }
    }
}

/// `https://explorer.solana.com/{address|tx}/{value}?cluster={cluster}`
///
/// Mainnet links carry no cluster query.
pub fn explorer_link(kind: ExplorerKind, value: &str, cluster: &str) -> String {
    let base = format!("https://explorer.solana.com/{}/{}", kind.path(), value);
    match cluster.trim() {
        "" | "mainnet" | "mainnet-beta" => base,
        cluster => format!("{}?cluster={}", base, cluster),
    }
}

pub fn address_link(address: &str, cluster: &str) -> String {
    explorer_link(ExplorerKind::Address, address, cluster)
}

pub fn tx_link(signature: &str, cluster: &str) -> String {
    explorer_link(ExplorerKind::Tx, signature, cluster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devnet_links() {
        assert_eq!(
            address_link("Mint111", "devnet"),
            "https://explorer.solana.com/address/Mint111?cluster=devnet"
        );
        assert_eq!(
            tx_link("sig", "testnet"),
            "https://explorer.solana.com/tx/sig?cluster=testnet"
        );
    }

    #[test]
    fn test_mainnet_has_no_query() {
        assert_eq!(
            tx_link("sig", "mainnet-beta"),
            "https://explorer.solana.com/tx/sig"
        );
    }
}
