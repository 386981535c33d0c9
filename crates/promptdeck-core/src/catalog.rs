use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Fixed grouping tag for prompts. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Staking/LSDs")]
    StakingLsds,
    #[serde(rename = "Lend & Borrow", alias = "Lending & Borrowing")]
    LendBorrow,
    #[serde(rename = "Trading")]
    Trading,
    #[serde(rename = "Swaps")]
    Swaps,
    #[serde(rename = "Liquidity Pool")]
    LiquidityPool,
    #[serde(rename = "Cross Chain")]
    CrossChain,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::StakingLsds => "Staking/LSDs",
            Category::LendBorrow => "Lend & Borrow",
            Category::Trading => "Trading",
            Category::Swaps => "Swaps",
            Category::LiquidityPool => "Liquidity Pool",
            Category::CrossChain => "Cross Chain",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "staking/lsds" => Some(Category::StakingLsds),
            "lend & borrow" | "lending & borrowing" => Some(Category::LendBorrow),
            "trading" => Some(Category::Trading),
            "swaps" => Some(Category::Swaps),
            "liquidity pool" => Some(Category::LiquidityPool),
            "cross chain" => Some(Category::CrossChain),
            _ => None,
        }
    }

    pub fn all() -> Vec<Category> {
        vec![
            Category::StakingLsds,
            Category::LendBorrow,
            Category::Trading,
            Category::Swaps,
            Category::LiquidityPool,
            Category::CrossChain,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single copy-ready prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub category: Category,
    pub protocol: String,
    pub text: String,
}

impl Prompt {
    pub fn new(id: &str, category: Category, protocol: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            category,
            protocol: protocol.to_string(),
            text: text.to_string(),
        }
    }
}

/// Immutable, ordered collection of prompts with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    prompts: Vec<Prompt>,
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
    Arc::new(Catalog {
        prompts: builtin_prompts(),
    })
});

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and blank fields.
    pub fn new(prompts: Vec<Prompt>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for prompt in &prompts {
            if prompt.id.trim().is_empty() {
                return Err(CatalogError::EmptyField("id"));
            }
            if prompt.text.trim().is_empty() {
                return Err(CatalogError::EmptyText(prompt.id.clone()));
            }
            if !seen.insert(prompt.id.as_str()) {
                return Err(CatalogError::DuplicateId(prompt.id.clone()));
            }
        }
        Ok(Self { prompts })
    }

    /// The catalog shipped with the application, seeded once per process.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Load a catalog from a JSON array of prompts.
    pub async fn load_from_json(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Loading prompt catalog from {}", path.display());

        let content = tokio::fs::read_to_string(path).await?;
        let prompts: Vec<Prompt> = serde_json::from_str(&content)?;
        let catalog = Self::new(prompts)?;

        tracing::info!("Loaded {} prompts", catalog.len());
        Ok(catalog)
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.prompts.iter().filter(|p| p.category == category).count()
    }
}

fn builtin_prompts() -> Vec<Prompt> {
    use Category::*;

    vec![
        Prompt::new("1", StakingLsds, "Lido", "Stake 1 ETH into stETH using Lido on Ethereum"),
        Prompt::new("2", StakingLsds, "Marinade", "Stake 50% of my Solana using Marinade"),
        Prompt::new("3", StakingLsds, "Jito", "Stake 10 SOL using Jito"),
        Prompt::new("4", StakingLsds, "Beets Fi", "Liquid stake 1000 $S with Beets to acquire stS"),
        Prompt::new("5", StakingLsds, "Sanctum", "Swap 0.5 SOL for JupSOL using Sanctum"),
        Prompt::new("6", StakingLsds, "Sky", "Deposit 1000 USDS to mint sUSDS using Sky"),
        Prompt::new(
            "7",
            LendBorrow,
            "Aave",
            "Supply 10 WETH to Aave on Arbitrum, then borrow 2000 USDC.",
        ),
        Prompt::new(
            "8",
            LendBorrow,
            "Spark",
            "Deposit 1 WETH to Spark on Ethereum, then borrow 10% of the deposit in DAI.",
        ),
        Prompt::new(
            "9",
            LendBorrow,
            "Venus",
            "Deposit 1 BNB on Venus, then borrow 200 USDT on BNB Network.",
        ),
        Prompt::new(
            "10",
            LendBorrow,
            "Kamino",
            "Deposit 10 SOL on Kamino, then borrow 1000 USDC on Solana.",
        ),
        Prompt::new(
            "11",
            Trading,
            "GMX",
            "Open a 5x long on ETH with 500 USDC collateral on GMX on Arbitrum",
        ),
        Prompt::new("12", Trading, "Hyperliquid", "Short 0.1 BTC with 3x leverage on Hyperliquid"),
        Prompt::new("13", Swaps, "Jupiter", "Swap 100 USDC for SOL using Jupiter on Solana"),
        Prompt::new("14", Swaps, "Uniswap", "Swap 0.5 ETH for USDC on Uniswap on Base"),
        Prompt::new(
            "15",
            LiquidityPool,
            "Raydium",
            "Add 10 SOL and the matching amount of USDC to the SOL-USDC pool on Raydium",
        ),
        Prompt::new("16", LiquidityPool, "Curve", "Deposit 1000 USDC into the 3pool on Curve on Ethereum"),
        Prompt::new(
            "17",
            CrossChain,
            "Stargate",
            "Bridge 500 USDC from Ethereum to Arbitrum using Stargate",
        ),
        Prompt::new("18", CrossChain, "deBridge", "Bridge 2 SOL from Solana to USDC on Base using deBridge"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.prompts().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), builtin.len());
        for category in Category::all() {
            assert!(builtin.count_in(category) > 0, "no prompts for {}", category);
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(Arc::ptr_eq(&Catalog::builtin(), &Catalog::builtin()));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let prompts = vec![
            Prompt::new("a", Category::Swaps, "Uniswap", "Swap"),
            Prompt::new("a", Category::Trading, "GMX", "Long"),
        ];
        assert!(matches!(Catalog::new(prompts), Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_rejects_blank_text() {
        let prompts = vec![Prompt::new("a", Category::Swaps, "Uniswap", "   ")];
        assert!(matches!(Catalog::new(prompts), Err(CatalogError::EmptyText(_))));
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::LendBorrow).unwrap();
        assert_eq!(json, "\"Lend & Borrow\"");

        let legacy: Category = serde_json::from_str("\"Lending & Borrowing\"").unwrap();
        assert_eq!(legacy, Category::LendBorrow);
    }

    #[test]
    fn test_category_from_label() {
        for category in Category::all() {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_label("Yield"), None);
    }

    #[tokio::test]
    async fn test_load_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","category":"Cross Chain","protocol":"Across","text":"Bridge 1 ETH to Base"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load_from_json(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x").unwrap().category, Category::CrossChain);
    }

    #[tokio::test]
    async fn test_load_from_json_rejects_unknown_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"id":"x","category":"Yield","protocol":"P","text":"t"}]"#).unwrap();

        assert!(matches!(
            Catalog::load_from_json(&path).await,
            Err(CatalogError::Parse(_))
        ));
    }
}
