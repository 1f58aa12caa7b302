//! Static fallback dataset.
//!
//! When the remote datastore is unconfigured or a remote query fails, the
//! service answers from this hardcoded catalog instead. The dataset is
//! built once at startup and never mutated; lookups are linear scans,
//! which is fine at this size.

use crate::models::{Company, CompanyDetail, ResearchEntry, Sector};

/// One sector's worth of static data, before response shaping.
struct SectorData {
    id: &'static str,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    companies: &'static [CompanyData],
}

struct CompanyData {
    id: &'static str,
    name: &'static str,
    slug: &'static str,
    logo_url: &'static str,
    short_summary: &'static str,
    website: &'static str,
}

struct ResearchData {
    company_slug: &'static str,
    id: &'static str,
    title: &'static str,
    content: &'static str,
    source_url: &'static str,
    updated_at: &'static str,
}

const SECTORS: &[SectorData] = &[
    SectorData {
        id: "1",
        name: "Exchanges / On-Off Ramps",
        slug: "exchanges-on-off-ramps",
        description: "Cryptocurrency exchanges and fiat on/off ramp services",
        companies: &[
            CompanyData {
                id: "1",
                name: "Coinbase",
                slug: "coinbase",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Leading US cryptocurrency exchange",
                website: "https://coinbase.com",
            },
            CompanyData {
                id: "2",
                name: "Binance",
                slug: "binance",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "World's largest cryptocurrency exchange",
                website: "https://binance.com",
            },
            CompanyData {
                id: "3",
                name: "Kraken",
                slug: "kraken",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Secure and compliant crypto exchange",
                website: "https://kraken.com",
            },
        ],
    },
    SectorData {
        id: "2",
        name: "Stablecoin Issuers",
        slug: "stablecoin-issuers",
        description: "Companies that issue and maintain stablecoins",
        companies: &[
            CompanyData {
                id: "4",
                name: "Circle",
                slug: "circle",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Issuer of USDC stablecoin",
                website: "https://circle.com",
            },
            CompanyData {
                id: "5",
                name: "Tether",
                slug: "tether",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Issuer of USDT stablecoin",
                website: "https://tether.to",
            },
            CompanyData {
                id: "6",
                name: "MakerDAO",
                slug: "makerdao",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Decentralized stablecoin protocol (DAI)",
                website: "https://makerdao.com",
            },
        ],
    },
    SectorData {
        id: "3",
        name: "Yield",
        slug: "yield",
        description: "DeFi protocols and services focused on yield generation",
        companies: &[
            CompanyData {
                id: "7",
                name: "Aave",
                slug: "aave",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Decentralized lending protocol",
                website: "https://aave.com",
            },
            CompanyData {
                id: "8",
                name: "Compound",
                slug: "compound",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Algorithmic money market protocol",
                website: "https://compound.finance",
            },
            CompanyData {
                id: "9",
                name: "Yearn Finance",
                slug: "yearn-finance",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Yield optimization protocol",
                website: "https://yearn.finance",
            },
        ],
    },
    SectorData {
        id: "4",
        name: "B2B Payments",
        slug: "b2b-payments",
        description: "Business-to-business payment solutions using crypto",
        companies: &[
            CompanyData {
                id: "10",
                name: "BitPay",
                slug: "bitpay",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Bitcoin payment processor",
                website: "https://bitpay.com",
            },
            CompanyData {
                id: "11",
                name: "Ripple",
                slug: "ripple",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Enterprise blockchain solutions",
                website: "https://ripple.com",
            },
        ],
    },
    SectorData {
        id: "5",
        name: "Cross Border",
        slug: "cross-border",
        description: "Cross-border payment and remittance services",
        companies: &[
            CompanyData {
                id: "12",
                name: "Stellar",
                slug: "stellar",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Cross-border payment network",
                website: "https://stellar.org",
            },
            CompanyData {
                id: "13",
                name: "Remitly",
                slug: "remitly",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Digital remittance service",
                website: "https://remitly.com",
            },
        ],
    },
    SectorData {
        id: "6",
        name: "Wallets",
        slug: "wallets",
        description: "Cryptocurrency wallet providers and custody solutions",
        companies: &[
            CompanyData {
                id: "14",
                name: "MetaMask",
                slug: "metamask",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Popular Ethereum wallet",
                website: "https://metamask.io",
            },
            CompanyData {
                id: "15",
                name: "Ledger",
                slug: "ledger",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Hardware wallet manufacturer",
                website: "https://ledger.com",
            },
            CompanyData {
                id: "16",
                name: "Trust Wallet",
                slug: "trust-wallet",
                logo_url: "https://via.placeholder.com/40",
                short_summary: "Multi-currency mobile wallet",
                website: "https://trustwallet.com",
            },
        ],
    },
];

const RESEARCH: &[ResearchData] = &[
    ResearchData {
        company_slug: "coinbase",
        id: "1",
        title: "Coinbase Q3 2023 Earnings",
        content: "Coinbase reported strong Q3 results with increased trading volume \
                  and institutional adoption. The company showed resilience in a \
                  challenging market environment.",
        source_url: "https://investor.coinbase.com",
        updated_at: "2023-11-01T10:00:00Z",
    },
    ResearchData {
        company_slug: "circle",
        id: "2",
        title: "USDC Market Analysis",
        content: "Circle's USDC maintains its position as the second-largest \
                  stablecoin by market cap. Recent regulatory clarity has \
                  strengthened its position in the market.",
        source_url: "https://circle.com/blog",
        updated_at: "2023-10-28T14:30:00Z",
    },
    ResearchData {
        company_slug: "aave",
        id: "3",
        title: "Aave V3 Protocol Update",
        content: "Aave V3 introduces new features including cross-chain \
                  functionality and improved capital efficiency. The protocol \
                  continues to lead in DeFi innovation.",
        source_url: "https://aave.com/blog",
        updated_at: "2023-10-25T09:15:00Z",
    },
];

/// The in-process catalog used when the remote datastore is unavailable.
pub struct StaticCatalog {
    sectors: Vec<Sector>,
    research: Vec<(&'static str, ResearchEntry)>,
}

impl StaticCatalog {
    /// Shapes the static tables into response models once, at startup.
    pub fn new() -> Self {
        let sectors = SECTORS
            .iter()
            .map(|s| {
                Sector::assemble(
                    s.id.to_string(),
                    s.name.to_string(),
                    s.slug.to_string(),
                    Some(s.description.to_string()),
                    s.companies.iter().map(shape_company).collect(),
                )
            })
            .collect();

        let research = RESEARCH
            .iter()
            .map(|r| {
                let entry = ResearchEntry {
                    id: r.id.to_string(),
                    title: r.title.to_string(),
                    content: r.content.to_string(),
                    source_url: Some(r.source_url.to_string()),
                    // Static timestamps are known-good RFC 3339 literals.
                    updated_at: r.updated_at.parse().unwrap(),
                };
                (r.company_slug, entry)
            })
            .collect();

        Self { sectors, research }
    }

    /// All sectors in definition order.
    pub fn sectors(&self) -> Vec<Sector> {
        self.sectors.clone()
    }

    pub fn sector_by_slug(&self, slug: &str) -> Option<Sector> {
        self.sectors.iter().find(|s| s.slug == slug).cloned()
    }

    /// Scans every sector's companies for a slug match and denormalizes
    /// the containing sector's name into the result.
    pub fn company_by_slug(&self, slug: &str) -> Option<CompanyDetail> {
        for sector in &self.sectors {
            if let Some(company) = sector.companies.iter().find(|c| c.slug == slug) {
                return Some(CompanyDetail {
                    id: company.id.clone(),
                    name: company.name.clone(),
                    slug: company.slug.clone(),
                    logo_url: company.logo_url.clone(),
                    short_summary: company.short_summary.clone(),
                    website: company.website.clone(),
                    sector_name: sector.name.clone(),
                });
            }
        }
        None
    }

    /// Research entries for a company. `None` when the company slug does
    /// not exist at all; `Some(vec![])` when it exists with no entries.
    pub fn research_for_company(&self, slug: &str) -> Option<Vec<ResearchEntry>> {
        self.company_by_slug(slug)?;

        Some(
            self.research
                .iter()
                .filter(|(company, _)| *company == slug)
                .map(|(_, entry)| entry.clone())
                .collect(),
        )
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn shape_company(c: &CompanyData) -> Company {
    Company {
        id: c.id.to_string(),
        name: c.name.to_string(),
        slug: c.slug.to_string(),
        logo_url: Some(c.logo_url.to_string()),
        short_summary: c.short_summary.to_string(),
        website: Some(c.website.to_string()),
    }
}
