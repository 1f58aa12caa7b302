//! Remote datastore client (Supabase PostgREST).
//!
//! Each catalog query maps to one or two `GET {url}/rest/v1/{table}`
//! requests with `apikey` / `Authorization: Bearer` headers. There are no
//! retries; any failure here is recovered upstream by the fallback
//! dataset, so the only job of this module is to either produce correct
//! rows or fail with a decodable reason in the error message.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;

use crate::config::DatastoreConfig;
use crate::models::{Company, CompanyDetail, ResearchEntry, Sector};

/// The remote half of the catalog, injectable so tests can substitute
/// failing or canned implementations.
///
/// `Ok(None)` is a deliberate "no such record" answer from a successful
/// query and is surfaced to the caller as 404; `Err` is an upstream
/// failure and triggers the fallback dataset.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn sectors(&self) -> Result<Vec<Sector>>;
    async fn sector_by_slug(&self, slug: &str) -> Result<Option<Sector>>;
    async fn company_by_slug(&self, slug: &str) -> Result<Option<CompanyDetail>>;
    async fn research_for_company(&self, slug: &str) -> Result<Option<Vec<ResearchEntry>>>;
}

/// PostgREST-backed implementation of [`RemoteSource`].
pub struct RemoteCatalog {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl RemoteCatalog {
    pub fn new(config: &DatastoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
        })
    }

    /// Issues one `GET /rest/v1/{table}` query and returns the row array.
    ///
    /// PostgREST always answers a filtered select with a JSON array
    /// (possibly empty); anything else is an upstream failure.
    async fn select(&self, table: &str, query: &[(&str, &str)]) -> Result<Vec<Value>> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("datastore error {} on {}: {}", status, table, body);
        }

        let json: Value = response.json().await?;
        match json {
            Value::Array(rows) => Ok(rows),
            other => bail!("unexpected response shape from {}: {}", table, other),
        }
    }

    async fn companies_for_sector(&self, sector_id: &str) -> Result<Vec<Company>> {
        let filter = format!("eq.{}", sector_id);
        let rows = self
            .select("companies", &[("select", "*"), ("sector_id", &filter)])
            .await?;

        rows.iter().map(decode_company).collect()
    }

    async fn sector_from_row(&self, row: &Value) -> Result<Sector> {
        let id = id_field(row, "id")?;
        let companies = self.companies_for_sector(&id).await?;

        Ok(Sector::assemble(
            id,
            str_field(row, "name")?,
            str_field(row, "slug")?,
            opt_str_field(row, "description"),
            companies,
        ))
    }
}

#[async_trait]
impl RemoteSource for RemoteCatalog {
    async fn sectors(&self) -> Result<Vec<Sector>> {
        let rows = self.select("sectors", &[("select", "*")]).await?;

        let mut sectors = Vec::with_capacity(rows.len());
        for row in &rows {
            sectors.push(self.sector_from_row(row).await?);
        }
        Ok(sectors)
    }

    async fn sector_by_slug(&self, slug: &str) -> Result<Option<Sector>> {
        let filter = format!("eq.{}", slug);
        let rows = self
            .select("sectors", &[("select", "*"), ("slug", &filter)])
            .await?;

        match rows.first() {
            Some(row) => Ok(Some(self.sector_from_row(row).await?)),
            None => Ok(None),
        }
    }

    async fn company_by_slug(&self, slug: &str) -> Result<Option<CompanyDetail>> {
        let filter = format!("eq.{}", slug);
        let rows = self
            .select(
                "companies",
                &[("select", "*,sectors(name)"), ("slug", &filter)],
            )
            .await?;

        let row = match rows.first() {
            Some(row) => row,
            None => return Ok(None),
        };

        let company = decode_company(row)?;
        let sector_name = row
            .get("sectors")
            .and_then(|s| s.get("name"))
            .and_then(|n| n.as_str())
            .ok_or_else(|| anyhow!("company row missing embedded sectors.name"))?
            .to_string();

        Ok(Some(CompanyDetail {
            id: company.id,
            name: company.name,
            slug: company.slug,
            logo_url: company.logo_url,
            short_summary: company.short_summary,
            website: company.website,
            sector_name,
        }))
    }

    async fn research_for_company(&self, slug: &str) -> Result<Option<Vec<ResearchEntry>>> {
        let filter = format!("eq.{}", slug);
        let rows = self
            .select("companies", &[("select", "id"), ("slug", &filter)])
            .await?;

        let company_id = match rows.first() {
            Some(row) => id_field(row, "id")?,
            None => return Ok(None),
        };

        let filter = format!("eq.{}", company_id);
        let rows = self
            .select(
                "company_research",
                &[
                    ("select", "*"),
                    ("company_id", &filter),
                    ("order", "updated_at.desc"),
                ],
            )
            .await?;

        let entries = rows
            .iter()
            .map(decode_research_entry)
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(entries))
    }
}

// ---- row decoding ----
//
// Rows are decoded field by field so a schema mismatch names the exact
// field in the logged error instead of a generic deserialization failure.

fn decode_company(row: &Value) -> Result<Company> {
    Ok(Company {
        id: id_field(row, "id")?,
        name: str_field(row, "name")?,
        slug: str_field(row, "slug")?,
        logo_url: opt_str_field(row, "logo_url"),
        short_summary: str_field(row, "short_summary")?,
        website: opt_str_field(row, "website"),
    })
}

fn decode_research_entry(row: &Value) -> Result<ResearchEntry> {
    let raw = str_field(row, "updated_at")?;
    let updated_at: DateTime<Utc> = raw
        .parse()
        .map_err(|e| anyhow!("bad updated_at {:?}: {}", raw, e))?;

    Ok(ResearchEntry {
        id: id_field(row, "id")?,
        title: str_field(row, "title")?,
        content: str_field(row, "content")?,
        source_url: opt_str_field(row, "source_url"),
        updated_at,
    })
}

fn str_field(row: &Value, field: &str) -> Result<String> {
    row.get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("row missing string field {:?}", field))
}

fn opt_str_field(row: &Value, field: &str) -> Option<String> {
    row.get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Identifier columns may arrive as JSON strings (uuid) or numbers
/// (serial); both normalize to the string form the API serves.
fn id_field(row: &Value, field: &str) -> Result<String> {
    match row.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => bail!("row field {:?} is not an identifier: {}", field, other),
        None => bail!("row missing identifier field {:?}", field),
    }
}
