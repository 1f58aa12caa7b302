//! Core data models served by the catalog API.
//!
//! All types are read-only records: the service never mutates or deletes
//! them, it only shapes rows from the remote datastore (or the fallback
//! dataset) into these response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company summary as nested under a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub short_summary: String,
    pub website: Option<String>,
}

/// A market sector with its nested company summaries.
///
/// `company_count` is derived from `companies.len()` at query time on
/// every path; it is never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub company_count: usize,
    pub companies: Vec<Company>,
}

/// Full company record with the parent sector's name denormalized in.
///
/// The response shape carries `sector_name`, not a sector id. Clients
/// depend on this exact shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub short_summary: String,
    pub website: Option<String>,
    pub sector_name: String,
}

/// A research note attached to one company.
///
/// The owning company is implied by the request path; it is not a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Sector {
    /// Builds a sector from its row fields and company list, deriving
    /// `company_count` from the list.
    pub fn assemble(
        id: String,
        name: String,
        slug: String,
        description: Option<String>,
        companies: Vec<Company>,
    ) -> Self {
        Self {
            id,
            name,
            slug,
            description,
            company_count: companies.len(),
            companies,
        }
    }
}
