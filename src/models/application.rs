use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{EntityRef, HasId, Pagination, PositionSummary};

wire_enum! {
    pub enum ApplicationStatus {
        Pending => "pending",
        Reviewed => "reviewed",
        Shortlisted => "shortlisted",
        Selected => "selected",
        Rejected => "rejected",
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub total_experience: Option<String>,
    #[serde(default)]
    pub current_company: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    /// Stored file reference for the résumé.
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub position: Option<EntityRef<PositionSummary>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Application {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Application {
    pub fn position_title(&self) -> Option<&str> {
        self.position
            .as_ref()
            .and_then(|p| p.populated())
            .map(|p| p.title.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `/applications` answers either with a bare array or a paged object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApplicationListPayload {
    Paged {
        applications: Vec<Application>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
    Items(Vec<Application>),
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationPage {
    pub items: Vec<Application>,
    pub pagination: Pagination,
}

impl From<ApplicationListPayload> for ApplicationPage {
    fn from(value: ApplicationListPayload) -> Self {
        match value {
            ApplicationListPayload::Paged {
                applications,
                pagination,
            } => {
                let pagination = pagination.unwrap_or_else(|| single_page(applications.len()));
                Self {
                    items: applications,
                    pagination,
                }
            }
            ApplicationListPayload::Items(items) => Self {
                pagination: single_page(items.len()),
                items,
            },
        }
    }
}

fn single_page(len: usize) -> Pagination {
    Pagination {
        page: 1,
        pages: 1,
        total: len as u64,
        limit: len as u32,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(alias = "totalApplications")]
    pub total: u64,
    pub pending: u64,
    pub reviewed: u64,
    pub shortlisted: u64,
    pub selected: u64,
    pub rejected: u64,
    #[serde(alias = "activePositions")]
    pub active_positions: u64,
    #[serde(alias = "recentApplications")]
    pub recent: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paged_and_bare_lists() {
        let paged: ApplicationListPayload = serde_json::from_value(json!({
            "applications": [{"_id": "a1", "fullName": "Jane", "email": "j@x.io", "status": "reviewed",
                              "position": {"_id": "p1", "title": "QA"}}],
            "pagination": {"currentPage": 2, "totalPages": 5, "totalItems": 41, "limit": 10}
        }))
        .unwrap();
        let page = ApplicationPage::from(paged);
        assert_eq!(page.items[0].position_title(), Some("QA"));
        assert_eq!(page.pagination.pages, 5);
        assert_eq!(page.pagination.total, 41);

        let bare: ApplicationListPayload =
            serde_json::from_value(json!([{"_id": "a2", "position": "p9"}])).unwrap();
        let page = ApplicationPage::from(bare);
        assert_eq!(page.items[0].status, ApplicationStatus::Pending);
        assert_eq!(page.items[0].position_title(), None);
        assert_eq!(page.pagination.total, 1);
    }

    #[test]
    fn query_skips_unset_filters() {
        let query = ApplicationListQuery {
            status: Some(ApplicationStatus::Shortlisted),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"status": "shortlisted"}));
    }
}
