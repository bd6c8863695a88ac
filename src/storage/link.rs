use serde::{Deserialize, Serialize};
use url::Url;

/// Fallback accent color for links whose category no longer exists.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String, // Category id
    pub tags: Vec<String>,
    pub favicon: String,
    pub created_at: i64, // epoch milliseconds, never changed after creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<i64>,
    pub visit_count: u64,
}

impl Link {
    /// Create an empty link with a fresh ID, stamped now, in the default category
    pub fn new() -> Self {
        Link {
            id: generate_id(),
            url: String::new(),
            title: String::new(),
            description: String::new(),
            category: "other".to_string(),
            tags: Vec::new(),
            favicon: String::new(),
            created_at: chrono::Utc::now().timestamp_millis(),
            last_visited: None,
            visit_count: 0,
        }
    }
}

/// Generate a unique link ID using an MD5 hash of a nanosecond timestamp
pub fn generate_id() -> String {
    format!(
        "{:x}",
        md5::compute(format!(
            "link{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0)
        ))
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String, // hex accent color, e.g. "#4f46e5"
}

/// The fixed category set seeded into an empty store on first run
pub fn default_categories() -> Vec<Category> {
    let seed = [
        ("work", "Work", "#4f46e5"),
        ("personal", "Personal", "#10b981"),
        ("education", "Education", "#f59e0b"),
        ("entertainment", "Entertainment", "#ec4899"),
        ("finance", "Finance", "#6366f1"),
        ("health", "Health", "#ef4444"),
        ("shopping", "Shopping", "#8b5cf6"),
        ("social", "Social", "#3b82f6"),
        ("travel", "Travel", "#14b8a6"),
        ("other", "Other", "#6b7280"),
    ];
    seed.iter()
        .map(|(id, name, color)| Category {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    Newest,
    Oldest,
    Alphabetical,
    MostVisited,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::Oldest => "Oldest First",
            SortOption::Alphabetical => "Alphabetical",
            SortOption::MostVisited => "Most Visited",
        }
    }

    /// Cycle to the next option (header sort control)
    pub fn next(&self) -> SortOption {
        match self {
            SortOption::Newest => SortOption::Oldest,
            SortOption::Oldest => SortOption::Alphabetical,
            SortOption::Alphabetical => SortOption::MostVisited,
            SortOption::MostVisited => SortOption::Newest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(&self) -> ViewMode {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// Check that a URL parses as absolute (scheme + host)
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Best-effort favicon guess: {scheme}://{host}/favicon.ico.
/// No network fetch happens; the path is only a convention most sites follow.
pub fn favicon_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| format!("{}://{}/favicon.ico", parsed.scheme(), host))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Extract the host from a URL for display, empty string if it doesn't parse
pub fn domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_string()))
        .unwrap_or_default()
}
