use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::storage::link::{Category, DEFAULT_CATEGORY_COLOR, Link, favicon_url, generate_id};
use crate::storage::store::Store;

/// Root coordinator: owns the in-memory collections and the store. Every
/// mutation writes the whole link document back, so memory and disk only
/// diverge between a failed write and the next successful one.
pub struct LinkService {
    store: Store,
    links: Vec<Link>,
    categories: Vec<Category>,
}

impl LinkService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Store::open(data_dir)?;
        let categories = store.load_categories()?;
        let mut links = store.load_links()?;

        // First run: seed a few example links so the list isn't empty
        if links.is_empty() {
            links = sample_links();
            store.save_links(&links)?;
        }

        Ok(LinkService {
            store,
            links,
            categories,
        })
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Add or update a link. A record with a matching id is replaced in place,
    /// keeping its position in the collection; otherwise the link is appended.
    pub fn save_link(&mut self, link: Link) -> Result<()> {
        match self.links.iter_mut().find(|existing| existing.id == link.id) {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
        self.persist()
    }

    /// Remove a link by id; unknown ids are a silent no-op
    pub fn delete_link(&mut self, id: &str) -> Result<()> {
        let before = self.links.len();
        self.links.retain(|link| link.id != id);
        if self.links.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Record a visit: bump the counter and stamp the time. Returns the URL to
    /// hand to the browser launcher, or None (and no write) for unknown ids.
    pub fn visit_link(&mut self, id: &str) -> Result<Option<String>> {
        let Some(link) = self.links.iter_mut().find(|link| link.id == id) else {
            return Ok(None);
        };
        link.visit_count += 1;
        link.last_visited = Some(chrono::Utc::now().timestamp_millis());
        let url = link.url.clone();
        self.persist()?;
        Ok(Some(url))
    }

    /// Accent color for a category id, falling back to the default gray for
    /// orphaned references
    pub fn category_color(&self, category_id: &str) -> &str {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.color.as_str())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }

    /// Link counts per category id, for the sidebar badges
    pub fn link_count_by_category(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for link in &self.links {
            *counts.entry(link.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn persist(&self) -> Result<()> {
        self.store.save_links(&self.links)?;
        Ok(())
    }
}

const DAY_MS: i64 = 86_400_000;

/// Example links shown on a fresh install
fn sample_links() -> Vec<Link> {
    let now = chrono::Utc::now().timestamp_millis();
    let sample = |url: &str,
                  title: &str,
                  description: &str,
                  category: &str,
                  tags: &[&str],
                  age_days: i64,
                  visit_count: u64| Link {
        id: generate_id(),
        url: url.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        favicon: favicon_url(url),
        created_at: now - age_days * DAY_MS,
        last_visited: None,
        visit_count,
    };

    vec![
        sample(
            "https://github.com",
            "GitHub - Where the world builds software",
            "GitHub is where over 100 million developers shape the future of software, together.",
            "work",
            &["development", "code", "git"],
            5,
            12,
        ),
        sample(
            "https://reactjs.org",
            "React - A JavaScript library for building user interfaces",
            "A JavaScript library for building user interfaces",
            "education",
            &["javascript", "frontend", "library"],
            2,
            8,
        ),
        sample(
            "https://netflix.com",
            "Netflix - Watch TV Shows Online, Watch Movies Online",
            "Watch Netflix movies & TV shows online or stream right to your smart TV.",
            "entertainment",
            &["streaming", "movies", "tv"],
            10,
            5,
        ),
        sample(
            "https://tailwindcss.com",
            "Tailwind CSS - Rapidly build modern websites",
            "A utility-first CSS framework packed with composable classes.",
            "work",
            &["css", "design", "frontend"],
            1,
            3,
        ),
        sample(
            "https://nytimes.com",
            "The New York Times - Breaking News, US News, World News",
            "Live news, investigations, opinion, photos and video.",
            "personal",
            &["news", "articles", "journalism"],
            3,
            2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> LinkService {
        LinkService::new(dir.path()).unwrap()
    }

    fn make_link(id: &str, title: &str, category: &str) -> Link {
        let mut link = Link::new();
        link.id = id.to_string();
        link.url = format!("https://{}.example.com", id);
        link.title = title.to_string();
        link.category = category.to_string();
        link
    }

    #[test]
    fn fresh_install_is_seeded_with_samples() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        assert_eq!(svc.links().len(), 5);
        assert_eq!(svc.categories().len(), 10);

        // seeding is persisted, so a reload sees the same records
        let again = service(&dir);
        assert_eq!(again.links(), svc.links());
    }

    #[test]
    fn save_link_appends_then_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let link = make_link("x1", "First", "work");
        svc.save_link(link.clone()).unwrap();
        assert_eq!(svc.links().len(), 6);
        let position = svc.links().iter().position(|l| l.id == "x1").unwrap();

        let mut edited = link.clone();
        edited.title = "First (edited)".to_string();
        svc.save_link(edited).unwrap();

        // same length, same position, new content
        assert_eq!(svc.links().len(), 6);
        assert_eq!(svc.links()[position].title, "First (edited)");
    }

    #[test]
    fn save_link_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let link = make_link("x1", "First", "work");
        svc.save_link(link.clone()).unwrap();
        let snapshot = svc.links().to_vec();
        svc.save_link(link).unwrap();
        assert_eq!(svc.links(), snapshot.as_slice());
    }

    #[test]
    fn delete_removes_and_tolerates_unknown_ids() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);
        svc.save_link(make_link("x1", "First", "work")).unwrap();

        svc.delete_link("x1").unwrap();
        assert!(svc.links().iter().all(|l| l.id != "x1"));

        let snapshot = svc.links().to_vec();
        svc.delete_link("never-existed").unwrap();
        assert_eq!(svc.links(), snapshot.as_slice());
    }

    #[test]
    fn deleted_links_stay_deleted_after_new_saves() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);
        svc.save_link(make_link("x1", "First", "work")).unwrap();
        svc.delete_link("x1").unwrap();
        svc.save_link(make_link("x2", "Second", "work")).unwrap();

        assert!(svc.links().iter().all(|l| l.id != "x1"));
        let reloaded = service(&dir);
        assert!(reloaded.links().iter().all(|l| l.id != "x1"));
        assert!(reloaded.links().iter().any(|l| l.id == "x2"));
    }

    #[test]
    fn visit_increments_count_and_stamps_time() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);
        svc.save_link(make_link("x1", "First", "work")).unwrap();

        for _ in 0..3 {
            let url = svc.visit_link("x1").unwrap();
            assert_eq!(url.as_deref(), Some("https://x1.example.com"));
        }

        let link = svc.links().iter().find(|l| l.id == "x1").unwrap();
        assert_eq!(link.visit_count, 3);
        assert!(link.last_visited.is_some());
    }

    #[test]
    fn visit_of_unknown_id_is_a_silent_no_op() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let snapshot = svc.links().to_vec();
        let url = svc.visit_link("never-existed").unwrap();
        assert!(url.is_none());
        assert_eq!(svc.links(), snapshot.as_slice());
    }

    #[test]
    fn mutations_survive_a_reload() {
        let dir = TempDir::new().unwrap();
        {
            let mut svc = service(&dir);
            svc.save_link(make_link("x1", "First", "travel")).unwrap();
            svc.visit_link("x1").unwrap();
        }
        let svc = service(&dir);
        let link = svc.links().iter().find(|l| l.id == "x1").unwrap();
        assert_eq!(link.title, "First");
        assert_eq!(link.visit_count, 1);
    }

    #[test]
    fn category_color_falls_back_for_orphans() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        assert_eq!(svc.category_color("work"), "#4f46e5");
        assert_eq!(svc.category_color("no-such-category"), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn sidebar_counts_group_by_category() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);
        svc.save_link(make_link("x1", "A", "travel")).unwrap();
        svc.save_link(make_link("x2", "B", "travel")).unwrap();

        let counts = svc.link_count_by_category();
        assert_eq!(counts.get("travel"), Some(&2));
        // samples: github + tailwind are filed under work
        assert_eq!(counts.get("work"), Some(&2));
    }
}
