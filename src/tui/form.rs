use crate::storage::link::{Category, Link, domain, favicon_url, generate_id, is_valid_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Url,
    Title,
    Description,
    Category,
    Tags,
}

impl FormField {
    fn next(&self) -> FormField {
        match self {
            FormField::Url => FormField::Title,
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Category,
            FormField::Category => FormField::Tags,
            FormField::Tags => FormField::Url,
        }
    }

    fn prev(&self) -> FormField {
        match self {
            FormField::Url => FormField::Tags,
            FormField::Title => FormField::Url,
            FormField::Description => FormField::Title,
            FormField::Category => FormField::Description,
            FormField::Tags => FormField::Category,
        }
    }
}

/// Editable state for the add/edit form. Holds the candidate record's fields
/// plus the tag input sub-state; validation only runs on submit, and errors
/// clear per field as soon as that field changes.
pub struct LinkForm {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub favicon: String,
    pub tag_input: String,
    pub focused: FormField,
    pub url_error: Option<String>,
    pub title_error: Option<String>,
    created_at: i64,
    last_visited: Option<i64>,
    visit_count: u64,
    editing: bool,
}

impl LinkForm {
    /// Form for a brand-new link: fresh id, stamped now, default category
    pub fn create() -> Self {
        LinkForm {
            id: generate_id(),
            url: String::new(),
            title: String::new(),
            description: String::new(),
            category: "other".to_string(),
            tags: Vec::new(),
            favicon: String::new(),
            tag_input: String::new(),
            focused: FormField::Url,
            url_error: None,
            title_error: None,
            created_at: chrono::Utc::now().timestamp_millis(),
            last_visited: None,
            visit_count: 0,
            editing: false,
        }
    }

    /// Form pre-filled from an existing link
    pub fn edit(link: &Link) -> Self {
        LinkForm {
            id: link.id.clone(),
            url: link.url.clone(),
            title: link.title.clone(),
            description: link.description.clone(),
            category: link.category.clone(),
            tags: link.tags.clone(),
            favicon: link.favicon.clone(),
            tag_input: String::new(),
            focused: FormField::Url,
            url_error: None,
            title_error: None,
            created_at: link.created_at,
            last_visited: link.last_visited,
            visit_count: link.visit_count,
            editing: true,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn heading(&self) -> &'static str {
        if self.editing { "Edit Link" } else { "Add New Link" }
    }

    pub fn focus_next(&mut self) {
        if self.focused == FormField::Url {
            self.url_blur();
        }
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        if self.focused == FormField::Url {
            self.url_blur();
        }
        self.focused = self.focused.prev();
    }

    /// Type into the focused field; editing a field clears its error
    pub fn push_char(&mut self, c: char) {
        match self.focused {
            FormField::Url => {
                self.url.push(c);
                self.url_error = None;
            }
            FormField::Title => {
                self.title.push(c);
                self.title_error = None;
            }
            FormField::Description => self.description.push(c),
            FormField::Category => {}
            FormField::Tags => self.tag_input.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused {
            FormField::Url => {
                self.url.pop();
                self.url_error = None;
            }
            FormField::Title => {
                self.title.pop();
                self.title_error = None;
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Category => {}
            FormField::Tags => {
                // Backspace on an empty tag input removes the last tag
                if self.tag_input.pop().is_none() {
                    self.tags.pop();
                }
            }
        }
    }

    /// Step the category selection through the known category list
    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        if categories.is_empty() {
            return;
        }
        let current = categories
            .iter()
            .position(|category| category.id == self.category)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % categories.len()
        } else {
            (current + categories.len() - 1) % categories.len()
        };
        self.category = categories[next].id.clone();
    }

    /// Commit the tag input: trim, drop duplicates silently, append otherwise.
    /// The input is cleared either way.
    pub fn commit_tag(&mut self) {
        let tag = self.tag_input.trim().to_string();
        self.tag_input.clear();
        if tag.is_empty() || self.tags.contains(&tag) {
            return;
        }
        self.tags.push(tag);
    }

    /// Remove an exact-match tag
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    /// Leaving the URL field: flag an unparsable URL, and when the title is
    /// still empty, stub it from the hostname and guess the favicon. Stands in
    /// for a metadata fetch, which is out of scope.
    pub fn url_blur(&mut self) {
        if self.url.is_empty() {
            return;
        }
        if !is_valid_url(&self.url) {
            self.url_error = Some("Please enter a valid URL".to_string());
            return;
        }
        if self.title.is_empty() {
            let host = domain(&self.url);
            if !host.is_empty() {
                self.title = format!("Page from {}", host);
                self.favicon = favicon_url(&self.url);
            }
        }
    }

    /// Validate and produce the record to save. On failure the per-field
    /// errors are set and None is returned; nothing reaches storage.
    pub fn submit(&mut self) -> Option<Link> {
        self.url_error = None;
        self.title_error = None;

        if self.url.is_empty() {
            self.url_error = Some("URL is required".to_string());
        } else if !is_valid_url(&self.url) {
            self.url_error = Some("Please enter a valid URL".to_string());
        }
        if self.title.is_empty() {
            self.title_error = Some("Title is required".to_string());
        }
        if self.url_error.is_some() || self.title_error.is_some() {
            return None;
        }

        let favicon = if self.favicon.is_empty() {
            favicon_url(&self.url)
        } else {
            self.favicon.clone()
        };
        let created_at = if self.editing {
            self.created_at
        } else {
            chrono::Utc::now().timestamp_millis()
        };

        Some(Link {
            id: self.id.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            favicon,
            created_at,
            last_visited: self.last_visited,
            visit_count: self.visit_count,
        })
    }
}
