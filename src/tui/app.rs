use crate::query::{ALL_CATEGORIES, query_links};
use crate::service::LinkService;
use crate::storage::link::{Link, SortOption, ViewMode, domain};
use crate::tui::form::{FormField, LinkForm};
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::*;

pub enum AppMode {
    List,
    Search,
    Form,
    DeleteConfirm,
    Help,
}

pub struct App {
    pub service: LinkService,
    pub visible: Vec<Link>,
    pub selected_category: String,
    pub search_term: String,
    pub sort_option: SortOption,
    pub view_mode: ViewMode,
    pub selected_index: usize,
    pub mode: AppMode,
    pub form: Option<LinkForm>,
    pub pending_delete: Option<Link>,
    pub input_buffer: String,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Result<Self> {
        let data_dir = std::env::var("LINKVAULT_DIR").unwrap_or_else(|_| {
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| ".".to_string());
            format!("{}/.linkvault", home)
        });
        let service = LinkService::new(data_dir)?;

        let mut app = App {
            service,
            visible: Vec::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
            sort_option: SortOption::Newest,
            view_mode: ViewMode::Grid,
            selected_index: 0,
            mode: AppMode::List,
            form: None,
            pending_delete: None,
            input_buffer: String::new(),
            should_quit: false,
            status_message: None,
        };
        app.refresh();
        Ok(app)
    }

    /// Recompute the displayed view from the collection, the filter criteria
    /// and the sort mode. Runs after every mutation or criteria change.
    fn refresh(&mut self) {
        self.visible = query_links(
            self.service.links(),
            &self.selected_category,
            &self.search_term,
            self.sort_option,
        );
        if self.selected_index >= self.visible.len() && !self.visible.is_empty() {
            self.selected_index = self.visible.len() - 1;
        }
    }

    pub fn handle_key(
        &mut self,
        key: crossterm::event::KeyCode,
        modifiers: crossterm::event::KeyModifiers,
    ) -> Result<()> {
        match self.mode {
            AppMode::List => self.handle_list_key(key)?,
            AppMode::Search => self.handle_search_key(key)?,
            AppMode::Form => self.handle_form_key(key, modifiers)?,
            AppMode::DeleteConfirm => self.handle_delete_confirm_key(key)?,
            AppMode::Help => self.handle_help_key(key)?,
        }
        Ok(())
    }

    fn handle_list_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                if !self.search_term.is_empty() {
                    // Clear search
                    self.search_term.clear();
                    self.selected_index = 0;
                    self.refresh();
                } else {
                    self.should_quit = true;
                }
            }
            crossterm::event::KeyCode::Char('q') => {
                self.should_quit = true;
            }
            crossterm::event::KeyCode::Char('/') => {
                // Start search
                self.mode = AppMode::Search;
                self.input_buffer = self.search_term.clone();
            }
            crossterm::event::KeyCode::Char('j') | crossterm::event::KeyCode::Down => {
                let max_index = self.visible.len().saturating_sub(1);
                if self.selected_index < max_index {
                    self.selected_index += 1;
                }
            }
            crossterm::event::KeyCode::Char('k') | crossterm::event::KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            crossterm::event::KeyCode::Char('h') | crossterm::event::KeyCode::Left => {
                self.cycle_filter_category(false);
            }
            crossterm::event::KeyCode::Char('l') | crossterm::event::KeyCode::Right => {
                self.cycle_filter_category(true);
            }
            crossterm::event::KeyCode::Char('s') => {
                // Cycle sort mode
                self.sort_option = self.sort_option.next();
                self.refresh();
            }
            crossterm::event::KeyCode::Char('v') => {
                self.view_mode = self.view_mode.toggle();
            }
            crossterm::event::KeyCode::Char('n') => {
                // New link
                self.form = Some(LinkForm::create());
                self.mode = AppMode::Form;
                self.status_message = None;
            }
            crossterm::event::KeyCode::Enter => {
                // Edit selected link
                if let Some(link) = self.visible.get(self.selected_index) {
                    self.form = Some(LinkForm::edit(link));
                    self.mode = AppMode::Form;
                    self.status_message = None;
                }
            }
            crossterm::event::KeyCode::Char('o') => {
                self.visit_selected()?;
            }
            crossterm::event::KeyCode::Char('d') => {
                // Delete needs confirmation first
                if let Some(link) = self.visible.get(self.selected_index) {
                    self.pending_delete = Some(link.clone());
                    self.mode = AppMode::DeleteConfirm;
                }
            }
            crossterm::event::KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            _ => {}
        }
        Ok(())
    }

    /// Record the visit, then ask the host to open the URL. The launch is
    /// fire-and-forget; a failure is reported but the visit is not rolled back.
    fn visit_selected(&mut self) -> Result<()> {
        let Some(link) = self.visible.get(self.selected_index) else {
            return Ok(());
        };
        let id = link.id.clone();
        let title = link.title.clone();
        if let Some(url) = self.service.visit_link(&id)? {
            match open::that(&url) {
                Ok(_) => self.status_message = Some(format!("✓ Opened: {}", title)),
                Err(e) => self.status_message = Some(format!("✗ Failed to open browser: {}", e)),
            }
        }
        self.refresh();
        Ok(())
    }

    fn cycle_filter_category(&mut self, forward: bool) {
        let mut ids: Vec<String> = vec![ALL_CATEGORIES.to_string()];
        ids.extend(self.service.categories().iter().map(|c| c.id.clone()));
        let current = ids
            .iter()
            .position(|id| *id == self.selected_category)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % ids.len()
        } else {
            (current + ids.len() - 1) % ids.len()
        };
        self.selected_category = ids[next].clone();
        self.selected_index = 0;
        self.refresh();
    }

    fn handle_search_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                self.input_buffer.clear();
                self.search_term.clear();
                self.selected_index = 0;
                self.refresh();
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Enter => {
                // Keep the applied term and go back to browsing
                self.input_buffer.clear();
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Char(c) => {
                self.input_buffer.push(c);
                // Live search as you type
                self.search_term = self.input_buffer.clone();
                self.selected_index = 0;
                self.refresh();
            }
            crossterm::event::KeyCode::Backspace => {
                self.input_buffer.pop();
                self.search_term = self.input_buffer.clone();
                self.selected_index = 0;
                self.refresh();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(
        &mut self,
        key: crossterm::event::KeyCode,
        modifiers: crossterm::event::KeyModifiers,
    ) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            self.mode = AppMode::List;
            return Ok(());
        };
        match key {
            crossterm::event::KeyCode::Esc => {
                // Discard without saving
                self.form = None;
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Tab | crossterm::event::KeyCode::Down => {
                form.focus_next();
            }
            crossterm::event::KeyCode::BackTab | crossterm::event::KeyCode::Up => {
                form.focus_prev();
            }
            crossterm::event::KeyCode::Left if form.focused == FormField::Category => {
                form.cycle_category(self.service.categories(), false);
            }
            crossterm::event::KeyCode::Right if form.focused == FormField::Category => {
                form.cycle_category(self.service.categories(), true);
            }
            crossterm::event::KeyCode::Char('s')
                if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.submit_form()?;
            }
            crossterm::event::KeyCode::Enter => {
                if form.focused == FormField::Tags {
                    form.commit_tag();
                } else {
                    self.submit_form()?;
                }
            }
            crossterm::event::KeyCode::Delete if form.focused == FormField::Tags => {
                // Remove the tag matching the typed text
                let tag = form.tag_input.trim().to_string();
                form.remove_tag(&tag);
                form.tag_input.clear();
            }
            crossterm::event::KeyCode::Char(c) => {
                form.push_char(c);
            }
            crossterm::event::KeyCode::Backspace => {
                form.backspace();
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_form(&mut self) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        if let Some(link) = form.submit() {
            let title = link.title.clone();
            self.service.save_link(link)?;
            self.form = None;
            self.mode = AppMode::List;
            self.status_message = Some(format!("✓ Saved: {}", title));
            self.refresh();
        }
        // Validation errors stay visible inline in the form
        Ok(())
    }

    fn handle_delete_confirm_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Char('y') | crossterm::event::KeyCode::Enter => {
                // Confirm deletion
                if let Some(link) = self.pending_delete.take() {
                    self.service.delete_link(&link.id)?;
                    self.status_message = Some(format!("✓ Deleted: {}", link.title));
                    self.refresh();
                }
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Char('n') => {
                // Cancel deletion, nothing changes
                self.pending_delete = None;
                self.mode = AppMode::List;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_help_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc
            | crossterm::event::KeyCode::Char('q')
            | crossterm::event::KeyCode::Char('?') => {
                self.mode = AppMode::List;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            AppMode::List | AppMode::Search => self.render_list(frame),
            AppMode::Form => self.render_form(frame),
            AppMode::DeleteConfirm => self.render_delete_confirm(frame),
            AppMode::Help => self.render_help(frame),
        }
    }

    fn render_list(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(chunks[1]);
        self.render_sidebar(frame, body[0]);
        self.render_links(frame, body[1]);

        // Status line: transient message, or a summary of the current view
        let status_text = match self.status_message {
            Some(ref message) => message.clone(),
            None => format!(
                "{} of {} links · sorted by {}",
                self.visible.len(),
                self.service.links().len(),
                self.sort_option.label()
            ),
        };
        let status_color = if status_text.starts_with('✗') {
            Color::Red
        } else if status_text.starts_with('✓') {
            Color::Green
        } else {
            Color::DarkGray
        };
        let status = Paragraph::new(status_text)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(status_color));
        frame.render_widget(status, chunks[2]);

        let help_text = if matches!(self.mode, AppMode::Search) {
            "type to search | Enter: apply | Esc: clear"
        } else {
            "n: new | Enter: edit | o: open | d: delete | /: search | h/l: category | s: sort | v: view | ?: help | q: quit"
        };
        let help = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22),
                Constraint::Min(0),
                Constraint::Length(26),
            ])
            .split(area);

        let title = Paragraph::new("🔗 LinkVault")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(title, chunks[0]);

        let search_text = if matches!(self.mode, AppMode::Search) {
            format!("🔍 {}_", self.input_buffer)
        } else if self.search_term.is_empty() {
            "🔍 press / to search".to_string()
        } else {
            format!("🔍 {}", self.search_term)
        };
        let search_style = if matches!(self.mode, AppMode::Search) || !self.search_term.is_empty() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let search = Paragraph::new(search_text)
            .block(Block::default().borders(Borders::ALL).title("Search"))
            .style(search_style);
        frame.render_widget(search, chunks[1]);

        let sort = Paragraph::new(self.sort_option.label())
            .block(Block::default().borders(Borders::ALL).title("Sort"))
            .style(Style::default().fg(Color::White));
        frame.render_widget(sort, chunks[2]);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let counts = self.service.link_count_by_category();
        let total = self.service.links().len();

        let mut items: Vec<ListItem> = Vec::new();
        let all_selected = self.selected_category == ALL_CATEGORIES;
        let all_style = if all_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(if all_selected { "▶ " } else { "  " }, all_style),
            Span::styled(format!("All Links ({})", total), all_style),
        ])));

        for category in self.service.categories() {
            let selected = self.selected_category == category.id;
            let accent = hex_color(&category.color);
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let count = counts.get(&category.id).copied().unwrap_or(0);
            let label = if count > 0 {
                format!("{} ({})", category.name, count)
            } else {
                category.name.clone()
            };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(if selected { "▶ " } else { "  " }, style),
                Span::styled("● ", Style::default().fg(accent)),
                Span::styled(label, style),
            ])));
        }

        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title("Categories"));
        frame.render_widget(list, area);
    }

    fn render_links(&self, frame: &mut Frame, area: Rect) {
        if self.visible.is_empty() {
            // Contextual empty-state hint
            let hint = if !self.search_term.is_empty() {
                "We couldn't find any links matching your search.\nTry different keywords or clear your search."
            } else if self.selected_category != ALL_CATEGORIES {
                "There are no links in this category yet.\nAdd some links or select a different category."
            } else {
                "Your link collection is empty.\nStart adding links to build your collection!"
            };
            let empty = Paragraph::new(hint)
                .block(Block::default().borders(Borders::ALL).title("No links found"))
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|link| match self.view_mode {
                ViewMode::Grid => self.card_item(link),
                ViewMode::List => self.row_item(link),
            })
            .collect();

        let view_label = match self.view_mode {
            ViewMode::Grid => "cards",
            ViewMode::List => "rows",
        };
        let title = format!("Links ({} found, {} view)", self.visible.len(), view_label);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray));

        let mut state = ListState::default();
        state.select(Some(self.selected_index));
        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Multi-line card presentation (grid view)
    fn card_item(&self, link: &Link) -> ListItem<'static> {
        let accent = hex_color(self.service.category_color(&link.category));
        let mut lines = vec![Line::from(vec![
            Span::styled("▌ ", Style::default().fg(accent)),
            Span::styled(
                link.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])];

        let mut meta = vec![
            Span::styled("  ", Style::default()),
            Span::styled(domain(&link.url), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  {}", format_date(link.created_at)),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if link.visit_count > 0 {
            let plural = if link.visit_count == 1 { "visit" } else { "visits" };
            meta.push(Span::styled(
                format!("  {} {}", link.visit_count, plural),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(meta));

        if !link.description.is_empty() || !link.tags.is_empty() {
            let mut detail = vec![Span::styled("  ", Style::default())];
            if !link.description.is_empty() {
                detail.push(Span::styled(
                    truncate(&link.description, 60),
                    Style::default().fg(Color::Gray),
                ));
            }
            detail.push(Span::styled(
                format_tags(&link.tags, 3),
                Style::default().fg(Color::Magenta),
            ));
            lines.push(Line::from(detail));
        }
        lines.push(Line::default());

        ListItem::new(lines)
    }

    /// Compact single-line presentation (list view)
    fn row_item(&self, link: &Link) -> ListItem<'static> {
        let accent = hex_color(self.service.category_color(&link.category));
        let mut spans = vec![
            Span::styled("▌ ", Style::default().fg(accent)),
            Span::styled(
                truncate(&link.title, 40),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", domain(&link.url)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("  {}", format_date(link.created_at)),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if link.visit_count > 0 {
            spans.push(Span::styled(
                format!("  {}↗", link.visit_count),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            format_tags(&link.tags, 2),
            Style::default().fg(Color::Magenta),
        ));
        ListItem::new(Line::from(spans))
    }

    fn render_form(&self, frame: &mut Frame) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let heading = Paragraph::new(form.heading())
            .block(Block::default().borders(Borders::ALL).title("LinkVault"))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(heading, chunks[0]);

        self.render_field(frame, chunks[1], form, FormField::Url, "URL", &form.url, &form.url_error);
        self.render_field(
            frame,
            chunks[2],
            form,
            FormField::Title,
            "Title",
            &form.title,
            &form.title_error,
        );
        self.render_field(
            frame,
            chunks[3],
            form,
            FormField::Description,
            "Description (optional)",
            &form.description,
            &None,
        );

        // Category picker shows the display name, cycled with ←/→
        let category_name = self
            .service
            .categories()
            .iter()
            .find(|category| category.id == form.category)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| form.category.clone());
        let accent = hex_color(self.service.category_color(&form.category));
        let category_line = Line::from(vec![
            Span::styled("● ", Style::default().fg(accent)),
            Span::styled(category_name, Style::default().fg(Color::White)),
            Span::styled("  ◂ ▸", Style::default().fg(Color::DarkGray)),
        ]);
        let category = Paragraph::new(category_line).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Category")
                .border_style(self.focus_style(form, FormField::Category)),
        );
        frame.render_widget(category, chunks[4]);

        let tag_prompt = format!("Tag: {}", form.tag_input);
        let tag_input = Paragraph::new(tag_prompt)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Tags (Enter adds, Del removes typed, Backspace pops last)")
                    .border_style(self.focus_style(form, FormField::Tags)),
            )
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(tag_input, chunks[5]);

        let tags_text = if form.tags.is_empty() {
            "No tags yet".to_string()
        } else {
            form.tags.join(", ")
        };
        let tags = Paragraph::new(tags_text)
            .block(Block::default().borders(Borders::ALL).title("Current Tags"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Magenta));
        frame.render_widget(tags, chunks[6]);

        let help = Paragraph::new(
            "Tab/↓: next field | Shift+Tab/↑: previous | Enter/Ctrl+S: save | Esc: cancel",
        )
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[7]);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &LinkForm,
        field: FormField,
        label: &str,
        value: &str,
        error: &Option<String>,
    ) {
        let title = match error {
            Some(message) => Line::from(vec![
                Span::raw(label.to_string()),
                Span::styled(
                    format!("  ✗ {}", message),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(label.to_string()),
        };
        let text = if form.focused == field {
            format!("{}_", value)
        } else {
            value.to_string()
        };
        let widget = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(self.focus_style(form, field)),
            )
            .style(Style::default().fg(Color::White));
        frame.render_widget(widget, area);
    }

    fn focus_style(&self, form: &LinkForm, field: FormField) -> Style {
        if form.focused == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_delete_confirm(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("🔗 LinkVault")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(title, chunks[0]);

        let message = if let Some(ref link) = self.pending_delete {
            format!(
                "Are you sure you want to delete this link?\n\n  {}\n  {}\n\nDeletion is permanent; there is no undo.\n\nPress Enter/y to confirm, Esc/n to cancel",
                link.title, link.url
            )
        } else {
            "Delete link?".to_string()
        };
        let confirm = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title("Confirm Delete"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Red));
        frame.render_widget(confirm, chunks[1]);

        let help = Paragraph::new("Enter/y: confirm | Esc/n: cancel")
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }

    fn render_help(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("🔗 LinkVault")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(title, chunks[0]);

        let lines = vec![
            Line::from("Browse"),
            Line::from("  j/k or ↓/↑      move selection"),
            Line::from("  h/l or ←/→      previous / next category"),
            Line::from("  /               search title, description, URL and tags"),
            Line::from("  s               cycle sort (newest, oldest, alphabetical, most visited)"),
            Line::from("  v               toggle cards / rows"),
            Line::from(""),
            Line::from("Manage"),
            Line::from("  n               add a new link"),
            Line::from("  Enter           edit the selected link"),
            Line::from("  o               open the selected link in the browser"),
            Line::from("  d               delete the selected link (asks first)"),
            Line::from(""),
            Line::from("  q or Esc        quit (Esc clears an active search first)"),
        ];
        let help_body = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Keys"))
            .style(Style::default().fg(Color::White));
        frame.render_widget(help_body, chunks[1]);

        let help = Paragraph::new("Esc: back")
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}

/// Parse "#rrggbb" into a terminal color, gray when it doesn't parse
fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Gray;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

fn format_date(epoch_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Up to `max` tags as "  #a  #b  #c  +2"
fn format_tags(tags: &[String], max: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for tag in tags.iter().take(max) {
        out.push_str(&format!("  #{}", tag));
    }
    if tags.len() > max {
        out.push_str(&format!("  +{}", tags.len() - max));
    }
    out
}
