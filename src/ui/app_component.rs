use crate::api::{AgencyApi, ClientQuery, OfferQuery, SubmissionOutcome, TourFilter};
use crate::config::Config;
use crate::constants::{ERROR_SECTION_FORBIDDEN, INFO_NO_FILTERS};
use crate::forms::FormKind;
use crate::listing::{ClientSort, InsuranceRecord, InsuranceSort, ListModel, OfferSort, TourSort};
use crate::logger::Logger;
use crate::models::{ClientCard, TourCard, TourOffer};
use crate::session::{Section, SessionStore, UserSession};
use crate::ui::components::{DialogComponent, EntityListComponent, SidebarComponent, StatusBar};
use crate::ui::core::{
    actions::{Action, DialogType, ListPayload, ListRequest},
    event_handler::EventType,
    task_manager::TaskManager,
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Current query of each server-filtered list
#[derive(Debug, Clone, Default)]
pub struct ListQueries {
    pub clients: ClientQuery,
    pub offers: OfferQuery,
    pub tours: TourFilter,
}

pub struct AppComponent {
    // Component composition
    sidebar: SidebarComponent,
    clients: EntityListComponent<ClientCard>,
    offers: EntityListComponent<TourOffer>,
    tours: EntityListComponent<TourCard>,
    insurance: EntityListComponent<InsuranceRecord>,
    dialog: DialogComponent,
    status: StatusBar,

    // Application state
    session: UserSession,
    active: Section,
    queries: ListQueries,
    sidebar_width: u16,

    // Services
    store: SessionStore,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,

    should_quit: bool,
}

impl AppComponent {
    pub fn new(config: &Config, session: UserSession, store: SessionStore, api: Arc<dyn AgencyApi>, logger: Logger) -> Self {
        let page_size = config.ui.page_size;
        let display = config.display.clone();
        let (task_manager, background_action_rx) = TaskManager::new(api);

        let sidebar = SidebarComponent::new(session.clone());
        let active = sidebar.selection;

        let mut dialog = DialogComponent::new(config.api.employee_id);
        dialog.set_logger(logger);

        Self {
            sidebar,
            clients: EntityListComponent::new(
                Section::ClientInfo,
                ListModel::new(ClientSort::LastName).with_page_size(page_size),
                display.clone(),
            ),
            offers: EntityListComponent::new(
                Section::TourOffers,
                ListModel::new(OfferSort::Country).with_page_size(page_size),
                display.clone(),
            ),
            tours: EntityListComponent::new(
                Section::Tours,
                ListModel::new(TourSort::StartDate)
                    .with_page_size(page_size)
                    .with_single_expand(),
                display.clone(),
            ),
            insurance: EntityListComponent::new(
                Section::Insurance,
                ListModel::new(InsuranceSort::Client).with_page_size(page_size),
                display,
            ),
            dialog,
            status: StatusBar::new(),
            session,
            active,
            queries: ListQueries::default(),
            sidebar_width: config.ui.sidebar_width,
            store,
            task_manager,
            background_action_rx,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn active_section(&self) -> Section {
        self.active
    }

    pub fn queries(&self) -> &ListQueries {
        &self.queries
    }

    pub fn clients(&self) -> &ListModel<ClientCard> {
        self.clients.model()
    }

    pub fn offers(&self) -> &ListModel<TourOffer> {
        self.offers.model()
    }

    pub fn tours(&self) -> &ListModel<TourCard> {
        self.tours.model()
    }

    pub fn insurance(&self) -> &ListModel<InsuranceRecord> {
        self.insurance.model()
    }

    pub fn dialog(&self) -> &DialogComponent {
        &self.dialog
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    /// Get the number of requests still running
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Load the first section on startup
    pub fn start(&mut self) {
        log::info!(
            "Signed in as {} ({}), opening {}",
            self.session.username,
            self.session.role,
            self.active.title()
        );
        self.load_section(self.active);
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('L') => Action::Logout,
            _ => Action::None,
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        // Dialog has priority when visible
        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        let sidebar_action = self.sidebar.handle_key_events(key);
        if !matches!(sidebar_action, Action::None) {
            return sidebar_action;
        }

        let list_action = self.active_list().handle_key_events(key);
        if !matches!(list_action, Action::None) {
            return list_action;
        }

        self.handle_global_key(key)
    }

    fn active_list(&mut self) -> &mut dyn Component {
        match self.active {
            Section::ClientInfo => &mut self.clients,
            Section::TourOffers => &mut self.offers,
            Section::Tours => &mut self.tours,
            Section::Insurance => &mut self.insurance,
        }
    }

    /// Start a fresh load of a section's list
    fn load_section(&mut self, section: Section) {
        let request = match section {
            Section::ClientInfo => ListRequest::Clients(self.queries.clients.clone()),
            Section::TourOffers => ListRequest::Offers(self.queries.offers.clone()),
            Section::Tours if self.queries.tours.is_empty() => {
                ListRequest::Tours(self.tours.model().search_term().to_string())
            }
            Section::Tours => ListRequest::ToursFiltered(self.queries.tours.clone()),
            Section::Insurance => ListRequest::Clients(ClientQuery::search(self.insurance.model().search_term())),
        };
        let generation = match section {
            Section::ClientInfo => self.clients.model_mut().begin_load(),
            Section::TourOffers => self.offers.model_mut().begin_load(),
            Section::Tours => self.tours.model_mut().begin_load(),
            Section::Insurance => self.insurance.model_mut().begin_load(),
        };
        self.task_manager.spawn_list_load(section, generation, request);
    }

    fn apply_search(&mut self, section: Section, term: String) {
        let changed = match section {
            Section::ClientInfo => {
                self.queries.clients.search_term = term.clone();
                self.clients.model_mut().set_search_term(term)
            }
            Section::TourOffers => {
                self.queries.offers.search_term = term.clone();
                self.offers.model_mut().set_search_term(term)
            }
            Section::Tours => {
                if !self.queries.tours.is_empty() {
                    log::info!("Search replaces the active tour filters");
                    self.queries.tours = TourFilter::default();
                }
                self.tours.model_mut().set_search_term(term)
            }
            Section::Insurance => self.insurance.model_mut().set_search_term(term),
        };
        if changed {
            self.load_section(section);
        }
    }

    fn filter_dialog(&self) -> Action {
        let kind = match self.active {
            Section::ClientInfo => FormKind::ClientFilter(self.queries.clients.clone()),
            Section::TourOffers => FormKind::OfferFilter(self.queries.offers.clone()),
            Section::Tours => FormKind::TourFilter(self.queries.tours.clone()),
            Section::Insurance => return Action::ShowDialog(DialogType::Info(INFO_NO_FILTERS.to_string())),
        };
        Action::ShowDialog(DialogType::Form(kind))
    }

    fn apply_list(&mut self, section: Section, generation: u64, result: Result<ListPayload, String>) {
        let payload = match result {
            Ok(payload) => payload,
            Err(message) => {
                match section {
                    Section::ClientInfo => self.clients.model_mut().fail(generation),
                    Section::TourOffers => self.offers.model_mut().fail(generation),
                    Section::Tours => self.tours.model_mut().fail(generation),
                    Section::Insurance => self.insurance.model_mut().fail(generation),
                }
                self.status
                    .error(format!("❌ Failed to load {}: {}", section.title().to_lowercase(), message));
                return;
            }
        };

        let count = payload.len();
        let accepted = match (section, payload) {
            (Section::ClientInfo, ListPayload::Clients(clients)) => self.clients.model_mut().accept(generation, clients),
            (Section::Insurance, ListPayload::Clients(clients)) => self
                .insurance
                .model_mut()
                .accept(generation, InsuranceRecord::from_clients(&clients)),
            (Section::TourOffers, ListPayload::Offers(offers)) => self.offers.model_mut().accept(generation, offers),
            (Section::Tours, ListPayload::Tours(tours)) => self.tours.model_mut().accept(generation, tours),
            (section, _) => {
                log::warn!("Unexpected payload for {}", section.title());
                false
            }
        };
        if accepted {
            log::info!("Loaded {} {}", count, section.title().to_lowercase());
        }
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) {
        self.status.success(outcome.success_message());
        match outcome {
            SubmissionOutcome::ClientCreated(client) => self.clients.model_mut().prepend(client),
            SubmissionOutcome::ClientUpdated(client) => self.clients.model_mut().upsert(client),
            SubmissionOutcome::PurchaseAdded { client_id, purchase } => {
                if let Some(mut client) = self.clients.model().find(&client_id).cloned() {
                    client.purchases.push(purchase);
                    self.clients.model_mut().upsert(client);
                }
            }
            SubmissionOutcome::OfferCreated(offer) => self.offers.model_mut().prepend(offer),
            SubmissionOutcome::OfferUpdated(offer) => self.offers.model_mut().upsert(offer),
            SubmissionOutcome::TourCreated(tour) => self.tours.model_mut().prepend(tour),
            SubmissionOutcome::TourUpdated(tour) => self.tours.model_mut().upsert(tour),
            SubmissionOutcome::ClientsFiltered { query, clients } => {
                self.clients.model_mut().set_search_term(query.search_term.clone());
                self.clients.model_mut().replace(clients);
                self.queries.clients = query;
            }
            SubmissionOutcome::OffersFiltered { query, offers } => {
                self.offers.model_mut().set_search_term(query.search_term.clone());
                self.offers.model_mut().replace(offers);
                self.queries.offers = query;
            }
            SubmissionOutcome::ToursFiltered { filter, tours } => {
                // Filtered tours come from a different endpoint without a search term
                self.tours.model_mut().set_search_term("");
                self.tours.model_mut().replace(tours);
                self.queries.tours = filter;
            }
        }
    }

    /// Handle actions no component consumed; may return a follow-up action
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::NavigateToSection(section) => {
                if !self.session.role.can_access(section) {
                    log::warn!(
                        "{} ({}) may not open {}",
                        self.session.username,
                        self.session.role,
                        section.title()
                    );
                    self.status.error(ERROR_SECTION_FORBIDDEN);
                    return Action::None;
                }
                self.active = section;
                self.load_section(section);
                Action::None
            }
            Action::ReloadList => {
                self.load_section(self.active);
                Action::None
            }
            Action::SearchChanged { section, term } => {
                self.apply_search(section, term);
                Action::None
            }
            Action::OpenFilters => self.filter_dialog(),
            Action::ListLoaded {
                section,
                generation,
                result,
            } => {
                self.apply_list(section, generation, result);
                Action::None
            }
            Action::RunLookups { form, lookups } => {
                for lookup in lookups {
                    self.task_manager.spawn_lookup(form, lookup);
                }
                Action::None
            }
            Action::Submit { id, submission } => {
                self.task_manager.spawn_submission(id, submission);
                Action::None
            }
            Action::SubmissionCompleted { outcome, .. } => {
                self.apply_outcome(outcome);
                Action::None
            }
            Action::SubmissionFailed { message, .. } => {
                self.status.error(message);
                Action::None
            }
            Action::Logout => {
                match self.store.clear() {
                    Ok(()) => log::info!("Logged out {}", self.session.username),
                    Err(e) => log::error!("Failed to clear session: {:#}", e),
                }
                self.should_quit = true;
                Action::None
            }
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Run an action through the components, then the app, until settled
    pub fn dispatch(&mut self, action: Action) {
        let mut action = action;
        while !matches!(action, Action::None) && !self.should_quit {
            let unhandled = self.update(action);
            action = self.handle_app_action(unhandled);
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> usize {
        let mut received = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            received.push(action);
        }
        let count = received.len();
        for action in received {
            self.dispatch(action);
        }

        let finished = self.task_manager.cleanup_finished_tasks();
        if finished > 0 {
            log::debug!("Background: cleaned up {} finished tasks", finished);
        }
        count
    }

    /// Check if any background operations are running
    pub fn is_busy(&self) -> bool {
        self.task_manager.task_count() > 0
    }

    /// Whether the screen changes over time without input
    pub fn wants_tick_render(&self) -> bool {
        self.is_busy() || self.status.message().is_some()
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) {
        let action = match event_type {
            EventType::Key(key) => self.route_key(key),
            EventType::Mouse(mouse) if !self.dialog.is_visible() => match mouse.kind {
                MouseEventKind::ScrollDown => Action::NextItem,
                MouseEventKind::ScrollUp => Action::PreviousItem,
                _ => Action::None,
            },
            _ => Action::None,
        };
        self.dispatch(action);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.route_key(key)
    }

    fn update(&mut self, action: Action) -> Action {
        // Process through component hierarchy
        let action = self.dialog.update(action);
        let action = self.sidebar.update(action);

        // Return for app-level handling
        self.active_list().update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (top, status_area) = LayoutManager::main_layout(rect);
        let sidebar_width = LayoutManager::sidebar_width(self.sidebar_width, rect.width);
        let (sidebar_area, main_area) = LayoutManager::top_pane_layout(top, sidebar_width);

        self.sidebar.render(f, sidebar_area);
        self.active_list().render(f, main_area);
        self.status.render(f, status_area, self.task_manager.task_count());

        // Render dialog on top if visible
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }
}
