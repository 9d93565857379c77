use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use bank_console::currency::format_currency;
use bank_console::dashboard::{Dashboard, Effect, Event};
use bank_console::effects::perform;
use bank_console::models::{AccountType, TransactionKind, SUPPORTED_CURRENCIES};
use bank_console::BankApi;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Customers,
    OpenAccount,
    Transactions,
    AllAccounts,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Customers,
        Page::OpenAccount,
        Page::Transactions,
        Page::AllAccounts,
    ];

    pub fn next(&self) -> Self {
        match self {
            Page::Customers => Page::OpenAccount,
            Page::OpenAccount => Page::Transactions,
            Page::Transactions => Page::AllAccounts,
            Page::AllAccounts => Page::Customers,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Customers => Page::AllAccounts,
            Page::OpenAccount => Page::Customers,
            Page::Transactions => Page::OpenAccount,
            Page::AllAccounts => Page::Transactions,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Customers => "Create Customer",
            Page::OpenAccount => "Open Account",
            Page::Transactions => "Accounts",
            Page::AllAccounts => "All Accounts",
        }
    }

    /// Focusable inputs, in focus order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Page::Customers => &[
                Field::FullName,
                Field::Email,
                Field::Phone,
                Field::Address,
                Field::CreateCustomer,
            ],
            Page::OpenAccount => &[
                Field::Customer,
                Field::AccountType,
                Field::Currency,
                Field::Balance,
                Field::Nickname,
                Field::OpenAccount,
            ],
            Page::Transactions => &[
                Field::Account,
                Field::Amount,
                Field::Note,
                Field::Deposit,
                Field::Withdraw,
                Field::TransferFrom,
                Field::TransferTo,
                Field::TransferAmount,
                Field::TransferNote,
                Field::Transfer,
            ],
            Page::AllAccounts => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Address,
    CreateCustomer,
    Customer,
    AccountType,
    Currency,
    Balance,
    Nickname,
    OpenAccount,
    Account,
    Amount,
    Note,
    Deposit,
    Withdraw,
    TransferFrom,
    TransferTo,
    TransferAmount,
    TransferNote,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    Button,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::CreateCustomer
            | Field::OpenAccount
            | Field::Deposit
            | Field::Withdraw
            | Field::Transfer => FieldKind::Button,
            Field::Customer
            | Field::AccountType
            | Field::Currency
            | Field::Account
            | Field::TransferFrom
            | Field::TransferTo => FieldKind::Select,
            _ => FieldKind::Text,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::CreateCustomer => "Create Customer",
            Field::Customer => "Customer",
            Field::AccountType => "Type",
            Field::Currency => "Currency",
            Field::Balance => "Initial Balance",
            Field::Nickname => "Nickname",
            Field::OpenAccount => "Open Account",
            Field::Account => "Account",
            Field::Amount | Field::TransferAmount => "Amount",
            Field::Note | Field::TransferNote => "Note",
            Field::Deposit => "Deposit",
            Field::Withdraw => "Withdraw",
            Field::TransferFrom => "From",
            Field::TransferTo => "To",
            Field::Transfer => "Transfer",
        }
    }

    /// Button caption while a request is in flight
    fn busy_label(&self) -> &'static str {
        match self {
            Field::CreateCustomer => "Creating...",
            Field::OpenAccount => "Opening...",
            Field::Transfer => "Transferring...",
            other => other.label(),
        }
    }
}

pub struct App {
    pub dashboard: Dashboard,
    pub current_page: Page,
    pub focus: usize,
    pub accounts_state: TableState,
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let mut accounts_state = TableState::default();
        accounts_state.select(Some(0));

        Self {
            dashboard,
            current_page: Page::Customers,
            focus: 0,
            accounts_state,
            should_quit: false,
        }
    }

    pub fn focused(&self) -> Option<Field> {
        self.current_page.fields().get(self.focus).copied()
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.focus = 0;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.focus = 0;
    }

    pub fn focus_next(&mut self) {
        let len = self.current_page.fields().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn focus_previous(&mut self) {
        let len = self.current_page.fields().len();
        if len > 0 {
            self.focus = if self.focus == 0 { len - 1 } else { self.focus - 1 };
        }
    }

    /// Map a key press to state changes; returns effects to run.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return Vec::new();
        }

        match key.code {
            KeyCode::Tab => {
                self.next_page();
                Vec::new()
            }
            KeyCode::BackTab => {
                self.previous_page();
                Vec::new()
            }
            KeyCode::Down if self.current_page == Page::AllAccounts => {
                self.scroll_accounts(1);
                Vec::new()
            }
            KeyCode::Up if self.current_page == Page::AllAccounts => {
                self.scroll_accounts(-1);
                Vec::new()
            }
            KeyCode::Down => {
                self.focus_next();
                Vec::new()
            }
            KeyCode::Up => {
                self.focus_previous();
                Vec::new()
            }
            KeyCode::Left => self.cycle_focused(false),
            KeyCode::Right => self.cycle_focused(true),
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Backspace => {
                if let Some(text) = self.focused().and_then(|f| self.text_mut(f)) {
                    text.pop();
                }
                Vec::new()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = self.focused().and_then(|f| self.text_mut(f)) {
                    text.push(c);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn scroll_accounts(&mut self, delta: isize) {
        let len = self.dashboard.accounts.len();
        if len == 0 {
            return;
        }
        let current = self.accounts_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.accounts_state.select(Some(next as usize));
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let d = &mut self.dashboard;
        match field {
            Field::FullName => Some(&mut d.customer_form.full_name),
            Field::Email => Some(&mut d.customer_form.email),
            Field::Phone => Some(&mut d.customer_form.phone),
            Field::Address => Some(&mut d.customer_form.address),
            Field::Balance => Some(&mut d.account_form.balance),
            Field::Nickname => Some(&mut d.account_form.nickname),
            Field::Amount => Some(&mut d.amount),
            Field::Note => Some(&mut d.note),
            Field::TransferAmount => Some(&mut d.transfer_form.amount),
            Field::TransferNote => Some(&mut d.transfer_form.note),
            _ => None,
        }
    }

    /// Enter on a button fires it; Enter inside a form submits that form.
    fn activate_focused(&mut self) -> Vec<Effect> {
        let Some(field) = self.focused() else {
            return Vec::new();
        };
        let d = &mut self.dashboard;
        match field {
            Field::FullName | Field::Email | Field::Phone | Field::Address | Field::CreateCustomer => {
                d.submit_customer()
            }
            Field::Customer
            | Field::AccountType
            | Field::Currency
            | Field::Balance
            | Field::Nickname
            | Field::OpenAccount => d.submit_account(),
            Field::Deposit => d.submit_transaction(TransactionKind::Deposit),
            Field::Withdraw => d.submit_transaction(TransactionKind::Withdraw),
            Field::TransferFrom
            | Field::TransferTo
            | Field::TransferAmount
            | Field::TransferNote
            | Field::Transfer => d.submit_transfer(),
            Field::Account | Field::Amount | Field::Note => Vec::new(),
        }
    }

    fn account_options(&self) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(self.dashboard.accounts.iter().map(|a| Some(a.id.clone())))
            .collect()
    }

    fn cycle_focused(&mut self, forward: bool) -> Vec<Effect> {
        let Some(field) = self.focused() else {
            return Vec::new();
        };
        match field {
            Field::Customer => {
                let options: Vec<Option<String>> = std::iter::once(None)
                    .chain(self.dashboard.customers.iter().map(|c| Some(c.id.clone())))
                    .collect();
                let next = cycle(&options, &self.dashboard.selected_customer, forward);
                self.dashboard.select_customer(next)
            }
            Field::AccountType => {
                let form = &mut self.dashboard.account_form;
                form.account_type = cycle(&AccountType::ALL, &form.account_type, forward);
                Vec::new()
            }
            Field::Currency => {
                let options: Vec<String> =
                    SUPPORTED_CURRENCIES.iter().map(|c| c.to_string()).collect();
                let form = &mut self.dashboard.account_form;
                form.currency = cycle(&options, &form.currency, forward);
                Vec::new()
            }
            Field::Account => {
                let options = self.account_options();
                let next = cycle(&options, &self.dashboard.selected_account, forward);
                self.dashboard.select_account(next);
                Vec::new()
            }
            Field::TransferFrom => {
                let options = self.account_options();
                let form = &mut self.dashboard.transfer_form;
                form.from_account_id = cycle(&options, &form.from_account_id, forward);
                Vec::new()
            }
            Field::TransferTo => {
                let options = self.account_options();
                let form = &mut self.dashboard.transfer_form;
                form.to_account_id = cycle(&options, &form.to_account_id, forward);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn account_caption(&self, id: Option<&str>, with_balance: bool) -> String {
        let Some(id) = id else {
            return "Select account".to_string();
        };
        match self.dashboard.accounts.iter().find(|a| a.id == id) {
            Some(a) if with_balance => format!(
                "{} • {}",
                a.label(),
                format_currency(a.balance, &a.currency)
            ),
            Some(a) => a.label().to_string(),
            None => id.to_string(),
        }
    }

    /// Text shown for a field
    pub fn field_value(&self, field: Field) -> String {
        let d = &self.dashboard;
        match field {
            Field::FullName => d.customer_form.full_name.clone(),
            Field::Email => d.customer_form.email.clone(),
            Field::Phone => d.customer_form.phone.clone(),
            Field::Address => d.customer_form.address.clone(),
            Field::Customer => match d.selected_customer.as_deref() {
                Some(id) => d.customer_name(id).unwrap_or(id).to_string(),
                None => "Select customer".to_string(),
            },
            Field::AccountType => d.account_form.account_type.title().to_string(),
            Field::Currency => d.account_form.currency.clone(),
            Field::Balance => d.account_form.balance.clone(),
            Field::Nickname => d.account_form.nickname.clone(),
            Field::Account => self.account_caption(d.selected_account.as_deref(), true),
            Field::Amount => d.amount.clone(),
            Field::Note => d.note.clone(),
            Field::TransferFrom => {
                self.account_caption(d.transfer_form.from_account_id.as_deref(), false)
            }
            Field::TransferTo => {
                self.account_caption(d.transfer_form.to_account_id.as_deref(), false)
            }
            Field::TransferAmount => d.transfer_form.amount.clone(),
            Field::TransferNote => d.transfer_form.note.clone(),
            Field::CreateCustomer
            | Field::OpenAccount
            | Field::Deposit
            | Field::Withdraw
            | Field::Transfer => String::new(),
        }
    }

    fn button_enabled(&self, field: Field) -> bool {
        match field {
            Field::Deposit | Field::Withdraw => self.dashboard.can_transact(),
            _ => !self.dashboard.loading,
        }
    }
}

/// Step through `options` from `current`, wrapping around. Unknown values
/// restart from the first option.
fn cycle<T: Clone + PartialEq>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    match options.iter().position(|o| o == current) {
        Some(i) if forward => options[(i + 1) % len].clone(),
        Some(i) => options[(i + len - 1) % len].clone(),
        None => options.first().cloned().unwrap_or_else(|| current.clone()),
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

pub async fn run_ui(api: Arc<dyn BankApi>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Spawn each effect as its own task; completions come back over `tx`.
/// Nothing is cancelled, so overlapping fetches resolve in arrival order.
fn dispatch(api: &Arc<dyn BankApi>, tx: &UnboundedSender<Event>, effects: Vec<Effect>) {
    for effect in effects {
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = perform(api.as_ref(), effect).await;
            // Receiver is gone only after the UI has exited
            let _ = tx.send(event);
        });
    }
}

fn drain(
    app: &mut App,
    rx: &mut UnboundedReceiver<Event>,
    api: &Arc<dyn BankApi>,
    tx: &UnboundedSender<Event>,
) {
    while let Ok(event) = rx.try_recv() {
        let follow_up = app.dashboard.apply(event);
        dispatch(api, tx, follow_up);
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    api: Arc<dyn BankApi>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (dashboard, effects) = Dashboard::mount();
    let mut app = App::new(dashboard);
    dispatch(&api, &tx, effects);
    info!("dashboard mounted");

    loop {
        drain(&mut app, &mut rx, &api, &tx);
        terminal.draw(|f| ui(f, &mut app))?;

        if app.should_quit {
            info!("dashboard closed");
            return Ok(());
        }

        let has_input = tokio::task::block_in_place(|| event::poll(Duration::from_millis(100)))?;
        if !has_input {
            continue;
        }
        if let TermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            debug!(code = ?key.code, "key");
            let effects = app.handle_key(key);
            dispatch(&api, &tx, effects);
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Customers => render_customers(f, chunks[1], app),
        Page::OpenAccount => render_open_account(f, chunks[1], app),
        Page::Transactions => render_transactions(f, chunks[1], app),
        Page::AllAccounts => render_accounts_table(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Customers: {}", app.dashboard.customers.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Accounts: {}", app.dashboard.accounts.len()),
        Style::default().fg(Color::White),
    ));
    if app.dashboard.loading {
        tab_spans.push(Span::raw("  "));
        tab_spans.push(Span::styled("⏳", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Bank Management "),
    );

    f.render_widget(header, area);
}

fn field_line(app: &App, field: Field) -> Line<'static> {
    let focused = app.focused() == Some(field);
    let marker = if focused {
        Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    };

    match field.kind() {
        FieldKind::Button => {
            let enabled = app.button_enabled(field);
            let caption = if app.dashboard.loading {
                field.busy_label()
            } else {
                field.label()
            };
            let color = match (enabled, field) {
                (false, _) => Color::DarkGray,
                (true, Field::Deposit) => Color::Green,
                (true, Field::Withdraw) => Color::Red,
                (true, _) => Color::Blue,
            };
            let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![marker, Span::styled(format!("[ {} ]", caption), style)])
        }
        FieldKind::Select => Line::from(vec![
            marker,
            Span::styled(
                format!("{}: ", field.label()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("‹ ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.field_value(field)),
            Span::styled(" ›", Style::default().fg(Color::DarkGray)),
        ]),
        FieldKind::Text => {
            let mut value = app.field_value(field);
            if focused {
                value.push('▏');
            }
            Line::from(vec![
                marker,
                Span::styled(
                    format!("{}: ", field.label()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ])
        }
    }
}

fn form_paragraph<'a>(app: &App, fields: &[Field], title: &'a str) -> Paragraph<'a> {
    let mut lines = vec![Line::from("")];
    for field in fields {
        lines.push(field_line(app, *field));
        lines.push(Line::from(""));
    }
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
}

fn split_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn render_customers(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = split_columns(area);
    f.render_widget(
        form_paragraph(app, Page::Customers.fields(), " Create Customer "),
        columns[0],
    );

    let header = Row::new(["Name", "Email", "Phone"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray));

    let rows = app.dashboard.customers.iter().map(|c| {
        Row::new(vec![
            Cell::from(truncate(&c.full_name, 24)),
            Cell::from(truncate(&c.email, 28)),
            Cell::from(c.phone.clone().unwrap_or_default()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Customers "),
    );

    f.render_widget(table, columns[1]);
}

fn render_open_account(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = split_columns(area);
    f.render_widget(
        form_paragraph(app, Page::OpenAccount.fields(), " Open Account "),
        columns[0],
    );

    let title = match app.dashboard.selected_customer.as_deref() {
        Some(id) => format!(
            " Accounts of {} ",
            app.dashboard.customer_name(id).unwrap_or(id)
        ),
        None => " Accounts (all customers) ".to_string(),
    };
    let lines: Vec<Line> = app
        .dashboard
        .accounts
        .iter()
        .map(|a| {
            Line::from(vec![
                Span::raw("  "),
                Span::raw(a.label().to_string()),
                Span::raw("  "),
                Span::styled(
                    format_currency(a.balance, &a.currency),
                    Style::default().fg(Color::Green),
                ),
            ])
        })
        .collect();

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    );
    f.render_widget(list, columns[1]);
}

fn render_transactions(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = split_columns(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(columns[0]);

    // Only ever a backend-provided value
    let balance = match app.dashboard.selected_account() {
        Some(a) => format_currency(a.balance, &a.currency),
        None => "—".to_string(),
    };
    let balance_panel = Paragraph::new(vec![Line::from(vec![Span::styled(
        format!("  {}", balance),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Balance "),
    );
    f.render_widget(balance_panel, left[0]);

    let fields = Page::Transactions.fields();
    f.render_widget(form_paragraph(app, &fields[..5], " Deposit / Withdraw "), left[1]);
    f.render_widget(form_paragraph(app, &fields[5..], " Transfer "), columns[1]);
}

fn render_accounts_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Customer", "Nickname", "Type", "Balance"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.dashboard.accounts.iter().map(|a| {
        let customer = app.dashboard.customer_name(&a.customer_id).unwrap_or("—");
        let nickname = match a.nickname.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => "—",
        };
        let color = if a.balance.unwrap_or(0.0) < 0.0 {
            Color::Red
        } else {
            Color::Green
        };

        Row::new(vec![
            Cell::from(truncate(customer, 28)),
            Cell::from(truncate(nickname, 20)),
            Cell::from(a.account_type.title()),
            Cell::from(format_currency(a.balance, &a.currency)).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" All Accounts "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.accounts_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.dashboard.message),
        Style::default().fg(Color::Green),
    )];

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Field | "));
    status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Choose | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Submit | "));
    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
