//! Table session orchestration
//!
//! One task per open table serialises every state mutation: store pushes
//! and user commands arrive through the same `select!` loop, so the menu
//! tree, accordion and cart never need locking. Printer I/O is the only
//! work that leaves the loop, and the delta markers advance strictly after
//! the transport confirmed delivery.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use shared::models::{Course, Department, MenuItem, MenuSize, OrderLine};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use gasthaus_printer::{NetworkPrinter, Printer};

use crate::config::{Config, PrintMode};
use crate::menu::{AccordionState, MenuRow, MenuTree, Section, SortRules, flatten};
use crate::orders::{self, DecrementOutcome, OrderCart};
use crate::printing::{PagedDocument, PageRenderer, Receipt, TicketDelta, TicketRenderer};
use crate::store::{FloorStore, MenuStore, OrderStore, TablePath};

/// User input, one message per tap
#[derive(Debug, Clone)]
pub enum SessionCommand {
    SelectTab(Section),
    ToggleCategory(String),
    TogglePath(String),
    ToggleFoodGroup(String),
    AddItem {
        item: MenuItem,
        size: Option<MenuSize>,
    },
    Decrement {
        key: String,
    },
    /// The confirmed removal after [`SessionEvent::ConfirmRemoval`]
    ConfirmZero {
        key: String,
    },
    SetNote {
        key: String,
        note: String,
    },
    Send,
    PaySplit(Vec<orders::SplitSelection>),
    Pay,
}

/// Output towards the embedding UI
#[derive(Debug, Clone)]
pub enum SessionEvent {
    MenuRows(Vec<MenuRow>),
    OrderView {
        lines: Vec<(String, OrderLine)>,
        total: Decimal,
    },
    /// Decrement at quantity 1: ask the user, then send `ConfirmZero`
    ConfirmRemoval {
        key: String,
        name: String,
    },
    NothingToSend,
    Sent {
        tickets: usize,
    },
    /// Paged print job for the platform spooler
    SpoolDocument(PagedDocument),
    Paid {
        history_id: String,
    },
    Error(String),
}

/// One table's serialized control loop
pub struct TableSession<S> {
    store: Arc<S>,
    config: Config,
    table: TablePath,
    events: mpsc::Sender<SessionEvent>,

    rules: SortRules,
    tree: MenuTree,
    accordion: AccordionState,
    section: Section,
    cart: OrderCart,
}

impl<S> TableSession<S>
where
    S: MenuStore + OrderStore + FloorStore,
{
    pub fn new(
        store: Arc<S>,
        config: Config,
        table: TablePath,
        events: mpsc::Sender<SessionEvent>,
    ) -> Self {
        Self {
            store,
            config,
            table,
            events,
            rules: SortRules::standard(),
            tree: MenuTree::default(),
            accordion: AccordionState::new(),
            section: Section::Drinks,
            cart: OrderCart::new(),
        }
    }

    /// Run until the command channel closes or shutdown is requested
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        shutdown: CancellationToken,
    ) {
        let mut menu_rx = match self.store.observe_menu().await {
            Ok(rx) => rx,
            Err(e) => {
                self.emit(SessionEvent::Error(format!("Menü Fehler: {}", e))).await;
                return;
            }
        };
        let mut order_rx = match self.store.observe_items(&self.table).await {
            Ok(rx) => rx,
            Err(e) => {
                self.emit(SessionEvent::Error(format!("Order Fehler: {}", e))).await;
                return;
            }
        };

        // Derive initial state from whatever the store already holds
        self.tree = MenuTree::build(&menu_rx.borrow_and_update().root, &self.rules);
        self.cart
            .apply_snapshot(order_rx.borrow_and_update().items.clone());
        self.emit_menu_rows().await;
        self.emit_order_view().await;

        info!(table = %self.table, "table session started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(table = %self.table, "table session shutting down");
                    break;
                }
                changed = menu_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = menu_rx.borrow_and_update().clone();
                    self.tree = MenuTree::build(&snapshot.root, &self.rules);
                    self.emit_menu_rows().await;
                }
                changed = order_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = order_rx.borrow_and_update().clone();
                    self.cart.apply_snapshot(snapshot.items);
                    self.sync_occupied_flag().await;
                    self.emit_order_view().await;
                }
                cmd = commands.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => break,
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::SelectTab(section) => {
                self.section = section;
                self.accordion.reset();
                self.emit_menu_rows().await;
            }
            SessionCommand::ToggleCategory(key) => {
                self.accordion.toggle_category(&key);
                self.emit_menu_rows().await;
            }
            SessionCommand::TogglePath(path) => {
                self.accordion.toggle_path(&path);
                self.emit_menu_rows().await;
            }
            SessionCommand::ToggleFoodGroup(key) => {
                self.accordion.toggle_food_group(&key);
                self.emit_menu_rows().await;
            }
            SessionCommand::AddItem { item, size } => self.add_item(item, size.as_ref()).await,
            SessionCommand::Decrement { key } => self.decrement(&key).await,
            SessionCommand::ConfirmZero { key } => {
                if let Some(line) = self.cart.plan_zero(&key) {
                    self.persist_line(&key, line).await;
                }
            }
            SessionCommand::SetNote { key, note } => {
                if let Some(line) = self.cart.plan_note(&key, &note) {
                    self.persist_line(&key, line).await;
                }
            }
            SessionCommand::Send => self.send_order().await,
            SessionCommand::PaySplit(selection) => self.pay_split(&selection).await,
            SessionCommand::Pay => self.pay().await,
        }
    }

    // ===================== Menu / cart plumbing =====================

    async fn emit_menu_rows(&self) {
        let rows = flatten(&self.tree, self.section, &self.accordion);
        self.emit(SessionEvent::MenuRows(rows)).await;
    }

    async fn emit_order_view(&self) {
        let lines = self
            .cart
            .visible_lines()
            .into_iter()
            .map(|(k, line)| (k.to_string(), line.clone()))
            .collect();
        self.emit(SessionEvent::OrderView {
            lines,
            total: self.cart.total(),
        })
        .await;
    }

    async fn sync_occupied_flag(&self) {
        let occupied = !self.cart.is_empty();
        if let Err(e) = self
            .store
            .set_occupied(&self.table.room, &self.table.table, occupied)
            .await
        {
            warn!(table = %self.table, error = %e, "failed to sync occupied flag");
        }
    }

    /// Department follows the browsed tab; the course comes from the item's
    /// own food category, falling back to the open category for items whose
    /// menu path is unknown.
    async fn add_item(&mut self, item: MenuItem, size: Option<&MenuSize>) {
        let dept = match self.section {
            Section::Drinks => Department::Bar,
            Section::Foods => Department::Kitchen,
        };

        let course = if dept == Department::Kitchen {
            self.tree
                .food_category_of(&item.id)
                .or(self.accordion.open_category())
                .map(course_for_category)
        } else {
            None
        };

        let (key, line) = self.cart.plan_add(&item, size, dept, course);
        self.persist_line(&key, line).await;
    }

    async fn decrement(&mut self, key: &str) {
        match self.cart.plan_decrement(key) {
            DecrementOutcome::Reduced(line) => self.persist_line(key, line).await,
            DecrementOutcome::NeedsConfirmation => {
                let name = self
                    .cart
                    .get(key)
                    .map(|l| l.name.clone())
                    .unwrap_or_default();
                self.emit(SessionEvent::ConfirmRemoval {
                    key: key.to_string(),
                    name,
                })
                .await;
            }
            DecrementOutcome::NotFound => {}
        }
    }

    async fn persist_line(&mut self, key: &str, line: OrderLine) {
        match self.store.put_line(&self.table, key, line.clone()).await {
            Ok(()) => self.cart.apply_line(key, line),
            Err(e) => {
                warn!(table = %self.table, key, error = %e, "write failed");
                self.emit(SessionEvent::Error(format!("Speichern fehlgeschlagen: {}", e)))
                    .await;
            }
        }
    }

    // ===================== Send / print =====================

    async fn send_order(&mut self) {
        let plan = orders::compute_send_plan(self.cart.lines());
        if plan.is_empty() {
            self.emit(SessionEvent::NothingToSend).await;
            return;
        }

        let delivered = match self.config.print_mode {
            PrintMode::EscPosTcp => self.print_escpos(&plan.tickets).await,
            PrintMode::Paged => self.spool_paged(&plan.tickets).await,
        };

        if !delivered {
            // Markers untouched: the next send recomputes the same delta
            return;
        }

        match self
            .store
            .apply_sent_markers(&self.table, &plan.markers)
            .await
        {
            Ok(()) => self.cart.apply_sent_markers(&plan.markers),
            Err(e) => {
                // Tickets are out but the markers did not stick; the next
                // send duplicates them, which is the acceptable direction
                // of failure.
                warn!(table = %self.table, error = %e, "failed to persist sent markers");
                self.emit(SessionEvent::Error(format!(
                    "Bestellung gedruckt, Markierung fehlgeschlagen: {}",
                    e
                )))
                .await;
                return;
            }
        }

        self.emit(SessionEvent::Sent {
            tickets: plan.tickets.len(),
        })
        .await;
    }

    /// Thermal path: every ticket must deliver before any marker advances
    async fn print_escpos(&self, tickets: &[TicketDelta]) -> bool {
        let renderer = TicketRenderer::new(self.config.paper_width);
        let now = chrono::Local::now();

        for ticket in tickets {
            let receipt = Receipt::for_delta(&self.table.table, &self.table.room, ticket, now);
            let data = renderer.render(&receipt);

            let printer = match self.printer_for(ticket.dept) {
                Ok(p) => p,
                Err(e) => {
                    self.emit(SessionEvent::Error(format!("Drucker-Konfiguration: {}", e)))
                        .await;
                    return false;
                }
            };

            if let Err(e) = printer.print(&data).await {
                warn!(table = %self.table, dept = ?ticket.dept, error = %e, "print failed");
                self.emit(SessionEvent::Error(
                    "Druck fehlgeschlagen (IP/Netz/Port prüfen).".to_string(),
                ))
                .await;
                return false;
            }
        }
        true
    }

    /// Paged path: each ticket becomes a two-page job (bar tray page +
    /// kitchen tray page); handing it to the spooler counts as delivered.
    async fn spool_paged(&self, tickets: &[TicketDelta]) -> bool {
        let renderer = PageRenderer::new();
        let now = chrono::Local::now();

        for ticket in tickets {
            let receipt = Receipt::for_delta(&self.table.table, &self.table.room, ticket, now);
            let blank = |dept| {
                Receipt::for_delta(
                    &self.table.table,
                    &self.table.room,
                    &TicketDelta {
                        dept,
                        course: None,
                        lines: Vec::new(),
                    },
                    now,
                )
            };

            let doc = match ticket.dept {
                Department::Bar => renderer.render_pair(&receipt, &blank(Department::Kitchen)),
                Department::Kitchen => renderer.render_pair(&blank(Department::Bar), &receipt),
            };
            self.emit(SessionEvent::SpoolDocument(doc)).await;
        }
        true
    }

    fn printer_for(&self, dept: Department) -> shared::AppResult<NetworkPrinter> {
        let ip = match dept {
            Department::Bar => &self.config.bar_printer_ip,
            Department::Kitchen => &self.config.kitchen_printer_ip,
        };
        NetworkPrinter::new(ip, self.config.printer_port)
            .map(|p| p.with_timeout(Duration::from_millis(self.config.printer_timeout_ms)))
            .map_err(|e| shared::AppError::print(e.to_string()))
    }

    // ===================== Payment =====================

    async fn pay_split(&mut self, selection: &[orders::SplitSelection]) {
        let updates = match orders::plan_partial_payment(self.cart.lines(), selection) {
            Ok(updates) => updates,
            Err(e) => {
                self.emit(SessionEvent::Error(e.to_string())).await;
                return;
            }
        };

        match self.store.apply_qty_updates(&self.table, &updates).await {
            Ok(()) => self.cart.apply_qty_updates(&updates),
            Err(e) => {
                self.emit(SessionEvent::Error(format!("Teilzahlung fehlgeschlagen: {}", e)))
                    .await;
            }
        }
    }

    async fn pay(&mut self) {
        match orders::close_order(self.store.as_ref(), &self.table, self.cart.lines()).await {
            Ok(history_id) => {
                self.cart.clear();
                self.emit(SessionEvent::Paid { history_id }).await;
            }
            Err(e) => self.emit(SessionEvent::Error(e.to_string())).await,
        }
    }

    async fn emit(&self, event: SessionEvent) {
        // A gone UI is not an error the loop can act on
        let _ = self.events.send(event).await;
    }
}

/// Course of a food category: starters and soups fire first, desserts
/// last, everything else is a main.
pub fn course_for_category(category_key: &str) -> Course {
    match category_key {
        "vorspeisen" | "suppen" => Course::Starter,
        "nachspeisen" => Course::Dessert,
        _ => Course::Main,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_for_category() {
        assert_eq!(course_for_category("vorspeisen"), Course::Starter);
        assert_eq!(course_for_category("suppen"), Course::Starter);
        assert_eq!(course_for_category("nachspeisen"), Course::Dessert);
        assert_eq!(course_for_category("hauptspeisen"), Course::Main);
        assert_eq!(course_for_category("salate"), Course::Main);
    }
}
