//! Session controller.
//!
//! Every player action enters through [`SessionController`], which owns the
//! whole [`SessionState`]. Errors never escape as failures of the game: each is
//! turned into a [`Notice`] and also returned so callers and tests can react.

use std::rc::Rc;

use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::draw::schedule::Scheduler;
use crate::draw::{DrawEngine, DrawId, DrawOutcome, DrawPhase, DrawSignal, DrawSink};
use crate::effects::{Celebration, ConfettiBurst};
use crate::error::GameError;
use crate::pricing;
use crate::state::{SelectionSet, UserProfile, Wallet};
use crate::util::{format_currency, parse_amount};

/// Everything one player session mutates.
pub struct SessionState<S: Scheduler> {
    pub selection: SelectionSet,
    pub wallet: Wallet,
    pub profile: Option<UserProfile>,
    pub draw: DrawEngine<S>,
}

impl<S: Scheduler> SessionState<S> {
    pub fn new(config: &GameConfig, scheduler: S) -> Self {
        Self {
            selection: SelectionSet::new(config.total_cells),
            wallet: Wallet::default(),
            profile: None,
            draw: DrawEngine::new(scheduler, config.draw, config.total_cells),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient message; a newer one replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    Hidden,
    Matching,
    Won,
    Lost,
}

impl DrawStatus {
    pub fn text(&self) -> &'static str {
        match self {
            DrawStatus::Hidden => "",
            DrawStatus::Matching => "Matching...",
            DrawStatus::Won => "CONGRATULATIONS! You won!",
            DrawStatus::Lost => "No win this time, try again",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawView {
    pub visible: bool,
    pub number: Option<u32>,
    pub status: DrawStatus,
    pub winner_marker: bool,
    pub finish_visible: bool,
}

/// Read-only values for the rendering surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionView {
    pub selected: Vec<bool>,
    pub selected_count: usize,
    pub remaining_count: usize,
    pub current_cost: u64,
    pub balance_display: String,
    pub points_display: String,
    pub pay_enabled: bool,
    pub pay_label: String,
    pub registration_open: bool,
    pub notice: Option<Notice>,
    pub draw: DrawView,
}

pub struct SessionController<S: Scheduler, C: Celebration> {
    state: SessionState<S>,
    config: GameConfig,
    rng: SmallRng,
    celebration: C,
    sink: DrawSink,
    notice: Option<Notice>,
    notice_seq: u64,
    registration_open: bool,
    outcome_panel: bool,
}

impl<S: Scheduler, C: Celebration> SessionController<S, C> {
    pub fn new(config: GameConfig, scheduler: S, celebration: C, rng: SmallRng) -> Self {
        Self {
            state: SessionState::new(&config, scheduler),
            config,
            rng,
            celebration,
            sink: Rc::new(|_| {}),
            notice: None,
            notice_seq: 0,
            registration_open: false,
            outcome_panel: false,
        }
    }

    /// Routes scheduled draw callbacks back into [`Self::handle_signal`].
    /// Draws started before a sink is connected never progress.
    pub fn connect(&mut self, sink: DrawSink) {
        self.sink = sink;
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState<S> {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_cost(&self) -> u64 {
        pricing::cost(self.state.selection.size(), self.config.unit_price)
    }

    fn notify(&mut self, kind: NoticeKind, text: String) {
        self.notice_seq += 1;
        self.notice = Some(Notice {
            seq: self.notice_seq,
            kind,
            text,
        });
    }

    fn fail<T>(&mut self, err: GameError) -> Result<T, GameError> {
        warn!(%err, "action rejected");
        self.notify(NoticeKind::Error, err.notice_text());
        Err(err)
    }

    /// Clears the notice unless a newer one has replaced it.
    pub fn dismiss_notice(&mut self, seq: u64) {
        if self.notice.as_ref().is_some_and(|n| n.seq == seq) {
            self.notice = None;
        }
    }

    /// Applies a resolved grid toggle. Selection is frozen while a draw runs.
    pub fn toggle_cell(&mut self, index: usize, on: bool) -> Result<bool, GameError> {
        if !self.state.draw.is_idle() {
            debug!(index, "toggle ignored during draw");
            return Err(GameError::DrawInProgress);
        }
        let changed = self.state.selection.toggle(index, on)?;
        if changed {
            debug!(index, on, count = self.state.selection.size(), "cell toggled");
        }
        Ok(changed)
    }

    pub fn on_recharge(&mut self, input: &str) -> Result<u64, GameError> {
        let Some(amount) = parse_amount(input) else {
            return self.fail(GameError::InvalidAmount);
        };
        if self.state.profile.is_none() {
            self.registration_open = true;
            return self.fail(GameError::RegistrationRequired);
        }
        match self.state.wallet.recharge(self.state.profile.as_ref(), amount) {
            Ok(balance) => {
                info!(amount, balance, "recharged");
                self.notify(NoticeKind::Info, format!("Energy recharged +{amount}"));
                Ok(balance)
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn on_register(&mut self, name: &str, phone: &str, email: &str) -> Result<(), GameError> {
        if self.state.profile.is_some() {
            self.registration_open = false;
            self.notify(NoticeKind::Info, "Already registered".to_string());
            return Ok(());
        }
        let profile = match UserProfile::from_form(name, phone, email) {
            Ok(p) => p,
            Err(err) => return self.fail(err),
        };
        info!(name = %profile.name, "registered");
        self.state.profile = Some(profile);
        self.registration_open = false;
        self.notify(
            NoticeKind::Info,
            "Registered! Please continue recharging".to_string(),
        );
        Ok(())
    }

    pub fn close_registration(&mut self) {
        self.registration_open = false;
    }

    pub fn on_direct_purchase(&mut self) -> Result<u64, GameError> {
        let price = self.config.direct_purchase_price;
        match self.state.wallet.purchase_at_fixed_price(price) {
            Ok(balance) => {
                info!(price, balance, "full-price purchase");
                self.notify(NoticeKind::Info, "Purchase complete (full price)".to_string());
                Ok(balance)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Pays for the current selection and starts its draw.
    /// Nothing is committed unless the debit succeeds.
    pub fn on_pay(&mut self) -> Result<DrawId, GameError> {
        // Labels are snapshotted here; later selection edits cannot reach the draw.
        let committed = self.state.selection.labels();
        if let Err(err) = self.state.draw.can_commit(&committed) {
            return self.fail(err);
        }
        let cost = self.current_cost();
        if let Err(err) = self.state.wallet.debit(cost) {
            return self.fail(err);
        }
        let id = match self.state.draw.commit(committed) {
            Ok(id) => id,
            Err(err) => {
                // Unreachable after `can_commit`; refund the debit.
                let _ = self.state.wallet.credit(cost);
                return self.fail(err);
            }
        };
        if let Err(err) = self.state.draw.animate(self.sink.clone()) {
            return self.fail(err);
        }
        info!(
            cost,
            cells = self.state.selection.size(),
            balance = self.state.wallet.balance,
            "paid, draw started"
        );
        self.outcome_panel = true;
        Ok(id)
    }

    /// Feeds a scheduled draw callback back into the engine.
    pub fn handle_signal(&mut self, signal: DrawSignal) {
        match signal {
            DrawSignal::Tick(id) => {
                self.state.draw.tick(id, &mut self.rng);
            }
            DrawSignal::AnimationDone(id) => {
                self.state
                    .draw
                    .finish_animation(id, &mut self.rng, self.sink.clone());
            }
            DrawSignal::Revealed(id) => {
                if let Some(outcome) = self.state.draw.report(id) {
                    self.on_draw_resolved(&outcome);
                }
            }
        }
    }

    fn on_draw_resolved(&mut self, outcome: &DrawOutcome) {
        if outcome.is_win {
            let bonus = self.config.win_bonus;
            if let Err(err) = self.state.wallet.credit(bonus) {
                warn!(%err, bonus, "win bonus not credited");
            }
            if let Err(err) = self.celebration.celebrate(&ConfettiBurst::default()) {
                warn!(%err, "celebration skipped");
            }
            info!(winning = outcome.winning, balance = self.state.wallet.balance, "draw won");
        } else {
            let points = self.config.loss_points(outcome.committed.len());
            self.state.wallet.add_points(points);
            info!(winning = outcome.winning, points, "draw lost");
        }
    }

    /// Clears the board and the draw. Safe at any point, including mid-draw.
    pub fn on_reset(&mut self) {
        self.state.selection.clear();
        self.state.draw.reset();
        self.outcome_panel = false;
        debug!("session reset");
    }

    pub fn view(&self) -> SessionView {
        let selection = &self.state.selection;
        let count = selection.size();
        let cost = self.current_cost();
        let idle = self.state.draw.is_idle();
        let pay_enabled = count > 0 && idle;
        let draw = &self.state.draw;
        let reported = draw.reported_outcome();
        let status = match (self.outcome_panel, draw.phase(), reported) {
            (false, _, _) => DrawStatus::Hidden,
            (true, _, Some(o)) if o.is_win => DrawStatus::Won,
            (true, _, Some(_)) => DrawStatus::Lost,
            (true, DrawPhase::Idle, None) => DrawStatus::Hidden,
            (true, _, None) => DrawStatus::Matching,
        };
        SessionView {
            selected: (0..selection.total()).map(|i| selection.contains(i)).collect(),
            selected_count: count,
            remaining_count: selection.remaining(),
            current_cost: cost,
            balance_display: format_currency(self.state.wallet.balance),
            points_display: self.state.wallet.points.to_string(),
            pay_enabled,
            pay_label: if pay_enabled {
                format!("KOKO Pay {}", format_currency(cost))
            } else {
                "KOKO Pay".to_string()
            },
            registration_open: self.registration_open,
            notice: self.notice.clone(),
            draw: DrawView {
                visible: self.outcome_panel,
                number: draw.shown_number(),
                status,
                winner_marker: reported.is_some_and(|o| o.is_win),
                finish_visible: reported.is_some(),
            },
        }
    }
}
