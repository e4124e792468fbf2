//! One wheel invocation: open at the pointer, follow it, then commit or cancel.
//!
//! The session owns its [`Host`] and reads preferences from a [`SettingsStore`] at every
//! open. Leaving the open state always goes through a single teardown that restores the
//! host's pointer indicator before any action is issued.

pub mod action;
pub mod reconcile;

pub use action::{Action, ActionError, resolve};
pub use reconcile::{BRUSH_CHECK_DELAY, BrushCheck, DrawBrushMemory};

use crate::catalog::{AssetPath, BrushAsset, Catalog, Mode};
use crate::geometry::{Point, Viewport};
use crate::prefs::{Preferences, SettingsError, SettingsStore};
use crate::wheel::{ActiveMode, Hit, LayoutError, Wheel, arrange, pointer_angle};
use std::mem;
use std::sync::Arc;
use thiserror::Error;

/// Default height of the strip along the bottom edge where the wheel does not open.
pub const INVOKE_MARGIN: f64 = 54.0;

/// What the session needs from the application it runs in.
pub trait Host {
    /// Whatever the host needs to put its pointer indicator back as it was.
    type Indicator;

    fn viewport(&self) -> Viewport;
    fn ui_scale(&self) -> f64;
    fn has_subject(&self) -> bool;
    fn current_mode(&self) -> Option<Mode>;
    /// Whether tools are backed by brush assets.
    fn brush_assets(&self) -> bool;
    fn active_brush(&self) -> Option<AssetPath>;

    fn suppress_indicator(&mut self) -> Self::Indicator;
    fn restore_indicator(&mut self, indicator: Self::Indicator);
    fn attach(&mut self);
    fn detach(&mut self);
    fn request_redraw(&mut self);
    fn issue(&mut self, action: &Action) -> Result<(), ActionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEvent {
    PointerMove(Point),
    Press(MouseButton),
    /// A number key, 1 to 6.
    Hotkey(u8),
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event did not concern the wheel.
    Ignored,
    Redraw,
    /// The wheel closed without an action.
    Cancelled,
    Committed {
        action: Action,
        brush_check: Option<BrushCheck>,
    },
}

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("A wheel is already open")]
    AlreadyOpen,
    #[error("Pointer is outside the viewport")]
    OutsideViewport,
    #[error("Pointer is within {0} px of the bottom edge")]
    InMargin(f64),
    #[error("Nothing to edit")]
    NoSubject,
    #[error("Cannot lay out the wheel: {0}")]
    Layout(#[from] LayoutError),
    #[error("Cannot read preferences: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Action failed: {0}")]
    Action(#[from] ActionError),
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub wheel: &'a Wheel,
    pub hit: Hit,
    pub pointer: Point,
    pub angle: Option<f64>,
    pub brush_assets: bool,
    /// Name of the hovered mode or tool, when hints are enabled.
    pub hint: Option<&'static str>,
}

#[derive(Debug)]
struct Snapshot {
    wheel: Wheel,
    active: Vec<ActiveMode>,
    prefs: Preferences,
    pointer: Point,
}

#[derive(Debug)]
struct OpenWheel<I> {
    snapshot: Snapshot,
    indicator: I,
}

#[derive(Debug)]
enum State<I> {
    Idle,
    Open(Box<OpenWheel<I>>),
}

pub struct WheelSession<H: Host, S> {
    host: H,
    settings: S,
    catalog: Arc<Catalog>,
    invoke_margin: f64,
    brush_memory: DrawBrushMemory,
    state: State<H::Indicator>,
}

impl<H: Host, S: SettingsStore> WheelSession<H, S> {
    pub fn new(host: H, settings: S, catalog: Arc<Catalog>) -> Self {
        Self {
            host,
            settings,
            catalog,
            invoke_margin: INVOKE_MARGIN,
            brush_memory: DrawBrushMemory::default(),
            state: State::Idle,
        }
    }

    pub fn with_invoke_margin(mut self, margin: f64) -> Self {
        self.invoke_margin = margin;
        self
    }

    pub fn set_invoke_margin(&mut self, margin: f64) {
        self.invoke_margin = margin;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn brush_memory(&self) -> &DrawBrushMemory {
        &self.brush_memory
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    pub fn active_modes(&self) -> Option<&[ActiveMode]> {
        match &self.state {
            State::Open(open) => Some(&open.snapshot.active),
            State::Idle => None,
        }
    }

    /// Opens the wheel centered on `pointer`.
    pub fn invoke(&mut self, pointer: Point) -> Result<(), InvokeError> {
        if self.is_open() {
            return Err(InvokeError::AlreadyOpen);
        }

        let viewport = self.host.viewport();
        if !viewport.bounds().contains(pointer) {
            return Err(InvokeError::OutsideViewport);
        }
        if pointer.y < self.invoke_margin {
            return Err(InvokeError::InMargin(self.invoke_margin));
        }
        if !self.host.has_subject() {
            return Err(InvokeError::NoSubject);
        }

        let prefs = self.settings.load()?;
        let active = prefs.active_modes(&self.catalog);
        let wheel = arrange(&active, pointer, &viewport, self.host.ui_scale())?;
        log::debug!(
            "Opening wheel with {} modes at ({}, {})",
            active.len(),
            wheel.anchor.x,
            wheel.anchor.y
        );

        let indicator = self.host.suppress_indicator();
        self.host.attach();
        self.host.request_redraw();

        self.state = State::Open(Box::new(OpenWheel {
            snapshot: Snapshot {
                wheel,
                active,
                prefs,
                pointer,
            },
            indicator,
        }));
        Ok(())
    }

    pub fn handle(&mut self, event: WheelEvent) -> Result<Outcome, SessionError> {
        let State::Open(open) = &mut self.state else {
            return Ok(Outcome::Ignored);
        };

        match event {
            WheelEvent::PointerMove(pointer) => {
                open.snapshot.pointer = pointer;
                self.host.request_redraw();
                Ok(Outcome::Redraw)
            }
            WheelEvent::Press(MouseButton::Left) => {
                let hit = open.snapshot.wheel.hit(open.snapshot.pointer);
                self.commit(hit)
            }
            WheelEvent::Hotkey(n) => match open.snapshot.wheel.mode_for_hotkey(n) {
                Some(mode) => self.commit(Hit {
                    mode: Some(mode),
                    tool: None,
                }),
                None => Ok(Outcome::Ignored),
            },
            WheelEvent::Press(MouseButton::Right) | WheelEvent::Escape => {
                self.teardown();
                Ok(Outcome::Cancelled)
            }
            WheelEvent::Press(MouseButton::Middle) => Ok(Outcome::Ignored),
        }
    }

    /// Closes the wheel without an action. Returns false if it was not open.
    pub fn abort(&mut self) -> bool {
        self.teardown().is_some()
    }

    pub fn frame(&self) -> Option<Frame<'_>> {
        let State::Open(open) = &self.state else {
            return None;
        };
        let Snapshot {
            wheel,
            prefs,
            pointer,
            ..
        } = &open.snapshot;

        let hit = wheel.hit(*pointer);
        let brush_assets = self.host.brush_assets();
        let hint = prefs
            .show_hints
            .then(|| self.hint_for(hit, brush_assets))
            .flatten();

        Some(Frame {
            wheel,
            hit,
            pointer: *pointer,
            angle: pointer_angle(*pointer, wheel.anchor),
            brush_assets,
            hint,
        })
    }

    fn hint_for(&self, hit: Hit, brush_assets: bool) -> Option<&'static str> {
        let mode = hit.mode?;
        match hit.tool {
            Some(index) => self
                .catalog
                .tool(mode, index)
                .map(|t| t.display_name(brush_assets)),
            None => Some(self.catalog.mode(mode).name),
        }
    }

    /// Records a brush the host switched to.
    pub fn observe_brush(&mut self, asset: BrushAsset) {
        if self.brush_memory.remember(asset) {
            log::debug!("Remembered draw brush {:?}", self.brush_memory.last());
        }
    }

    /// Runs a brush check returned by a commit. Issues at most one correcting action.
    pub fn reconcile(&mut self, check: &BrushCheck) -> Result<Option<Action>, SessionError> {
        let active = self.host.active_brush();
        let Some(action) = check.correction(active.as_ref()) else {
            return Ok(None);
        };
        log::info!("Host switched to {:?}, restoring {}", active, action);
        self.host.issue(&action)?;
        Ok(Some(action))
    }

    fn teardown(&mut self) -> Option<Snapshot> {
        let State::Open(open) = mem::replace(&mut self.state, State::Idle) else {
            return None;
        };
        let OpenWheel {
            snapshot,
            indicator,
        } = *open;

        self.host.restore_indicator(indicator);
        self.host.detach();
        self.host.request_redraw();
        Some(snapshot)
    }

    fn commit(&mut self, hit: Hit) -> Result<Outcome, SessionError> {
        let Some(snapshot) = self.teardown() else {
            return Ok(Outcome::Ignored);
        };

        let brush_assets = self.host.brush_assets();
        let Some(action) = resolve(
            &self.catalog,
            &snapshot.prefs,
            hit,
            self.host.current_mode(),
            brush_assets,
        ) else {
            log::debug!("Nothing to commit for {:?}", hit);
            return Ok(Outcome::Cancelled);
        };

        let brush_check = match (hit.mode, hit.tool) {
            (Some(mode), Some(tool)) => BrushCheck::for_commit(
                &self.catalog,
                &self.brush_memory,
                mode,
                tool,
                brush_assets,
            ),
            _ => None,
        };

        log::info!("Committing {}", action);
        if let Err(e) = self.host.issue(&action) {
            log::error!("Failed to issue {}: {}", action, e);
            return Err(e.into());
        }

        Ok(Outcome::Committed {
            action,
            brush_check,
        })
    }
}
