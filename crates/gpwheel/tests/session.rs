use gpwheel::catalog::{AssetPath, BrushAsset, Catalog, Mode, ToolId};
use gpwheel::geometry::{Insets, Point, Viewport};
use gpwheel::prefs::Preferences;
use gpwheel::session::{
    Action, ActionError, Host, InvokeError, MouseButton, Outcome, WheelEvent, WheelSession,
};
use gpwheel::wheel::Slot;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Suppress,
    Restore(u32),
    Attach,
    Detach,
    Redraw,
    Issue,
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<Call>,
    issued: Vec<Action>,
    mode: Option<Mode>,
    subject: bool,
    brush_assets: bool,
    active_brush: Option<AssetPath>,
    reject: bool,
    indicator_size: u32,
}

impl RecordingHost {
    fn new() -> Self {
        Self {
            mode: Some(Mode::Draw),
            subject: true,
            indicator_size: 24,
            ..Self::default()
        }
    }

    fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }

    fn teardowns(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Restore(_)))
            .count()
    }
}

impl Host for RecordingHost {
    type Indicator = u32;

    fn viewport(&self) -> Viewport {
        Viewport::new(1600.0, 1000.0, Insets::new(40.0, 3.0, 52.0, 2.0))
    }

    fn ui_scale(&self) -> f64 {
        1.0
    }

    fn has_subject(&self) -> bool {
        self.subject
    }

    fn current_mode(&self) -> Option<Mode> {
        self.mode
    }

    fn brush_assets(&self) -> bool {
        self.brush_assets
    }

    fn active_brush(&self) -> Option<AssetPath> {
        self.active_brush.clone()
    }

    fn suppress_indicator(&mut self) -> u32 {
        self.calls.push(Call::Suppress);
        std::mem::replace(&mut self.indicator_size, 2)
    }

    fn restore_indicator(&mut self, indicator: u32) {
        self.calls.push(Call::Restore(indicator));
        self.indicator_size = indicator;
    }

    fn attach(&mut self) {
        self.calls.push(Call::Attach);
    }

    fn detach(&mut self) {
        self.calls.push(Call::Detach);
    }

    fn request_redraw(&mut self) {
        self.calls.push(Call::Redraw);
    }

    fn issue(&mut self, action: &Action) -> Result<(), ActionError> {
        self.calls.push(Call::Issue);
        if self.reject {
            return Err(ActionError::Rejected("not now".to_string()));
        }
        self.issued.push(action.clone());
        Ok(())
    }
}

fn session(host: RecordingHost) -> WheelSession<RecordingHost, Preferences> {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let prefs = Preferences::defaults(&catalog);
    WheelSession::new(host, prefs, catalog)
}

const CENTER: Point = Point { x: 800.0, y: 500.0 };

fn button_center(
    session: &WheelSession<RecordingHost, Preferences>,
    mode: Mode,
    i: usize,
) -> Point {
    let frame = session.frame().unwrap();
    let rect = frame.wheel.box_for(mode).unwrap().buttons[i].rect;
    Point::new(rect.left + rect.width / 2.0, rect.bottom + rect.height / 2.0)
}

#[test]
fn invoke_rejections_leave_session_idle() {
    let mut s = session(RecordingHost::new());
    assert!(matches!(
        s.invoke(Point::new(-5.0, 500.0)),
        Err(InvokeError::OutsideViewport)
    ));
    assert!(matches!(
        s.invoke(Point::new(800.0, 40.0)),
        Err(InvokeError::InMargin(_))
    ));

    s.host_mut().subject = false;
    assert!(matches!(s.invoke(CENTER), Err(InvokeError::NoSubject)));

    assert!(!s.is_open());
    assert!(s.host().calls.is_empty());
}

#[test]
fn empty_preferences_cannot_open() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let mut prefs = Preferences::defaults(&catalog);
    for tool in &mut prefs.tools {
        tool.enabled = false;
    }
    let mut s = WheelSession::new(RecordingHost::new(), prefs, catalog);

    assert!(matches!(s.invoke(CENTER), Err(InvokeError::Layout(_))));
    assert!(!s.is_open());
    assert!(s.host().calls.is_empty());
}

#[test]
fn second_invoke_is_rejected() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    assert!(matches!(s.invoke(CENTER), Err(InvokeError::AlreadyOpen)));
    assert_eq!(s.host().count(Call::Suppress), 1);
}

#[test]
fn pointer_moves_only_redraw() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    assert_eq!(s.host().indicator_size, 2);

    let outcome = s.handle(WheelEvent::PointerMove(CENTER.offset(0.0, -30.0)));
    assert_eq!(outcome.unwrap(), Outcome::Redraw);
    let frame = s.frame().unwrap();
    assert_eq!(frame.hit.mode, Some(Mode::Sculpt));
    assert_eq!(frame.hint, Some("Sculpt Mode"));
    assert!(frame.angle.is_some());
    assert!(s.host().issued.is_empty());
    assert_eq!(
        s.handle(WheelEvent::Press(MouseButton::Middle)).unwrap(),
        Outcome::Ignored
    );
    assert!(s.is_open());
}

#[test]
fn click_on_tool_commits_once() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    let pointer = button_center(&s, Mode::Edit, 0);
    s.handle(WheelEvent::PointerMove(pointer)).unwrap();

    let outcome = s.handle(WheelEvent::Press(MouseButton::Left)).unwrap();
    let expected = Action::SelectTool {
        mode: Mode::Edit,
        switch_mode: true,
        tool: ToolId::new("builtin.select_box"),
    };
    assert_eq!(
        outcome,
        Outcome::Committed {
            action: expected.clone(),
            brush_check: None
        }
    );

    let host = s.host();
    assert_eq!(host.issued, vec![expected]);
    assert_eq!(host.teardowns(), 1);
    assert_eq!(host.count(Call::Detach), 1);
    assert_eq!(host.indicator_size, 24);
    assert!(!s.is_open());
}

#[test]
fn teardown_runs_before_the_action() {
    let mut host = RecordingHost::new();
    host.reject = true;
    let mut s = session(host);
    s.invoke(CENTER).unwrap();
    s.handle(WheelEvent::PointerMove(CENTER.offset(0.0, -30.0)))
        .unwrap();

    assert!(s.handle(WheelEvent::Press(MouseButton::Left)).is_err());
    let calls = &s.host().calls;
    let restore = calls
        .iter()
        .position(|c| matches!(c, Call::Restore(24)))
        .unwrap();
    let issue = calls.iter().position(|&c| c == Call::Issue).unwrap();
    assert!(restore < issue);
    assert!(!s.is_open());
}

#[test]
fn every_exit_tears_down_exactly_once() {
    let exits = [
        WheelEvent::Press(MouseButton::Left),
        WheelEvent::Hotkey(3),
        WheelEvent::Press(MouseButton::Right),
        WheelEvent::Escape,
    ];
    for exit in exits {
        let mut s = session(RecordingHost::new());
        s.invoke(CENTER).unwrap();
        s.handle(exit).unwrap();
        s.handle(WheelEvent::Escape).unwrap();
        assert!(!s.abort());

        assert_eq!(s.host().teardowns(), 1, "exit via {:?}", exit);
        assert_eq!(s.host().count(Call::Attach), 1);
        assert_eq!(s.host().count(Call::Detach), 1);
    }
}

#[test]
fn cancel_issues_nothing() {
    for cancel in [WheelEvent::Press(MouseButton::Right), WheelEvent::Escape] {
        let mut s = session(RecordingHost::new());
        s.invoke(CENTER).unwrap();
        s.handle(WheelEvent::PointerMove(button_center(&s, Mode::Edit, 0)))
            .unwrap();
        assert_eq!(s.handle(cancel).unwrap(), Outcome::Cancelled);
        assert!(s.host().issued.is_empty());
    }
}

#[test]
fn abort_restores_indicator() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    assert!(s.abort());
    assert_eq!(s.host().indicator_size, 24);
    assert_eq!(s.handle(WheelEvent::Escape).unwrap(), Outcome::Ignored);
}

#[test]
fn hotkey_switches_mode_only() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    // Default order: weight, draw, vertex, edit, sculpt, object.
    assert_eq!(
        s.handle(WheelEvent::Hotkey(7)).unwrap(),
        Outcome::Ignored
    );
    let outcome = s.handle(WheelEvent::Hotkey(4)).unwrap();
    assert_eq!(
        outcome,
        Outcome::Committed {
            action: Action::SwitchMode { mode: Mode::Edit },
            brush_check: None
        }
    );
    assert_eq!(s.host().issued.len(), 1);
}

#[test]
fn hotkey_on_current_mode_is_a_no_op() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    assert_eq!(s.handle(WheelEvent::Hotkey(2)).unwrap(), Outcome::Cancelled);
    assert!(s.host().issued.is_empty());
    assert_eq!(s.host().teardowns(), 1);
}

#[test]
fn click_in_deadzone_cancels() {
    let mut s = session(RecordingHost::new());
    s.invoke(CENTER).unwrap();
    s.handle(WheelEvent::PointerMove(CENTER.offset(1.0, 2.0)))
        .unwrap();
    assert_eq!(
        s.handle(WheelEvent::Press(MouseButton::Left)).unwrap(),
        Outcome::Cancelled
    );
    assert!(s.host().issued.is_empty());
}

#[test]
fn preferences_are_read_at_every_open() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let shared = Arc::new(RwLock::new(Preferences::defaults(&catalog)));
    let mut s = WheelSession::new(RecordingHost::new(), shared.clone(), catalog);

    s.invoke(CENTER).unwrap();
    assert_eq!(s.active_modes().unwrap().len(), 6);
    s.abort();

    shared.write().mode_order = vec![
        Mode::Object,
        Mode::Draw,
        Mode::Weight,
        Mode::Vertex,
        Mode::Edit,
        Mode::Sculpt,
    ];
    s.invoke(CENTER).unwrap();
    let frame = s.frame().unwrap();
    assert_eq!(frame.wheel.box_in(Slot::UpperLeft).unwrap().mode, Mode::Object);
}

#[test]
fn draw_tool_commit_schedules_brush_check() {
    let mut host = RecordingHost::new();
    host.brush_assets = true;
    host.mode = Some(Mode::Object);
    let mut s = session(host);
    s.observe_brush(BrushAsset::new("LOCAL", "", "Brush/Ink Pen"));
    s.observe_brush(BrushAsset::new("ESSENTIALS", "", "Brush/Eraser"));

    s.invoke(CENTER).unwrap();
    s.handle(WheelEvent::PointerMove(button_center(&s, Mode::Draw, 0)))
        .unwrap();
    let Outcome::Committed {
        action,
        brush_check,
    } = s.handle(WheelEvent::Press(MouseButton::Left)).unwrap()
    else {
        panic!("expected a commit");
    };
    assert_eq!(
        action,
        Action::SelectTool {
            mode: Mode::Draw,
            switch_mode: true,
            tool: ToolId::new("builtin.brush"),
        }
    );
    let check = brush_check.unwrap();
    assert_eq!(check.expected.path.name(), "Ink Pen");

    s.host_mut().active_brush = Some(AssetPath::new("Brush/Pencil"));
    assert_eq!(s.reconcile(&check).unwrap(), None);

    s.host_mut().active_brush = Some(AssetPath::new("Brush/Tint"));
    let fixed = s.reconcile(&check).unwrap().unwrap();
    assert_eq!(
        fixed,
        Action::ActivateAsset {
            mode: Mode::Draw,
            switch_mode: false,
            asset: BrushAsset::new("LOCAL", "", "Brush/Ink Pen"),
        }
    );
    assert_eq!(s.host().issued.len(), 2);
}
