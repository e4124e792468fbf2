use crate::config::{self, OverlayConfig};
use crate::events::AppEvent;
use crate::gui::icons::IconCache;
use crate::gui::theme::{self, WheelColors};
use crate::gui::wheel::{self, OverlayHost};
use crate::gui::window;
use gpwheel::catalog::{BrushAsset, Catalog, Mode};
use gpwheel::prefs::Preferences;
use gpwheel::session::{
    BrushCheck, MouseButton, Outcome, SessionError, WheelEvent, WheelSession,
};
use gtk::prelude::*;
use gtk4 as gtk;
use parking_lot::RwLock;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

type Session = WheelSession<OverlayHost, Arc<RwLock<Preferences>>>;

pub struct AppInit {
    pub catalog: Arc<Catalog>,
    pub config: OverlayConfig,
    pub prefs: Arc<RwLock<Preferences>>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    session: Rc<RefCell<Session>>,
    icons: Rc<RefCell<IconCache>>,
    catalog: Arc<Catalog>,
    root: gtk::ApplicationWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    HostMode(Mode),
    Subject(bool),
    Brush(BrushAsset),
    ConfigReload,
    /// Pointer motion in widget coordinates.
    PointerMove(f64, f64),
    Click(u32),
    Hotkey(u8),
    Escape,
    BrushCheck(BrushCheck),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::HostMode(m) => AppMsg::HostMode(m),
            AppEvent::Subject(s) => AppMsg::Subject(s),
            AppEvent::Brush(b) => AppMsg::Brush(b),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Number keys 1 to 6, on the main row or the keypad.
fn hotkey_digit(key: gtk::gdk::Key) -> Option<u8> {
    key.to_unicode()
        .and_then(|c| c.to_digit(10))
        .filter(|d| (1..=6).contains(d))
        .map(|d| d as u8)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("gpwheel"),
            add_css_class: "gpwheel-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Escape);
                        return glib::Propagation::Stop;
                    }
                    if let Some(n) = hotkey_digit(key) {
                        sender.input(AppMsg::Hotkey(n));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[local_ref]
            drawing_area -> gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "gpwheel-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(x, y));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0,
                    connect_pressed[sender] => move |gesture, _, _, _| {
                        sender.input(AppMsg::Click(gesture.current_button()));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            catalog,
            config,
            prefs,
            rx,
        } = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let area = gtk::DrawingArea::default();
        let drawing_area = &area;
        let widgets = view_output!();

        let icons = Rc::new(RefCell::new(IconCache::load(
            &catalog.icon_names(),
            config.icon_dir.as_deref(),
        )));
        let margin = config.invoke_margin;
        let host = OverlayHost::new(root.clone(), area.clone(), config);
        let session = WheelSession::new(host, prefs, catalog.clone()).with_invoke_margin(margin);

        let model = AppModel {
            session: Rc::new(RefCell::new(session)),
            icons,
            catalog,
            root: root.clone(),
        };

        let session_draw = model.session.clone();
        let icons_draw = model.icons.clone();
        let catalog_draw = model.catalog.clone();
        area.set_draw_func(move |area, cr, _, height| {
            let session = session_draw.borrow();
            let Some(frame) = session.frame() else {
                return;
            };
            let colors = WheelColors::from_context(&area.style_context());
            if let Err(e) = wheel::draw(
                cr,
                &frame,
                height as f64,
                &catalog_draw,
                &icons_draw.borrow(),
                &colors,
            ) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => {
                if self.session.borrow_mut().abort() {
                    log::debug!("Wheel closed by request");
                }
            }
            AppMsg::HostMode(mode) => self.session.borrow_mut().host_mut().set_mode(mode),
            AppMsg::Subject(subject) => self.session.borrow_mut().host_mut().set_subject(subject),
            AppMsg::Brush(asset) => {
                let mut session = self.session.borrow_mut();
                session.host_mut().set_active_brush(asset.clone());
                session.observe_brush(asset);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    *self.icons.borrow_mut() =
                        IconCache::load(&self.catalog.icon_names(), new_config.icon_dir.as_deref());
                    let mut session = self.session.borrow_mut();
                    session.set_invoke_margin(new_config.invoke_margin);
                    session.host_mut().set_config(new_config);
                    log::info!("Overlay settings reloaded");
                }
                Err(e) => log::error!("Failed to reload overlay settings: {}", e),
            },
            AppMsg::PointerMove(x, y) => {
                let mut session = self.session.borrow_mut();
                let pointer = window::to_wheel_space(x, y, session.host().height());
                let outcome = session.handle(WheelEvent::PointerMove(pointer));
                drop(session);
                self.finish(outcome, &sender);
            }
            AppMsg::Click(button) => {
                let button = match button {
                    1 => MouseButton::Left,
                    2 => MouseButton::Middle,
                    3 => MouseButton::Right,
                    _ => return,
                };
                let outcome = self.session.borrow_mut().handle(WheelEvent::Press(button));
                self.finish(outcome, &sender);
            }
            AppMsg::Hotkey(n) => {
                let outcome = self.session.borrow_mut().handle(WheelEvent::Hotkey(n));
                self.finish(outcome, &sender);
            }
            AppMsg::Escape => {
                let outcome = self.session.borrow_mut().handle(WheelEvent::Escape);
                self.finish(outcome, &sender);
            }
            AppMsg::BrushCheck(check) => {
                if let Err(e) = self.session.borrow_mut().reconcile(&check) {
                    log::error!("Brush check failed: {}", e);
                }
            }
        }
    }
}

impl AppModel {
    fn show(&mut self) {
        let mut session = self.session.borrow_mut();
        if session.is_open() {
            return;
        }
        let Some((x, y)) = window::get_cursor_position(&self.root) else {
            log::warn!("Pointer position unavailable, not opening the wheel");
            return;
        };
        let pointer = window::to_wheel_space(x, y, session.host().height());
        if let Err(e) = session.invoke(pointer) {
            log::debug!("Not opening the wheel: {}", e);
        }
    }

    fn finish(&self, outcome: Result<Outcome, SessionError>, sender: &ComponentSender<Self>) {
        match outcome {
            Ok(Outcome::Committed {
                brush_check: Some(check),
                ..
            }) => {
                let sender = sender.clone();
                glib::timeout_add_local_once(check.delay, move || {
                    sender.input(AppMsg::BrushCheck(check));
                });
            }
            Ok(_) => {}
            Err(e) => log::error!("{}", e),
        }
    }
}
