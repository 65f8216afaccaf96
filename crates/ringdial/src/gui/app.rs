use crate::config;
use crate::events::AppEvent;
use crate::gui::dial::{self, State};
use crate::gui::theme::{self, ThemeColors};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringtime::PointerSample;
use ringtime::geometry::Point;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub summary: String,
    pub width: i32,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Press(PointerSample),
    Drag(PointerSample),
    Release,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Builds a toolkit-independent sample from the gesture's current event.
fn pointer_sample(gesture: &gtk::GestureDrag, x: f64, y: f64) -> PointerSample {
    let is_touch = gesture.current_event().is_some_and(|e| {
        matches!(
            e.event_type(),
            gdk::EventType::TouchBegin | gdk::EventType::TouchUpdate | gdk::EventType::TouchEnd
        )
    });
    let position = Point::new(x, y);
    if is_touch {
        PointerSample::Touch {
            touches: vec![position],
        }
    } else {
        PointerSample::Mouse { client: position }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Ringdial"),
            set_resizable: false,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_top: 16,
                set_margin_bottom: 16,
                set_margin_start: 16,
                set_margin_end: 16,

                #[name = "summary"]
                gtk::Label {
                    #[watch]
                    set_label: &model.summary,
                    add_css_class: "ringdial-summary",
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    #[watch]
                    set_content_width: model.width,
                    #[watch]
                    set_content_height: model.width,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    add_css_class: "ringdial-drawing-area",

                    add_controller = gtk::GestureDrag {
                        set_button: 0, // Listen to all buttons
                        connect_drag_begin[sender] => move |gesture, x, y| {
                            let sample = pointer_sample(gesture, x, y);
                            if sample.suppresses_default() {
                                gesture.set_state(gtk::EventSequenceState::Claimed);
                            }
                            sender.input(AppMsg::Press(sample));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Drag(pointer_sample(gesture, x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::Release);
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::Release);
                        },
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
        let (state, rx) = init;

        theme::load_css();

        let summary = state.summary();
        let width = state.width().round() as i32;
        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            summary,
            width,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let state = state_draw.borrow();
                if let Err(e) = dial::draw(cr, &state.frame(), state.width(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Press(sample) => {
                let changed = self.state.borrow_mut().press(&sample);
                self.refresh(changed);
            }
            AppMsg::Drag(sample) => {
                let changed = self.state.borrow_mut().drag(&sample);
                self.refresh(changed);
            }
            AppMsg::Release => self.state.borrow_mut().release(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().reconfigure(&new_config);
                    self.width = new_config.width.round() as i32;
                    self.refresh(true);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn refresh(&mut self, changed: bool) {
        if changed {
            self.summary = self.state.borrow().summary();
            self.drawing_area.queue_draw();
        }
    }
}
