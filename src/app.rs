//! Application wiring: decoder → bus → the active drawing surface.
//!
//! Two surfaces share one device: the main drawing board and the practice
//! game. Exactly one of them is subscribed to the bus at a time; switching
//! unsubscribes the handlers registered for the other.

use std::cell::{Ref, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, error, info};

use crate::board::PenState;
use crate::bus::{Channel, Envelope, EventBus, Handler};
use crate::config::{Config, StartSurface};
use crate::device::{
    CommandDecoder, DeviceLink, Incoming, Timed, Transport, TransportError, UiCommand,
};
use crate::input::{InteractionState, SurfaceRequest, SurfaceSettings};
use crate::session::{ExportSnapshot, save_export};
use crate::tutorial::TutorialSession;
use crate::ui;

/// Channels the practice game listens on; it has no menu.
const TUTORIAL_CHANNELS: [Channel; 3] = [Channel::Movement, Channel::Mode, Channel::Pen];

/// Which surface currently receives device events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSurface {
    Main,
    Tutorial,
}

pub struct App {
    bus: Rc<EventBus>,
    decoder: CommandDecoder,
    main: Rc<RefCell<InteractionState>>,
    tutorial: Rc<RefCell<TutorialSession>>,
    active: ActiveSurface,
    subscriptions: Vec<(Channel, Handler)>,
    export_dir: PathBuf,
    last_export: Option<PathBuf>,
}

impl App {
    pub fn new(config: &Config, now: Instant) -> Self {
        let mut app = Self {
            bus: Rc::new(EventBus::with_all_channels()),
            decoder: CommandDecoder::new(),
            main: Rc::new(RefCell::new(InteractionState::new(
                SurfaceSettings::from_config(config),
            ))),
            tutorial: Rc::new(RefCell::new(TutorialSession::new(config, now))),
            active: ActiveSurface::Main,
            subscriptions: Vec::new(),
            export_dir: config.export_directory(),
            last_export: None,
        };
        let start = match config.session.start_surface {
            StartSurface::Main => ActiveSurface::Main,
            StartSurface::Tutorial => ActiveSurface::Tutorial,
        };
        app.attach(start);
        app
    }

    /// Overrides the directory drawings are saved to.
    pub fn set_export_dir(&mut self, dir: impl Into<PathBuf>) {
        self.export_dir = dir.into();
    }

    pub fn active_surface(&self) -> ActiveSurface {
        self.active
    }

    pub fn main(&self) -> Ref<'_, InteractionState> {
        self.main.borrow()
    }

    pub fn tutorial(&self) -> Ref<'_, TutorialSession> {
        self.tutorial.borrow()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn decoder(&self) -> &CommandDecoder {
        &self.decoder
    }

    /// Path of the most recent successful export.
    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }

    /// Connects `link` and processes notifications until the stream ends or
    /// `quit` is raised. The notification in flight when `quit` is raised
    /// completes; nothing after it is dispatched.
    pub fn run<T: Transport>(
        &mut self,
        link: &mut DeviceLink<T>,
        quit: &AtomicBool,
    ) -> Result<(), TransportError> {
        if let Err(err) = link.connect() {
            self.main
                .borrow_mut()
                .log_mut()
                .push(format!("Connection failed: {err}"));
            return Err(err);
        }
        self.bus.reopen();
        self.main
            .borrow_mut()
            .log_mut()
            .push(format!("Connected to {}", link.name()));

        while !quit.load(Ordering::Acquire) {
            let Some(incoming) = link.recv() else {
                break;
            };
            self.process(incoming);
        }

        link.disconnect();
        self.disconnect();
        Ok(())
    }

    /// Handles one notification from the transport.
    pub fn process(&mut self, incoming: Timed<Incoming>) {
        let now = incoming.at;
        match incoming.item {
            Incoming::Frame(bytes) => {
                let pen = self.active_pen();
                self.decoder.dispatch(&self.bus, &bytes, pen, now);
            }
            Incoming::Ui(command) => self.apply_ui(command, now),
        }
        self.settle(now);
    }

    /// Stops accepting device events.
    pub fn disconnect(&mut self) {
        if self.bus.is_closed() {
            return;
        }
        self.bus.close();
        self.main.borrow_mut().log_mut().push("Disconnected");
    }

    /// Pen state of the surface the decoder is feeding.
    fn active_pen(&self) -> PenState {
        match self.active {
            ActiveSurface::Main => self.main.borrow().pen(),
            ActiveSurface::Tutorial => self.tutorial.borrow().pen(),
        }
    }

    fn apply_ui(&mut self, command: UiCommand, now: Instant) {
        debug!("UI command {command:?}");
        match (command, self.active) {
            (UiCommand::TutorialStart, _) => self.start_tutorial(now),
            (UiCommand::Undo, ActiveSurface::Main) => {
                self.main.borrow_mut().undo();
            }
            (UiCommand::Redo, ActiveSurface::Main) => {
                self.main.borrow_mut().redo();
            }
            (UiCommand::Clear, ActiveSurface::Main) => self.main.borrow_mut().clear_board(now),
            (UiCommand::CloseMenu, ActiveSurface::Main) => self.main.borrow_mut().close_menu(),
            (UiCommand::TutorialNext, ActiveSurface::Tutorial) => {
                self.tutorial.borrow_mut().next_level(now)
            }
            (UiCommand::TutorialReset, ActiveSurface::Tutorial) => {
                self.tutorial.borrow_mut().reset_level(now)
            }
            (UiCommand::TutorialSkip, ActiveSurface::Tutorial) => self.tutorial.borrow_mut().skip(),
            (command, surface) => debug!("{command:?} has no effect on {surface:?} surface"),
        }
    }

    /// Follows up on whatever the last dispatch left behind: menu requests
    /// on the main board, the timer and completion on the practice game.
    fn settle(&mut self, now: Instant) {
        match self.active {
            ActiveSurface::Main => {
                let requests = self.main.borrow_mut().take_requests();
                for request in requests {
                    match request {
                        SurfaceRequest::StartTutorial => self.start_tutorial(now),
                        SurfaceRequest::SaveDrawing => self.save_drawing(),
                    }
                }
            }
            ActiveSurface::Tutorial => {
                let finished = {
                    let mut tutorial = self.tutorial.borrow_mut();
                    tutorial.tick(now);
                    tutorial.is_finished()
                };
                if finished {
                    let score = self.tutorial.borrow().score();
                    self.main
                        .borrow_mut()
                        .log_mut()
                        .push(format!("Practice game closed (score {score})"));
                    self.attach(ActiveSurface::Main);
                }
            }
        }
    }

    fn start_tutorial(&mut self, now: Instant) {
        self.tutorial.borrow_mut().restart(now);
        self.main.borrow_mut().log_mut().push("Practice game started");
        self.attach(ActiveSurface::Tutorial);
    }

    fn save_drawing(&mut self) {
        let snapshot = ExportSnapshot::from_state(&self.main.borrow());
        match save_export(&self.export_dir, &snapshot) {
            Ok(path) => {
                self.main.borrow_mut().log_mut().push("Drawing saved");
                self.last_export = Some(path);
            }
            Err(err) => {
                error!("Failed to save drawing: {err:#}");
                self.main.borrow_mut().log_mut().push("Save failed");
            }
        }
    }

    /// Subscribes `surface` to the bus in place of whatever was attached.
    fn attach(&mut self, surface: ActiveSurface) {
        for (channel, handler) in self.subscriptions.drain(..) {
            self.bus.unsubscribe(channel, &handler);
        }

        let channels: &[Channel] = match surface {
            ActiveSurface::Main => &Channel::ALL,
            ActiveSurface::Tutorial => &TUTORIAL_CHANNELS,
        };
        let handler: Handler = match surface {
            ActiveSurface::Main => {
                let main = Rc::clone(&self.main);
                Rc::new(move |envelope: &Envelope| {
                    main.borrow_mut().handle(envelope);
                })
            }
            ActiveSurface::Tutorial => {
                let tutorial = Rc::clone(&self.tutorial);
                Rc::new(move |envelope: &Envelope| {
                    tutorial.borrow_mut().handle(envelope);
                })
            }
        };
        for &channel in channels {
            self.bus.subscribe(channel, Rc::clone(&handler));
            self.subscriptions.push((channel, Rc::clone(&handler)));
        }

        info!("{surface:?} surface now receives device events");
        self.active = surface;
    }

    /// Status line for the active surface.
    pub fn status_line(&self, now: Instant) -> String {
        match self.active {
            ActiveSurface::Main => ui::status_line(&self.main.borrow().view()),
            ActiveSurface::Tutorial => ui::tutorial_status(&self.tutorial.borrow(), now),
        }
    }

    /// Board dump for the active surface.
    pub fn render_board(&self) -> String {
        match self.active {
            ActiveSurface::Main => ui::render_board(&self.main.borrow().view()),
            ActiveSurface::Tutorial => ui::render_board(&self.tutorial.borrow().surface().view()),
        }
    }
}
