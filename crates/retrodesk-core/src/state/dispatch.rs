use std::convert::Infallible;

use tracing::debug;

use crate::state::events::Event;
use crate::state::store::Store;
use crate::state::types::Command;
use crate::window::{WindowManager, WindowSpec};

/// Default Store implementation that routes commands to a [`WindowManager`].
///
/// Window operations cannot fail, so neither can dispatch. Commands aimed at
/// a missing window, or at locked geometry, return no events.
#[derive(Debug)]
pub struct DesktopStore {
    manager: WindowManager,
}

impl DesktopStore {
    pub fn new(manager: WindowManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut WindowManager {
        &mut self.manager
    }

    pub fn into_manager(self) -> WindowManager {
        self.manager
    }

    fn exists(&self, id: &str) -> bool {
        self.manager.window(id).is_some()
    }

    fn geometry_unlocked(&self, id: &str) -> bool {
        self.manager.window(id).is_some_and(|w| !w.is_maximized)
    }

    fn open(&mut self, spec: WindowSpec) -> Vec<Event> {
        let existed = spec
            .id
            .as_deref()
            .is_some_and(|id| !id.is_empty() && self.exists(id));

        let id = self.manager.create_window(spec);
        if existed {
            vec![Event::WindowFocused { id }]
        } else {
            vec![Event::WindowCreated { id }]
        }
    }
}

impl Store for DesktopStore {
    type Error = Infallible;

    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, Infallible> {
        debug!(event = "core.state.dispatch_started", command = ?cmd);

        let previous_active = self.manager.active_window_id().map(str::to_owned);

        let mut events = match cmd {
            Command::CreateWindow(spec) => self.open(spec),
            Command::OpenApplet(applet) => self.open(applet.spec()),
            Command::CloseWindow { id } => {
                if self.exists(&id) {
                    self.manager.close_window(&id);
                    vec![Event::WindowClosed { id }]
                } else {
                    vec![]
                }
            }
            Command::FocusWindow { id } => {
                if self.exists(&id) {
                    self.manager.focus_window(&id);
                    vec![Event::WindowFocused { id }]
                } else {
                    vec![]
                }
            }
            Command::MinimizeWindow { id } => {
                if self.exists(&id) {
                    self.manager.minimize_window(&id);
                    vec![Event::WindowMinimized { id }]
                } else {
                    vec![]
                }
            }
            Command::MaximizeWindow { id } => match self.manager.window(&id) {
                Some(window) => {
                    let was_maximized = window.is_maximized;
                    self.manager.maximize_window(&id);
                    if was_maximized {
                        vec![Event::WindowRestored { id }]
                    } else {
                        vec![Event::WindowMaximized { id }]
                    }
                }
                None => vec![],
            },
            Command::MoveWindow { id, x, y } => {
                if self.geometry_unlocked(&id) {
                    self.manager.move_window(&id, x, y);
                    vec![Event::WindowMoved { id, x, y }]
                } else {
                    vec![]
                }
            }
            Command::ResizeWindow { id, width, height } => {
                if self.geometry_unlocked(&id) {
                    self.manager.resize_window(&id, width, height);
                    match self.manager.window(&id) {
                        Some(window) => vec![Event::WindowResized {
                            width: window.width,
                            height: window.height,
                            id,
                        }],
                        None => vec![],
                    }
                } else {
                    vec![]
                }
            }
            Command::UpdateWindow { id, update } => {
                if self.exists(&id) && !update.is_empty() {
                    self.manager.update_window_content(&id, update);
                    vec![Event::WindowUpdated { id }]
                } else {
                    vec![]
                }
            }
            Command::RestoreState => {
                self.manager.load_window_state();
                vec![Event::StateRestored {
                    window_count: self.manager.windows().len(),
                }]
            }
            Command::ClearState => {
                self.manager.clear_window_state();
                vec![Event::StateCleared]
            }
        };

        let active = self.manager.active_window_id();
        if active != previous_active.as_deref() {
            events.push(Event::ActiveWindowChanged {
                id: active.map(str::to_owned),
            });
        }

        debug!(
            event = "core.state.dispatch_completed",
            event_count = events.len()
        );

        Ok(events)
    }
}
