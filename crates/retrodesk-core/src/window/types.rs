use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use retrodesk_config::ViewportConfig;

use super::pixels;

/// Smallest width a resize can produce.
pub const MIN_WIDTH: u32 = 200;
/// Smallest height a resize can produce.
pub const MIN_HEIGHT: u32 = 100;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_X: i32 = 100;
pub const DEFAULT_Y: i32 = 100;

/// Starting value of the z-index counter. The first window created gets
/// `INITIAL_Z_INDEX + 1`.
pub const INITIAL_Z_INDEX: u64 = 1000;

/// Largest z-index a window can hold. The rendering layer stores stacking
/// order as a signed 32-bit integer.
pub const MAX_Z_INDEX: u64 = i32::MAX as u64;

/// A position and size snapshot, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(deserialize_with = "pixels::signed")]
    pub x: i32,
    #[serde(deserialize_with = "pixels::signed")]
    pub y: i32,
    #[serde(deserialize_with = "pixels::unsigned")]
    pub width: u32,
    #[serde(deserialize_with = "pixels::unsigned")]
    pub height: u32,
}

/// Screen area a maximized window fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Used when the rendering layer never reported a size.
    pub const FALLBACK: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<&ViewportConfig> for Viewport {
    fn from(config: &ViewportConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

/// What a window displays.
///
/// The manager never looks inside; it stores the payload and hands it back
/// to the rendering layer, which matches on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WindowContent {
    /// Literal markup, rendered as-is.
    Markup { markup: String },
    /// A renderable component, named by the rendering layer, with its
    /// initialization properties.
    Component {
        component: String,
        #[serde(default)]
        props: Map<String, Value>,
    },
}

impl WindowContent {
    pub fn markup(markup: impl Into<String>) -> Self {
        WindowContent::Markup {
            markup: markup.into(),
        }
    }

    pub fn component(component: impl Into<String>) -> Self {
        WindowContent::Component {
            component: component.into(),
            props: Map::new(),
        }
    }

    pub fn component_with_props(component: impl Into<String>, props: Map<String, Value>) -> Self {
        WindowContent::Component {
            component: component.into(),
            props,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, WindowContent::Markup { .. })
    }
}

/// Presentation state derived from a window's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    Normal,
    Minimized,
    Maximized,
}

impl std::fmt::Display for WindowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WindowStatus::Normal => "normal",
            WindowStatus::Minimized => "minimized",
            WindowStatus::Maximized => "maximized",
        };
        write!(f, "{}", s)
    }
}

/// A single on-screen panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: String,
    pub title: String,
    pub content: WindowContent,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Stacking order; higher paints above lower.
    pub z_index: u64,
    pub is_minimized: bool,
    pub is_maximized: bool,
    /// Geometry before maximize. `Some` exactly while `is_maximized`.
    pub original_bounds: Option<Bounds>,
}

impl Window {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    /// A minimized window reports `Minimized` even if it is also maximized.
    pub fn status(&self) -> WindowStatus {
        if self.is_minimized {
            WindowStatus::Minimized
        } else if self.is_maximized {
            WindowStatus::Maximized
        } else {
            WindowStatus::Normal
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}

/// Parameters for `WindowManager::create_window`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    /// Caller-chosen id. `None` (or empty) derives one from the creation time.
    pub id: Option<String>,
    pub title: String,
    pub content: WindowContent,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, content: WindowContent) -> Self {
        Self {
            id: None,
            title: title.into(),
            content,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: DEFAULT_X,
            y: DEFAULT_Y,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// Partial update for `WindowManager::update_window_content`. Only the
/// fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowUpdate {
    pub title: Option<String>,
    pub content: Option<WindowContent>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl WindowUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.width.is_none()
            && self.height.is_none()
    }
}
