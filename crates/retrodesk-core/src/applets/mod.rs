//! Built-in desktop applets.
//!
//! Each applet owns one fixed window id and a default window. The manager
//! only sees these as [`WindowSpec`]s; what the component names render to is
//! the rendering layer's business.

use tracing::debug;

use crate::window::{WindowContent, WindowManager, WindowSpec};

const ABOUT_MARKUP: &str = "<div class=\"about\">\
<h3>Windows 95 Experience</h3>\
<p>A nostalgic recreation of the classic Windows 95 interface.</p>\
</div>";

const NOTEPAD_MARKUP: &str =
    "<div class=\"notepad\"><textarea placeholder=\"Type your text here...\"></textarea></div>";

const TASK_MANAGER_MARKUP: &str =
    "<div class=\"task-manager\"><h4>Open Windows:</h4><div id=\"window-list\"></div></div>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applet {
    About,
    AllImagesGallery,
    Calculator,
    Camera,
    CincoIdentityGenerator,
    DancerFrameViewer,
    EditedImagesViewer,
    FluxImageGenerator,
    GeneratedGifsViewer,
    GoodMorningPaul,
    Notepad,
    SpeechTranscriber,
    TaskManager,
}

impl Applet {
    pub const ALL: [Applet; 13] = [
        Applet::About,
        Applet::AllImagesGallery,
        Applet::Calculator,
        Applet::Camera,
        Applet::CincoIdentityGenerator,
        Applet::DancerFrameViewer,
        Applet::EditedImagesViewer,
        Applet::FluxImageGenerator,
        Applet::GeneratedGifsViewer,
        Applet::GoodMorningPaul,
        Applet::Notepad,
        Applet::SpeechTranscriber,
        Applet::TaskManager,
    ];

    /// The window id this applet always opens under.
    pub fn id(&self) -> &'static str {
        match self {
            Applet::About => "about",
            Applet::AllImagesGallery => "all-images-gallery",
            Applet::Calculator => "calculator",
            Applet::Camera => "camera",
            Applet::CincoIdentityGenerator => "cinco-identity-generator",
            Applet::DancerFrameViewer => "dancer-frame-viewer",
            Applet::EditedImagesViewer => "edited-images-viewer",
            Applet::FluxImageGenerator => "flux-image-generator",
            Applet::GeneratedGifsViewer => "generated-gifs-viewer",
            Applet::GoodMorningPaul => "good-morning-paul",
            Applet::Notepad => "notepad",
            Applet::SpeechTranscriber => "speech-transcriber",
            Applet::TaskManager => "taskbar-window",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Applet::About => "About Windows 95",
            Applet::AllImagesGallery => "All Saved Images",
            Applet::Calculator => "Calculator",
            Applet::Camera => "Camera",
            Applet::CincoIdentityGenerator => "Cinco Identity Generator",
            Applet::DancerFrameViewer => "Saved Dancer Frame",
            Applet::EditedImagesViewer => "Edited Images Gallery",
            Applet::FluxImageGenerator => "Flux Image Generator",
            Applet::GeneratedGifsViewer => "Generated GIFs Gallery",
            Applet::GoodMorningPaul => "Paul's computer",
            Applet::Notepad => "Untitled - Notepad",
            Applet::SpeechTranscriber => "Speech Transcriber",
            Applet::TaskManager => "Window Manager",
        }
    }

    /// Default `(width, height, x, y)`.
    fn geometry(&self) -> (u32, u32, i32, i32) {
        match self {
            Applet::About => (350, 200, 250, 200),
            Applet::AllImagesGallery => (800, 600, 200, 50),
            Applet::Calculator => (200, 250, 200, 150),
            Applet::Camera => (500, 400, 200, 100),
            Applet::CincoIdentityGenerator => (500, 360, 300, 250),
            Applet::DancerFrameViewer => (450, 500, 300, 100),
            Applet::EditedImagesViewer => (600, 500, 250, 100),
            Applet::FluxImageGenerator => (500, 600, 350, 50),
            Applet::GeneratedGifsViewer => (800, 600, 250, 100),
            Applet::GoodMorningPaul => (400, 300, 100, 550),
            Applet::Notepad => (500, 400, 150, 100),
            Applet::SpeechTranscriber => (450, 500, 250, 50),
            Applet::TaskManager => (300, 200, 300, 250),
        }
    }

    fn content(&self) -> WindowContent {
        match self {
            Applet::About => WindowContent::markup(ABOUT_MARKUP),
            Applet::Notepad => WindowContent::markup(NOTEPAD_MARKUP),
            Applet::TaskManager => WindowContent::markup(TASK_MANAGER_MARKUP),
            Applet::AllImagesGallery => WindowContent::component("AllImagesGallery"),
            Applet::Calculator => WindowContent::component("Calculator"),
            Applet::Camera => WindowContent::component("Camera"),
            Applet::CincoIdentityGenerator => WindowContent::component("CincoIdentityGenerator"),
            Applet::DancerFrameViewer => WindowContent::component("DancerFrameViewer"),
            Applet::EditedImagesViewer => WindowContent::component("EditedImagesViewer"),
            Applet::FluxImageGenerator => WindowContent::component("FluxImageGenerator"),
            Applet::GeneratedGifsViewer => WindowContent::component("GeneratedGifsViewer"),
            Applet::GoodMorningPaul => WindowContent::component("GoodMorningPaul"),
            Applet::SpeechTranscriber => WindowContent::component("SpeechTranscriber"),
        }
    }

    /// The window this applet opens.
    pub fn spec(&self) -> WindowSpec {
        let (width, height, x, y) = self.geometry();
        WindowSpec::new(self.title(), self.content())
            .with_id(self.id())
            .with_size(width, height)
            .with_position(x, y)
    }
}

impl std::fmt::Display for Applet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Applet {
    type Err = String;

    /// Accepts the window id; `task-manager` is accepted as an alias for
    /// the task manager's `taskbar-window` id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        if wanted == "task-manager" {
            return Ok(Applet::TaskManager);
        }

        Applet::ALL
            .iter()
            .copied()
            .find(|applet| applet.id() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Applet::ALL.iter().map(|a| a.id()).collect();
                format!("Unknown applet '{}'. Known applets: {}", s, known.join(", "))
            })
    }
}

/// Register a creator for every built-in applet so saved windows can be
/// rebuilt by `load_window_state`.
pub fn register_builtin_applets(manager: &mut WindowManager) {
    for applet in Applet::ALL {
        manager.register_window_creator(applet.id(), move || applet.spec());
    }
    debug!(
        event = "core.applets.registered",
        count = Applet::ALL.len()
    );
}
